//! Summary statistics endpoint.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use ap_core::{summarize, HighFailureAsset, SummaryReport};

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ErrorResponse};
use crate::state::AppState;

/// Creates stats routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(summary))
}

/// One flagged asset in the report.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HighFailureAssetResponse {
    pub asset_id: i64,
    pub failure_rate: f64,
}

impl From<HighFailureAsset> for HighFailureAssetResponse {
    fn from(asset: HighFailureAsset) -> Self {
        Self {
            asset_id: asset.asset_id,
            failure_rate: asset.failure_rate,
        }
    }
}

/// Summary report response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryReportResponse {
    pub avg_downtime: f64,
    pub avg_uptime: f64,
    pub total_maintenance_cost: f64,
    pub failure_rate_threshold: f64,
    pub high_failure_assets: Vec<HighFailureAssetResponse>,
}

impl From<SummaryReport> for SummaryReportResponse {
    fn from(report: SummaryReport) -> Self {
        Self {
            avg_downtime: report.avg_downtime,
            avg_uptime: report.avg_uptime,
            total_maintenance_cost: report.total_maintenance_cost,
            failure_rate_threshold: report.failure_rate_threshold,
            high_failure_assets: report
                .high_failure_assets
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

/// Summary statistics over the full metric collection.
///
/// An empty collection is a success and yields the zero-valued report.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses(
        (status = 200, description = "Aggregate report", body = SummaryReportResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_token" = [])),
    tag = "Stats"
)]
pub async fn summary(
    State(state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> Result<Json<SummaryReportResponse>, ApiError> {
    let records = state.metrics.list_all().await?;
    Ok(Json(summarize(&records).into()))
}
