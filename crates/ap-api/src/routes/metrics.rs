//! Performance-metric record endpoints.
//!
//! One metric record per asset id. No check ties a metric to an existing
//! asset; the relation is by convention.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use ap_core::PerformanceMetric;

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ErrorResponse};
use crate::state::AppState;

/// Creates metric routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_metric))
        .route(
            "/:id",
            get(get_metric).put(update_metric).delete(delete_metric),
        )
}

// ============================================================================
// DTOs
// ============================================================================

/// Request body for creating a metric record. Strict-complete, like asset
/// creation.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMetricRequest {
    /// Key of the asset this metric describes.
    #[validate(range(min = 1))]
    pub asset_id: i64,
    /// Hours in service.
    pub uptime: Option<f64>,
    /// Hours out of service.
    pub downtime: Option<f64>,
    /// Accumulated maintenance spend.
    pub maintenance_cost: Option<f64>,
    /// Failures per unit time.
    pub failure_rate: Option<f64>,
    /// Output efficiency percentage.
    pub efficiency: Option<f64>,
}

/// Request body for updating a metric record. Only supplied fields are
/// merged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMetricRequest {
    /// Hours in service.
    pub uptime: Option<f64>,
    /// Hours out of service.
    pub downtime: Option<f64>,
    /// Accumulated maintenance spend.
    pub maintenance_cost: Option<f64>,
    /// Failures per unit time.
    pub failure_rate: Option<f64>,
    /// Output efficiency percentage.
    pub efficiency: Option<f64>,
}

/// Metric response DTO.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MetricResponse {
    pub asset_id: i64,
    pub uptime: Option<f64>,
    pub downtime: Option<f64>,
    pub maintenance_cost: Option<f64>,
    pub failure_rate: Option<f64>,
    pub efficiency: Option<f64>,
}

impl From<PerformanceMetric> for MetricResponse {
    fn from(metric: PerformanceMetric) -> Self {
        Self {
            asset_id: metric.asset_id,
            uptime: metric.uptime,
            downtime: metric.downtime,
            maintenance_cost: metric.maintenance_cost,
            failure_rate: metric.failure_rate,
            efficiency: metric.efficiency,
        }
    }
}

fn metric_from_create(request: CreateMetricRequest) -> PerformanceMetric {
    PerformanceMetric {
        asset_id: request.asset_id,
        uptime: request.uptime,
        downtime: request.downtime,
        maintenance_cost: request.maintenance_cost,
        failure_rate: request.failure_rate,
        efficiency: request.efficiency,
    }
}

fn metric_from_update(asset_id: i64, request: UpdateMetricRequest) -> PerformanceMetric {
    PerformanceMetric {
        asset_id,
        uptime: request.uptime,
        downtime: request.downtime,
        maintenance_cost: request.maintenance_cost,
        failure_rate: request.failure_rate,
        efficiency: request.efficiency,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a metric record for an asset id.
#[utoipa::path(
    post,
    path = "/api/v1/metrics",
    request_body = CreateMetricRequest,
    responses(
        (status = 201, description = "Metric created", body = MetricResponse),
        (status = 409, description = "A metric for this asset id already exists", body = ErrorResponse),
        (status = 422, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_token" = [])),
    tag = "Metrics"
)]
pub async fn create_metric(
    State(state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Json(request): Json<CreateMetricRequest>,
) -> Result<(StatusCode, Json<MetricResponse>), ApiError> {
    request.validate()?;

    let metric = metric_from_create(request);
    state.metrics.create(&metric).await?;

    Ok((StatusCode::CREATED, Json(metric.into())))
}

/// Get the metric record for an asset id.
#[utoipa::path(
    get,
    path = "/api/v1/metrics/{id}",
    params(("id" = i64, Path, description = "Asset id")),
    responses(
        (status = 200, description = "The metric record", body = MetricResponse),
        (status = 404, description = "No metric for this asset id", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_token" = [])),
    tag = "Metrics"
)]
pub async fn get_metric(
    State(state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<MetricResponse>, ApiError> {
    let metric = state.metrics.read(id).await?;
    Ok(Json(metric.into()))
}

/// Update a metric record.
///
/// Merges only the supplied fields; a missing id matches nothing and
/// creates no record.
#[utoipa::path(
    put,
    path = "/api/v1/metrics/{id}",
    params(("id" = i64, Path, description = "Asset id")),
    request_body = UpdateMetricRequest,
    responses(
        (status = 204, description = "Update applied (or matched nothing)"),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_token" = [])),
    tag = "Metrics"
)]
pub async fn update_metric(
    State(state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateMetricRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate()?;

    let patch = metric_from_update(id, request);
    state.metrics.update(&patch).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a metric record. Idempotent.
#[utoipa::path(
    delete,
    path = "/api/v1/metrics/{id}",
    params(("id" = i64, Path, description = "Asset id")),
    responses(
        (status = 204, description = "Metric removed (or was absent)"),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_token" = [])),
    tag = "Metrics"
)]
pub async fn delete_metric(
    State(state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.metrics.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
