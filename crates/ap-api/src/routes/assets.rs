//! Asset record endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use ap_core::Asset;

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ErrorResponse};
use crate::state::AppState;

/// Creates asset routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_asset))
        .route(
            "/:id",
            get(get_asset).put(update_asset).delete(delete_asset),
        )
}

// ============================================================================
// DTOs
// ============================================================================

/// Request body for creating an asset.
///
/// Creation is strict-complete: every field must be supplied, or the
/// request fails with 422.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssetRequest {
    /// Unique positive asset id.
    #[validate(range(min = 1))]
    pub asset_id: i64,
    /// Asset name.
    pub name: Option<String>,
    /// Equipment category.
    pub asset_type: Option<String>,
    /// Physical location.
    pub location: Option<String>,
    /// Purchase date (free text).
    pub purchase_date: Option<String>,
    /// Acquisition cost.
    pub initial_cost: Option<f64>,
    /// Operational status.
    pub operational_status: Option<String>,
}

/// Request body for updating an asset. Only supplied fields are merged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAssetRequest {
    /// Asset name.
    pub name: Option<String>,
    /// Equipment category.
    pub asset_type: Option<String>,
    /// Physical location.
    pub location: Option<String>,
    /// Purchase date (free text).
    pub purchase_date: Option<String>,
    /// Acquisition cost.
    pub initial_cost: Option<f64>,
    /// Operational status.
    pub operational_status: Option<String>,
}

/// Asset response DTO. Carries schema fields only.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssetResponse {
    pub asset_id: i64,
    pub name: Option<String>,
    pub asset_type: Option<String>,
    pub location: Option<String>,
    pub purchase_date: Option<String>,
    pub initial_cost: Option<f64>,
    pub operational_status: Option<String>,
}

impl From<Asset> for AssetResponse {
    fn from(asset: Asset) -> Self {
        Self {
            asset_id: asset.asset_id,
            name: asset.name,
            asset_type: asset.asset_type,
            location: asset.location,
            purchase_date: asset.purchase_date,
            initial_cost: asset.initial_cost,
            operational_status: asset.operational_status,
        }
    }
}

fn asset_from_create(request: CreateAssetRequest) -> Asset {
    Asset {
        asset_id: request.asset_id,
        name: request.name,
        asset_type: request.asset_type,
        location: request.location,
        purchase_date: request.purchase_date,
        initial_cost: request.initial_cost,
        operational_status: request.operational_status,
    }
}

fn asset_from_update(asset_id: i64, request: UpdateAssetRequest) -> Asset {
    Asset {
        asset_id,
        name: request.name,
        asset_type: request.asset_type,
        location: request.location,
        purchase_date: request.purchase_date,
        initial_cost: request.initial_cost,
        operational_status: request.operational_status,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a new asset.
#[utoipa::path(
    post,
    path = "/api/v1/assets",
    request_body = CreateAssetRequest,
    responses(
        (status = 201, description = "Asset created", body = AssetResponse),
        (status = 409, description = "Asset id already in use", body = ErrorResponse),
        (status = 422, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_token" = [])),
    tag = "Assets"
)]
pub async fn create_asset(
    State(state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Json(request): Json<CreateAssetRequest>,
) -> Result<(StatusCode, Json<AssetResponse>), ApiError> {
    request.validate()?;

    let asset = asset_from_create(request);
    state.assets.create(&asset).await?;

    Ok((StatusCode::CREATED, Json(asset.into())))
}

/// Get asset by id.
#[utoipa::path(
    get,
    path = "/api/v1/assets/{id}",
    params(("id" = i64, Path, description = "Asset id")),
    responses(
        (status = 200, description = "The asset", body = AssetResponse),
        (status = 404, description = "No such asset", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_token" = [])),
    tag = "Assets"
)]
pub async fn get_asset(
    State(state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<AssetResponse>, ApiError> {
    let asset = state.assets.read(id).await?;
    Ok(Json(asset.into()))
}

/// Update an asset.
///
/// Merges only the supplied fields. A missing id is not an error: the
/// update matches nothing and no record is created.
#[utoipa::path(
    put,
    path = "/api/v1/assets/{id}",
    params(("id" = i64, Path, description = "Asset id")),
    request_body = UpdateAssetRequest,
    responses(
        (status = 204, description = "Update applied (or matched nothing)"),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_token" = [])),
    tag = "Assets"
)]
pub async fn update_asset(
    State(state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateAssetRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate()?;

    let patch = asset_from_update(id, request);
    state.assets.update(&patch).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete an asset. Idempotent: succeeds whether or not one existed.
#[utoipa::path(
    delete,
    path = "/api/v1/assets/{id}",
    params(("id" = i64, Path, description = "Asset id")),
    responses(
        (status = 204, description = "Asset removed (or was absent)"),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_token" = [])),
    tag = "Assets"
)]
pub async fn delete_asset(
    State(state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.assets.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
