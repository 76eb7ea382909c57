//! API routes.

pub mod assets;
pub mod auth;
pub mod health;
pub mod metrics;
pub mod stats;

use crate::state::AppState;
use axum::Router;

/// Creates the main API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        .merge(health::routes())
        .merge(auth::routes())
        .with_state(state)
}

/// API routes under the versioned prefix.
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/assets", assets::routes())
        .nest("/metrics", metrics::routes())
        .nest("/stats", stats::routes())
}
