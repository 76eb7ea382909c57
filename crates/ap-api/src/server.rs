//! API server implementation.

use axum::{middleware, Router};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ErrorResponse;
use crate::middleware::{body_limit_layer, cors_layer, request_id, request_logging, security_headers};
use crate::routes;
use crate::state::AppState;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Address to bind to.
    pub bind_address: SocketAddr,
    /// Enable Swagger UI.
    pub enable_swagger: bool,
    /// Shutdown timeout for graceful shutdown.
    pub shutdown_timeout: Duration,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            enable_swagger: true,
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::health::readiness_check,
        crate::routes::health::liveness_check,
        crate::routes::auth::issue_token,
        crate::routes::assets::create_asset,
        crate::routes::assets::get_asset,
        crate::routes::assets::update_asset,
        crate::routes::assets::delete_asset,
        crate::routes::metrics::create_metric,
        crate::routes::metrics::get_metric,
        crate::routes::metrics::update_metric,
        crate::routes::metrics::delete_metric,
        crate::routes::stats::summary,
    ),
    components(
        schemas(
            crate::routes::health::HealthResponse,
            crate::routes::auth::TokenRequest,
            crate::routes::auth::TokenResponse,
            crate::routes::assets::CreateAssetRequest,
            crate::routes::assets::UpdateAssetRequest,
            crate::routes::assets::AssetResponse,
            crate::routes::metrics::CreateMetricRequest,
            crate::routes::metrics::UpdateMetricRequest,
            crate::routes::metrics::MetricResponse,
            crate::routes::stats::HighFailureAssetResponse,
            crate::routes::stats::SummaryReportResponse,
            ErrorResponse,
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Bearer token issuance"),
        (name = "Assets", description = "Asset record management"),
        (name = "Metrics", description = "Performance metric record management"),
        (name = "Stats", description = "Summary statistics"),
    ),
    info(
        title = "Asset Pulse API",
        version = "0.1.0",
        description = "Asset and performance-metric record management with summary statistics",
        license(name = "MIT"),
    )
)]
pub struct ApiDoc;

/// Registers the bearer security scheme referenced by protected paths.
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// API server.
pub struct ApiServer {
    config: ApiServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Creates a new API server.
    pub fn new(state: AppState, config: ApiServerConfig) -> Self {
        Self { config, state }
    }

    /// Creates a new API server with default configuration.
    pub fn with_state(state: AppState) -> Self {
        Self::new(state, ApiServerConfig::default())
    }

    /// Builds the router.
    pub fn router(&self) -> Router {
        routes::health::init_start_time();

        let mut app = routes::create_router(self.state.clone());

        if self.config.enable_swagger {
            app = app.merge(
                SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
        }

        // Apply middleware (order matters: innermost first).
        app.layer(middleware::from_fn(security_headers))
            .layer(middleware::from_fn(request_logging))
            .layer(middleware::from_fn(request_id))
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer())
            .layer(body_limit_layer())
            .layer(CatchPanicLayer::new())
    }

    /// Runs the server until a shutdown signal arrives.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let app = self.router();
        let addr = self.config.bind_address;

        info!("Starting API server on {}", addr);

        let listener = TcpListener::bind(addr).await?;

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("API server shut down gracefully");
        Ok(())
    }
}

/// Default shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
