//! Token issuance route.

use axum::{extract::State, routing::post, Form, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use ap_core::authenticate;

use crate::error::{ApiError, ErrorResponse};
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenRequest {
    /// Username to authenticate.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

/// Issued bearer token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// The signed access token.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
}

/// Creates the auth routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/token", post(issue_token))
}

/// Exchanges a username/password pair for a bearer token.
///
/// Unknown usernames and wrong passwords yield the same 401 response.
#[utoipa::path(
    post,
    path = "/token",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid username or password", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn issue_token(
    State(state): State<AppState>,
    Form(form): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = authenticate(state.users.as_ref(), &form.username, &form.password)
        .await
        .map_err(|e| {
            warn!(username = %form.username, "login rejected");
            ApiError::from(e)
        })?;

    let access_token = state.tokens.issue(&user.username, state.token_ttl)?;

    info!(username = %user.username, "issued access token");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
