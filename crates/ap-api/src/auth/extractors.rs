//! Axum extractors for authentication.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;

use ap_core::User;

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor for authenticated users.
///
/// This extractor will:
/// 1. Read the bearer token from the `Authorization` header
/// 2. Validate its signature and expiry
/// 3. Resolve the token's subject back to a stored identity
///
/// A missing header, a rejected token, and an unresolvable subject are one
/// observable outcome: 401. A resolved but disabled identity is 403 —
/// authentication succeeded, authorization is denied.
///
/// # Example
///
/// ```ignore
/// async fn protected_endpoint(
///     AuthenticatedUser(user): AuthenticatedUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct AuthenticatedUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

        let username = app_state.tokens.validate(token)?;

        let user = app_state
            .users
            .find_by_username(&username)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?
            .ok_or_else(|| {
                debug!(username = %username, "token subject no longer resolves");
                ApiError::Unauthorized("invalid or expired token".to_string())
            })?;

        if user.disabled {
            return Err(ApiError::AccountDisabled);
        }

        Ok(AuthenticatedUser(user))
    }
}
