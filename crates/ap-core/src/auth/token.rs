//! Bearer token issuance and validation.
//!
//! Tokens are self-contained HS256-signed artifacts carrying a subject and
//! an expiry instant. Validation is stateless: nothing is persisted between
//! issue and validate.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Token lifetime used when the caller supplies no other value.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Token errors.
///
/// Every validation failure collapses into [`TokenError::Invalid`]: bad
/// signature, malformed payload, expiry, and a missing subject are not
/// distinguishable to the caller, so rejected tokens leak nothing about
/// which check failed.
#[derive(Error, Debug)]
pub enum TokenError {
    /// The token was rejected.
    #[error("token rejected")]
    Invalid,

    /// Signing a new token failed.
    #[error("failed to sign token: {0}")]
    Signing(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    exp: u64,
}

/// Issues and validates signed bearer tokens with a shared secret.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    /// Creates a signer for the given shared secret.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked manually below with strict comparison and no
        // leeway, so a zero-ttl token is already expired when validated.
        validation.validate_exp = false;
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issues a token binding `username` until `ttl` from now.
    pub fn issue(&self, username: &str, ttl: Duration) -> Result<String, TokenError> {
        let claims = Claims {
            sub: Some(username.to_owned()),
            exp: unix_now().saturating_add(ttl.as_secs()),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Validates a token and returns its subject.
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            debug!(error = %e, "bearer token rejected");
            TokenError::Invalid
        })?;

        if data.claims.exp <= unix_now() {
            debug!("bearer token expired");
            return Err(TokenError::Invalid);
        }

        match data.claims.sub {
            Some(sub) if !sub.is_empty() => Ok(sub),
            _ => {
                debug!("bearer token has no subject");
                Err(TokenError::Invalid)
            }
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
