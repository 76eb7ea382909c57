//! Identity seeding.
//!
//! Identities are provisioned out-of-band; this module covers first-run
//! bootstrap so a fresh deployment has a usable login.

use rand::Rng;
use tracing::{info, warn};

use crate::auth::{hash_password, CredentialError, User, UserStore};

/// Ensures a default `admin` identity exists in the user store.
///
/// If no identities exist, creates one with:
/// - Username: `admin`
/// - Email: `admin@localhost`
/// - Password: from `AP_ADMIN_PASSWORD`, or randomly generated
///
/// Returns `Ok(Some(password))` when a new identity was created (so the
/// caller can display a generated password once), `Ok(None)` when
/// identities already exist.
pub async fn ensure_default_user(
    store: &dyn UserStore,
) -> Result<Option<String>, CredentialError> {
    if store.any_exist().await? {
        info!("identities already provisioned, skipping seed");
        return Ok(None);
    }

    let password = std::env::var("AP_ADMIN_PASSWORD").ok().unwrap_or_else(|| {
        warn!("AP_ADMIN_PASSWORD not set, generated a random admin password");
        generate_password()
    });

    let password_hash = hash_password(&password).map_err(|e| CredentialError::Store(e.to_string()))?;

    let admin = User::new("admin", password_hash).with_email("admin@localhost");
    store.insert(&admin).await?;

    info!("created default identity: admin");

    Ok(Some(password))
}

/// Generates a 16-character random password with at least one character
/// from each class.
fn generate_password() -> String {
    const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    const DIGITS: &[u8] = b"0123456789";
    const SPECIAL: &[u8] = b"!@#$%^&*";

    let mut rng = rand::thread_rng();
    let mut password = Vec::with_capacity(16);

    password.push(UPPER[rng.gen_range(0..UPPER.len())]);
    password.push(LOWER[rng.gen_range(0..LOWER.len())]);
    password.push(DIGITS[rng.gen_range(0..DIGITS.len())]);
    password.push(SPECIAL[rng.gen_range(0..SPECIAL.len())]);

    let all: Vec<u8> = [UPPER, LOWER, DIGITS, SPECIAL].concat();
    for _ in 0..12 {
        password.push(all[rng.gen_range(0..all.len())]);
    }

    String::from_utf8(password).unwrap_or_else(|_| "change-me-now!1A".to_string())
}
