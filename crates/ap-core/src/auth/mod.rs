//! Authentication types for Asset Pulse.
//!
//! This module provides:
//! - The [`User`] identity record and the read-only [`UserStore`] seam
//! - Credential verification ([`authenticate`])
//! - Password hashing utilities
//! - Bearer token issuance and validation

pub mod password;
pub mod token;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

pub use password::{hash_password, verify_password, PasswordError};
pub use token::{TokenError, TokenSigner, DEFAULT_TOKEN_TTL};

/// A provisioned identity.
///
/// Identities are created out-of-band (there is no registration endpoint)
/// and are read-only to the rest of the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Username for login (unique key).
    pub username: String,
    /// Email address.
    pub email: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the account is disabled.
    pub disabled: bool,
}

impl User {
    /// Creates an enabled user with the given credentials.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: None,
            display_name: None,
            password_hash: password_hash.into(),
            disabled: false,
        }
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

/// Credential verification errors.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// No identity exists for the username.
    #[error("unknown user")]
    UnknownUser,

    /// The password did not match the stored hash.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Identity store failure.
    #[error("credential store error: {0}")]
    Store(String),
}

/// Read-mostly mapping from username to identity.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up an identity by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CredentialError>;

    /// Inserts a provisioned identity. Used only by out-of-band seeding.
    async fn insert(&self, user: &User) -> Result<(), CredentialError>;

    /// Whether any identity exists at all.
    async fn any_exist(&self) -> Result<bool, CredentialError>;
}

/// In-memory [`UserStore`] implementation.
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserStore {
    /// Creates a new empty user store.
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CredentialError> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), CredentialError> {
        let mut users = self.users.write().await;
        users.insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn any_exist(&self) -> Result<bool, CredentialError> {
        let users = self.users.read().await;
        Ok(!users.is_empty())
    }
}

/// Verifies a username/password pair against the identity store.
///
/// Pure read and compare: no side effects on success or failure. Unknown
/// usernames and wrong passwords are distinct outcomes here; the transport
/// layer is expected to present them identically.
pub async fn authenticate(
    store: &dyn UserStore,
    username: &str,
    password: &str,
) -> Result<User, CredentialError> {
    let user = store
        .find_by_username(username)
        .await?
        .ok_or(CredentialError::UnknownUser)?;

    match verify_password(password, &user.password_hash) {
        Ok(true) => Ok(user),
        Ok(false) => Err(CredentialError::InvalidCredentials),
        Err(e) => Err(CredentialError::Store(e.to_string())),
    }
}
