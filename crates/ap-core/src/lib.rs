//! # ap-core
//!
//! Core domain logic for Asset Pulse.
//!
//! This crate provides the asset and performance-metric data models, the
//! record gateway and its document-store seam, credential verification and
//! bearer-token handling, and the summary statistics engine.

pub mod auth;
pub mod gateway;
pub mod models;
pub mod seed;
pub mod stats;
pub mod store;

pub use gateway::RecordGateway;
pub use models::{Asset, PerformanceMetric, Record};
pub use stats::{summarize, HighFailureAsset, SummaryReport};
pub use store::{DocumentStore, InMemoryStore, StoreError, StoreResult};

// Auth exports
pub use auth::password::{hash_password, verify_password, PasswordError};
pub use auth::token::{TokenError, TokenSigner, DEFAULT_TOKEN_TTL};
pub use auth::{authenticate, CredentialError, InMemoryUserStore, User, UserStore};
pub use seed::ensure_default_user;
