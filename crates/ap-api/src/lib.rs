//! # ap-api
//!
//! REST API server for Asset Pulse.
//!
//! This crate provides the HTTP surface: bearer-token issuance, asset and
//! performance-metric CRUD, and the summary-statistics endpoint.

pub mod auth;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{ApiServer, ApiServerConfig};
pub use state::AppState;
