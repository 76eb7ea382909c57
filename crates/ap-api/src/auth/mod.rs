//! Authentication for the API.
//!
//! Every protected route passes through the [`AuthenticatedUser`]
//! extractor before any entity-kind logic runs.

pub mod extractors;

pub use extractors::AuthenticatedUser;
