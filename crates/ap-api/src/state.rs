//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use ap_core::{
    Asset, InMemoryStore, InMemoryUserStore, PerformanceMetric, RecordGateway, TokenSigner,
    UserStore, DEFAULT_TOKEN_TTL,
};

/// Shared application state.
///
/// Store dependencies are constructed by the caller and injected here;
/// nothing in the API reaches for ambient globals.
#[derive(Clone)]
pub struct AppState {
    /// Gateway over the asset collection.
    pub assets: RecordGateway<Asset>,
    /// Gateway over the performance-metric collection.
    pub metrics: RecordGateway<PerformanceMetric>,
    /// Identity store, read-only from the API's perspective.
    pub users: Arc<dyn UserStore>,
    /// Bearer token signer/validator.
    pub tokens: Arc<TokenSigner>,
    /// Lifetime of newly issued tokens.
    pub token_ttl: Duration,
}

impl AppState {
    /// Creates application state over the given stores.
    pub fn new(
        assets: RecordGateway<Asset>,
        metrics: RecordGateway<PerformanceMetric>,
        users: Arc<dyn UserStore>,
        tokens: Arc<TokenSigner>,
    ) -> Self {
        Self {
            assets,
            metrics,
            users,
            tokens,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Creates state backed entirely by in-memory stores.
    pub fn in_memory(token_secret: &[u8]) -> Self {
        Self::new(
            RecordGateway::new(Arc::new(InMemoryStore::new())),
            RecordGateway::new(Arc::new(InMemoryStore::new())),
            Arc::new(InMemoryUserStore::new()),
            Arc::new(TokenSigner::new(token_secret)),
        )
    }

    /// Overrides the issued-token lifetime.
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}
