//! Document store seam for record persistence.
//!
//! Provides the storage trait the record gateway is built on, together with
//! an in-memory implementation backed by a `RwLock<HashMap>`.

use crate::models::Record;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors surfaced by record storage and the gateway built on top of it.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record exists for the requested key.
    #[error("not found: {0}")]
    NotFound(String),
    /// A record with the same key already exists.
    #[error("already exists: {0}")]
    Duplicate(String),
    /// A record is missing one or more declared fields.
    #[error("incomplete record: {0}")]
    Incomplete(String),
    /// Storage-layer failure. Never retried here; propagates to the caller.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A keyed document collection for one record kind.
///
/// Each call is atomic for the single document it touches; no ordering is
/// guaranteed across calls. Concurrent inserts for the same key race down
/// to this per-document atomicity.
#[async_trait]
pub trait DocumentStore<R: Record>: Send + Sync {
    /// Looks up a record by key.
    async fn find(&self, key: i64) -> StoreResult<Option<R>>;

    /// Inserts a new record. Fails with [`StoreError::Duplicate`] if the
    /// key is already present.
    async fn insert(&self, record: &R) -> StoreResult<()>;

    /// Applies the supplied fields of `patch` to the record at `key`
    /// ("set" semantics). Returns whether a record was matched; an absent
    /// key matches nothing and writes nothing.
    async fn update(&self, key: i64, patch: &R) -> StoreResult<bool>;

    /// Removes the record at `key`, returning whether one existed.
    async fn remove(&self, key: i64) -> StoreResult<bool>;

    /// Returns every record in the collection, ordered by key.
    async fn all(&self) -> StoreResult<Vec<R>>;
}

/// In-memory [`DocumentStore`] implementation.
pub struct InMemoryStore<R> {
    records: Arc<RwLock<HashMap<i64, R>>>,
}

impl<R> InMemoryStore<R> {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<R> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> DocumentStore<R> for InMemoryStore<R> {
    async fn find(&self, key: i64) -> StoreResult<Option<R>> {
        let records = self.records.read().await;
        Ok(records.get(&key).cloned())
    }

    async fn insert(&self, record: &R) -> StoreResult<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.key()) {
            return Err(StoreError::Duplicate(format!(
                "{} {} already exists",
                R::KIND,
                record.key()
            )));
        }
        records.insert(record.key(), record.clone());
        Ok(())
    }

    async fn update(&self, key: i64, patch: &R) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        match records.get_mut(&key) {
            Some(existing) => {
                patch.merge_into(existing);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, key: i64) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        Ok(records.remove(&key).is_some())
    }

    async fn all(&self) -> StoreResult<Vec<R>> {
        let records = self.records.read().await;
        let mut results: Vec<R> = records.values().cloned().collect();
        results.sort_by_key(Record::key);
        Ok(results)
    }
}
