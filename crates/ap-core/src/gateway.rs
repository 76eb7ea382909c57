//! Record gateway: the uniform create/read/update/delete contract over a
//! keyed document collection.
//!
//! The gateway owns record lifecycle invariants (key uniqueness on create,
//! full-schema completeness, guarded reads); the [`DocumentStore`] beneath
//! it only moves documents.

use std::sync::Arc;

use crate::models::Record;
use crate::store::{DocumentStore, StoreError, StoreResult};

/// Gateway over one record kind's document collection.
pub struct RecordGateway<R: Record> {
    store: Arc<dyn DocumentStore<R>>,
}

impl<R: Record> Clone for RecordGateway<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<R: Record> RecordGateway<R> {
    /// Creates a gateway over the given store.
    pub fn new(store: Arc<dyn DocumentStore<R>>) -> Self {
        Self { store }
    }

    /// Persists a new record.
    ///
    /// Fails with [`StoreError::Duplicate`] when the key is taken and with
    /// [`StoreError::Incomplete`] unless every declared field is supplied.
    /// The existence check and the insert are separate store calls;
    /// concurrent creates for the same key race down to the store's own
    /// per-document atomicity.
    pub async fn create(&self, record: &R) -> StoreResult<()> {
        if self.store.find(record.key()).await?.is_some() {
            return Err(StoreError::Duplicate(format!(
                "{} {} already exists",
                R::KIND,
                record.key()
            )));
        }
        if !record.is_complete() {
            return Err(StoreError::Incomplete(format!(
                "{} {} must supply every field",
                R::KIND,
                record.key()
            )));
        }
        self.store.insert(record).await
    }

    /// Returns the record at `key`, or [`StoreError::NotFound`].
    ///
    /// The returned value carries schema fields only; internal storage
    /// identifiers never leave the store layer.
    pub async fn read(&self, key: i64) -> StoreResult<R> {
        self.store
            .find(key)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("{} {} not found", R::KIND, key)))
    }

    /// Merges the supplied fields of `patch` into the stored record.
    ///
    /// Succeeds as a no-op when the key does not exist; no record is
    /// created. This permissive behavior is part of the contract.
    pub async fn update(&self, patch: &R) -> StoreResult<()> {
        self.store.update(patch.key(), patch).await.map(|_| ())
    }

    /// Removes the record at `key`. Idempotent: succeeds whether or not a
    /// record existed.
    pub async fn delete(&self, key: i64) -> StoreResult<()> {
        self.store.remove(key).await.map(|_| ())
    }

    /// Returns the full collection, ordered by key.
    pub async fn list_all(&self) -> StoreResult<Vec<R>> {
        self.store.all().await
    }
}
