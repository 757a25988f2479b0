//! Remote access layer.
//!
//! [`RecordStore`] is the boundary to the hosted document store. Every read
//! returns the store's authoritative copy; every write returns the record as
//! stored after the write. Writes check for a token before any request is
//! made. Nothing here retries.

mod error;
mod http;
mod query;

use async_trait::async_trait;

use crate::record::{NewRecord, Record, RecordPatch};

pub use error::StoreError;
pub use http::HttpStore;

/// Operations on the remote record collection.
///
/// Lists are ordered by creation time, newest first.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Documents that do not match the record schema are left out of lists.
    async fn list_all(&self) -> Result<Vec<Record>, StoreError>;

    /// Fails with [`StoreError::NotFound`] when no record has this identity.
    async fn get_by_id(&self, id: &str) -> Result<Record, StoreError>;

    /// Records whose identity is in `ids`. Unknown identities are skipped.
    async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<Record>, StoreError>;

    /// Substring match on name, SKU and category, as the store defines it.
    async fn search(&self, text: &str) -> Result<Vec<Record>, StoreError>;

    /// Stores a new record; identity and timestamps come back from the store.
    async fn create(&self, payload: &NewRecord) -> Result<Record, StoreError>;

    /// Sets only the fields present in `patch`.
    async fn update(&self, id: &str, patch: &RecordPatch) -> Result<Record, StoreError>;

    /// Fails with [`StoreError::NotFound`] when the record is already gone.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
