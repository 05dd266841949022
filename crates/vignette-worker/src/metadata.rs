//! Asset metadata store
//!
//! One record per processed upload, keyed by original key. The store behind
//! this trait is an external capability; the in-memory implementation here
//! backs tests and single-process deployments.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use vignette_core::AssetMetadataRecord;

/// Metadata persistence errors
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Metadata write failed: {0}")]
    WriteFailed(String),

    /// Query-side storage failure. The in-memory store never fails a query;
    /// stores backed by external persistence report their read errors here.
    #[error("Metadata query failed: {0}")]
    QueryFailed(String),
}

/// Result type for metadata operations
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Store of asset metadata records.
///
/// Records are append-only; reprocessing an original key appends a new
/// record rather than mutating the old one.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Append a new record.
    async fn write(&self, record: AssetMetadataRecord) -> MetadataResult<()>;

    /// Return all known records. Ordering is implementation-defined unless
    /// the concrete store documents one. Fails with
    /// [`MetadataError::QueryFailed`] when the backing store cannot be read.
    async fn find_all(&self) -> MetadataResult<Vec<AssetMetadataRecord>>;

    /// Point lookup by original key. Absence is not an error. When multiple
    /// records exist for a key, the most recently written one is returned.
    /// Fails with [`MetadataError::QueryFailed`] when the backing store
    /// cannot be read.
    async fn find_by_original_key(
        &self,
        original_key: &str,
    ) -> MetadataResult<Option<AssetMetadataRecord>>;
}

/// In-memory metadata store. `find_all` returns records in insertion order.
#[derive(Default)]
pub struct InMemoryMetadataStore {
    records: RwLock<Vec<AssetMetadataRecord>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn write(&self, record: AssetMetadataRecord) -> MetadataResult<()> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn find_all(&self) -> MetadataResult<Vec<AssetMetadataRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_original_key(
        &self,
        original_key: &str,
    ) -> MetadataResult<Option<AssetMetadataRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .rev()
            .find(|r| r.original_key == original_key)
            .cloned())
    }
}
