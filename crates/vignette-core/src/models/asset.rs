use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage_types::StorageBackend;

/// Metadata record linking an original asset to its thumbnail.
///
/// Created once per successfully processed upload and never mutated
/// afterwards. Reprocessing the same original key appends a fresh record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadataRecord {
    pub id: Uuid,
    pub original_key: String,
    pub thumbnail_key: String,
    pub content_type: String,
    pub storage_backend: StorageBackend,
    pub created_at: DateTime<Utc>,
}

impl AssetMetadataRecord {
    pub fn new(
        original_key: impl Into<String>,
        thumbnail_key: impl Into<String>,
        content_type: impl Into<String>,
        storage_backend: StorageBackend,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            original_key: original_key.into(),
            thumbnail_key: thumbnail_key.into(),
            content_type: content_type.into(),
            storage_backend,
            created_at: Utc::now(),
        }
    }
}
