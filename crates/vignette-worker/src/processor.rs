//! File-processing pipeline
//!
//! Sequential per-upload pipeline: store the original, download the
//! backend's canonical bytes into scratch space, derive a thumbnail, store
//! it under the derived key, and append a metadata record. No step is
//! retried here; every failure propagates to the caller with the offending
//! key. A metadata write failure after the thumbnail upload leaves an
//! orphaned thumbnail object for an external reconciliation sweep.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::fs;

use vignette_core::{AssetMetadataRecord, StorageBackend};
use vignette_processing::{ThumbnailTransform, TransformError};
use vignette_storage::{keys, Storage, StorageError};

use crate::metadata::{MetadataError, MetadataStore};

/// Pipeline errors. Each step surfaces its typed error directly.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("Scratch file error: {0}")]
    Scratch(#[from] std::io::Error),
}

/// Orchestrates original + thumbnail storage and metadata recording.
///
/// Backend-agnostic: holds one `dyn Storage` selected at construction and
/// never branches on its identity; the tag is metadata only.
pub struct FileProcessingService {
    storage: Arc<dyn Storage>,
    metadata: Arc<dyn MetadataStore>,
    thumbnailer: Arc<dyn ThumbnailTransform>,
    scratch_dir: PathBuf,
}

impl FileProcessingService {
    /// Create a new service. The scratch directory is created if absent.
    pub async fn new(
        storage: Arc<dyn Storage>,
        metadata: Arc<dyn MetadataStore>,
        thumbnailer: Arc<dyn ThumbnailTransform>,
        scratch_dir: impl Into<PathBuf>,
    ) -> Result<Self, ProcessError> {
        let scratch_dir = scratch_dir.into();
        fs::create_dir_all(&scratch_dir).await?;

        Ok(Self {
            storage,
            metadata,
            thumbnailer,
            scratch_dir,
        })
    }

    /// The identity tag of the bound backend, for reporting and display.
    pub fn storage_type(&self) -> StorageBackend {
        self.storage.backend_type()
    }

    /// Process one uploaded file.
    ///
    /// Stores the local file at `source_path` under `original_key`,
    /// generates a thumbnail from the stored bytes, stores it under the
    /// derived thumbnail key, and appends a metadata record, which is
    /// returned. Reprocessing an already-known original key overwrites both
    /// objects and appends a fresh record.
    ///
    /// Scratch files are removed on every exit path, success or failure.
    pub async fn process_upload(
        &self,
        source_path: &Path,
        original_key: &str,
        content_type: &str,
    ) -> Result<AssetMetadataRecord, ProcessError> {
        let start = std::time::Instant::now();

        if let Some(existing) = self.metadata.find_by_original_key(original_key).await? {
            tracing::info!(
                key = %original_key,
                previous_record = %existing.id,
                "Reprocessing known key, objects will be overwritten"
            );
        }

        // Step 1: store the original.
        self.storage
            .upload(source_path, original_key, content_type)
            .await?;
        tracing::info!(key = %original_key, "Original stored");

        // Step 2: download the just-stored original so the transform sees
        // the backend's canonical bytes, not the caller's local copy.
        // NamedTempFile gives a collision-resistant name and removes the
        // file on drop, on every exit path.
        let original_scratch = NamedTempFile::new_in(&self.scratch_dir)?;
        self.storage
            .download(original_key, original_scratch.path())
            .await?;

        // Step 3: derive the thumbnail bytes.
        let original_bytes = fs::read(original_scratch.path()).await?;
        let (thumbnail_bytes, thumbnail_content_type) = self
            .thumbnailer
            .transform(&original_bytes, content_type)
            .await?;
        drop(original_scratch);

        // Step 4: store the thumbnail under the derived key.
        let thumbnail_key = keys::derive_thumbnail_key(original_key);
        let thumbnail_scratch = NamedTempFile::new_in(&self.scratch_dir)?;
        fs::write(thumbnail_scratch.path(), &thumbnail_bytes).await?;
        self.storage
            .upload(
                thumbnail_scratch.path(),
                &thumbnail_key,
                &thumbnail_content_type,
            )
            .await?;
        drop(thumbnail_scratch);
        tracing::info!(key = %thumbnail_key, "Thumbnail stored");

        // Step 5: record metadata. A failure here leaves the thumbnail
        // object orphaned; that window is accepted, not retried.
        let record = AssetMetadataRecord::new(
            original_key,
            thumbnail_key,
            content_type,
            self.storage.backend_type(),
        );
        self.metadata.write(record.clone()).await?;

        tracing::info!(
            key = %original_key,
            thumbnail_key = %record.thumbnail_key,
            backend = %record.storage_backend,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Upload processed"
        );

        Ok(record)
    }
}
