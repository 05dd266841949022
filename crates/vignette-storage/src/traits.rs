//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement.

use crate::StorageBackend;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// The file-processing pipeline works with any backend without coupling to
/// implementation details; the only backend-specific bit that escapes is the
/// identity tag recorded in metadata.
///
/// Each instance is bound to one namespace (bucket or root directory) at
/// construction; that binding is immutable for the instance's lifetime.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store the local file at `source_path` under `key` with the given
    /// content type, overwriting any existing object.
    ///
    /// Fails with `NotFound` if `source_path` does not exist and
    /// `UploadFailed` on transport or filesystem failure.
    async fn upload(&self, source_path: &Path, key: &str, content_type: &str)
        -> StorageResult<()>;

    /// Fetch the object at `key` and write it to `destination_path`,
    /// overwriting if present.
    ///
    /// Fails with `NotFound` if the key does not exist in the backend and
    /// `DownloadFailed` on transport or filesystem failure.
    async fn download(&self, key: &str, destination_path: &Path) -> StorageResult<()>;

    /// Delete the object at `key`.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check whether an object exists at `key`. Absence is `Ok(false)`.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get the storage backend type. Constant per instance.
    fn backend_type(&self) -> StorageBackend;
}
