//! Test doubles and fixtures for pipeline tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::Mutex;

use vignette_core::{AssetMetadataRecord, StorageBackend};
use vignette_storage::{Storage, StorageError, StorageResult};
use vignette_worker::metadata::{MetadataError, MetadataResult, MetadataStore};

/// In-memory storage double with switchable failure injection.
pub struct MockStorage {
    files: Mutex<HashMap<String, Vec<u8>>>,
    backend_type: StorageBackend,
    fail_downloads: bool,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            backend_type: StorageBackend::S3,
            fail_downloads: false,
        }
    }

    pub fn failing_downloads() -> Self {
        Self {
            fail_downloads: true,
            ..Self::new()
        }
    }

    /// Check if an object exists in the mock storage
    pub fn has_file(&self, key: &str) -> bool {
        self.files.lock().unwrap().contains_key(key)
    }

    /// Get object data (for test assertions)
    pub fn get_file(&self, key: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(key).cloned()
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn upload(
        &self,
        source_path: &Path,
        key: &str,
        _content_type: &str,
    ) -> StorageResult<()> {
        let data = tokio::fs::read(source_path)
            .await
            .map_err(|_| StorageError::NotFound(source_path.display().to_string()))?;
        self.files.lock().unwrap().insert(key.to_string(), data);
        Ok(())
    }

    async fn download(&self, key: &str, destination_path: &Path) -> StorageResult<()> {
        if self.fail_downloads {
            return Err(StorageError::DownloadFailed(
                "injected download failure".to_string(),
            ));
        }
        let data = self
            .files
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        tokio::fs::write(destination_path, data).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.files.lock().unwrap().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.files.lock().unwrap().contains_key(key))
    }

    fn backend_type(&self) -> StorageBackend {
        self.backend_type
    }
}

/// Metadata store whose writes always fail.
pub struct FailingMetadataStore;

#[async_trait]
impl MetadataStore for FailingMetadataStore {
    async fn write(&self, _record: AssetMetadataRecord) -> MetadataResult<()> {
        Err(MetadataError::WriteFailed(
            "injected write failure".to_string(),
        ))
    }

    async fn find_all(&self) -> MetadataResult<Vec<AssetMetadataRecord>> {
        Ok(Vec::new())
    }

    async fn find_by_original_key(
        &self,
        _original_key: &str,
    ) -> MetadataResult<Option<AssetMetadataRecord>> {
        Ok(None)
    }
}

/// Encode a small PNG fixture.
pub fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    let img = image::ImageBuffer::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 64u8])
    });
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
        .unwrap();
    buffer
}

/// Count of entries left in a directory.
pub fn dir_entry_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}
