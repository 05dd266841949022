//! Configuration module
//!
//! Worker configuration loaded from environment variables. Every value a
//! backend needs is passed to its constructor explicitly; backends never read
//! ambient environment state themselves.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::storage_types::StorageBackend;

const STORAGE_TIMEOUT_SECS: u64 = 30;
const THUMBNAIL_MAX_WIDTH: u32 = 300;
const THUMBNAIL_MAX_HEIGHT: u32 = 300;

/// Parse an optional setting value, falling back to `default` only when the
/// variable is absent. A present-but-malformed value is a configuration
/// error, same as a malformed `STORAGE_BACKEND`.
fn parse_setting<T>(name: &str, value: Option<String>, default: T) -> Result<T, anyhow::Error>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid {}: {:?}: {}", name, raw, e)),
        None => Ok(default),
    }
}

/// Worker configuration
#[derive(Clone, Debug)]
pub struct WorkerConfig {
    pub storage_backend: Option<StorageBackend>,
    // S3 configuration
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers
    pub aws_region: Option<String>,
    // Local storage configuration
    pub local_storage_path: Option<String>,
    // Processing configuration
    pub scratch_dir: PathBuf,
    pub storage_timeout_secs: u64,
    pub thumbnail_max_width: u32,
    pub thumbnail_max_height: u32,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            storage_backend: None,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            aws_region: None,
            local_storage_path: None,
            scratch_dir: env::temp_dir(),
            storage_timeout_secs: STORAGE_TIMEOUT_SECS,
            thumbnail_max_width: THUMBNAIL_MAX_WIDTH,
            thumbnail_max_height: THUMBNAIL_MAX_HEIGHT,
        }
    }
}

impl WorkerConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => Some(value.parse::<StorageBackend>()?),
            Err(_) => None,
        };

        let scratch_dir = env::var("SCRATCH_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir());

        let storage_timeout_secs = parse_setting(
            "STORAGE_TIMEOUT_SECS",
            env::var("STORAGE_TIMEOUT_SECS").ok(),
            STORAGE_TIMEOUT_SECS,
        )?;

        let thumbnail_max_width = parse_setting(
            "THUMBNAIL_MAX_WIDTH",
            env::var("THUMBNAIL_MAX_WIDTH").ok(),
            THUMBNAIL_MAX_WIDTH,
        )?;

        let thumbnail_max_height = parse_setting(
            "THUMBNAIL_MAX_HEIGHT",
            env::var("THUMBNAIL_MAX_HEIGHT").ok(),
            THUMBNAIL_MAX_HEIGHT,
        )?;

        Ok(Self {
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            aws_region: env::var("AWS_REGION").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            scratch_dir,
            storage_timeout_secs,
            thumbnail_max_width,
            thumbnail_max_height,
        })
    }

    // Convenience getters for common fields
    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.aws_region.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.local_storage_path.as_deref()
    }

    pub fn storage_timeout(&self) -> Duration {
        Duration::from_secs(self.storage_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WorkerConfig::default();
        assert!(config.storage_backend().is_none());
        assert_eq!(config.storage_timeout(), Duration::from_secs(30));
        assert_eq!(config.thumbnail_max_width, 300);
        assert_eq!(config.thumbnail_max_height, 300);
        assert_eq!(config.scratch_dir, env::temp_dir());
    }

    #[test]
    fn test_parse_setting_defaults_when_unset() {
        let value = parse_setting("STORAGE_TIMEOUT_SECS", None, 30u64).unwrap();
        assert_eq!(value, 30);
    }

    #[test]
    fn test_parse_setting_accepts_valid_values() {
        let value =
            parse_setting("STORAGE_TIMEOUT_SECS", Some("45".to_string()), 30u64).unwrap();
        assert_eq!(value, 45);
    }

    #[test]
    fn test_parse_setting_rejects_malformed_values() {
        let result = parse_setting("STORAGE_TIMEOUT_SECS", Some("abc".to_string()), 30u64);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("STORAGE_TIMEOUT_SECS"));
        assert!(err.contains("abc"));
    }

    #[test]
    fn test_getters_borrow_optional_fields() {
        let config = WorkerConfig {
            storage_backend: Some(StorageBackend::S3),
            s3_bucket: Some("assets".to_string()),
            s3_region: Some("eu-west-1".to_string()),
            ..WorkerConfig::default()
        };
        assert_eq!(config.storage_backend(), Some(StorageBackend::S3));
        assert_eq!(config.s3_bucket(), Some("assets"));
        assert_eq!(config.s3_region(), Some("eu-west-1"));
        assert!(config.local_storage_path().is_none());
    }
}
