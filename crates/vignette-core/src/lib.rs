//! Vignette Core Library
//!
//! This crate provides the domain types shared across all Vignette components:
//! the storage backend identity, the asset metadata record, and worker
//! configuration.

pub mod config;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::WorkerConfig;
pub use models::AssetMetadataRecord;
pub use storage_types::StorageBackend;
