//! Vignette Storage Library
//!
//! This crate provides the storage abstraction and implementations for
//! Vignette. It includes the Storage trait and implementations for S3 and
//! local filesystem.
//!
//! # Thumbnail key convention
//!
//! A thumbnail key is derived from its original key by inserting the literal
//! `_thumbnail` marker immediately before the final extension:
//!
//! - `photo.png` → `photo_thumbnail.png`
//! - `reports/2024/chart` → `reports/2024/chart_thumbnail`
//!
//! The convention is a de facto wire contract: external tools locate a
//! thumbnail from an original key (and back) by applying the same rule.
//! Key derivation is centralized in the `keys` module so all backends and
//! callers stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{derive_thumbnail_key, extract_original_key};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use vignette_core::StorageBackend;
