//! Vignette Worker Library
//!
//! The file-processing pipeline: given an uploaded file, store the original,
//! derive and store a thumbnail, and record metadata linking the two.

pub mod metadata;
pub mod processor;

pub use metadata::{InMemoryMetadataStore, MetadataError, MetadataStore};
pub use processor::{FileProcessingService, ProcessError};
