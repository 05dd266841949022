//! Vignette Processing Library
//!
//! Thumbnail generation for uploaded assets. The pipeline treats the
//! transform as bytes-in, bytes-out; this crate provides the trait and the
//! `image`-backed implementation.

pub mod thumbnail;

pub use thumbnail::{ImageThumbnailer, ThumbnailTransform, TransformError};
