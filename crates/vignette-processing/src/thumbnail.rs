//! Thumbnail transform: bytes in, resized bytes out.

use async_trait::async_trait;
use bytes::Bytes;
use image::GenericImageView;
use std::io::Cursor;
use thiserror::Error;

/// Thumbnail transform errors
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode thumbnail: {0}")]
    Encode(String),

    #[error("Transform worker failed: {0}")]
    Internal(String),
}

/// Thumbnail derivation for uploaded assets.
///
/// The pipeline treats implementations as opaque: raw bytes and a content
/// type in, resized bytes and an output content type out.
#[async_trait]
pub trait ThumbnailTransform: Send + Sync {
    async fn transform(
        &self,
        data: &[u8],
        content_type: &str,
    ) -> Result<(Bytes, String), TransformError>;
}

/// Thumbnail generator backed by the `image` crate.
///
/// Produces an aspect-preserving thumbnail bounded by the configured
/// dimensions and re-encodes in the source format.
pub struct ImageThumbnailer {
    max_width: u32,
    max_height: u32,
}

impl ImageThumbnailer {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// Detect image format from content type
    fn detect_format(content_type: &str) -> image::ImageFormat {
        match content_type {
            "image/jpeg" | "image/jpg" => image::ImageFormat::Jpeg,
            "image/png" => image::ImageFormat::Png,
            "image/gif" => image::ImageFormat::Gif,
            "image/webp" => image::ImageFormat::WebP,
            _ => image::ImageFormat::Jpeg,
        }
    }

    fn output_content_type(format: image::ImageFormat) -> &'static str {
        match format {
            image::ImageFormat::Png => "image/png",
            image::ImageFormat::Gif => "image/gif",
            image::ImageFormat::WebP => "image/webp",
            _ => "image/jpeg",
        }
    }
}

#[async_trait]
impl ThumbnailTransform for ImageThumbnailer {
    async fn transform(
        &self,
        data: &[u8],
        content_type: &str,
    ) -> Result<(Bytes, String), TransformError> {
        let format = Self::detect_format(content_type);
        let max_width = self.max_width;
        let max_height = self.max_height;
        let data = data.to_vec();

        // Image decode/resize is CPU-bound; run off the async pool so it
        // does not stall other tasks.
        let result = tokio::task::spawn_blocking(move || {
            let cursor = Cursor::new(&data);
            let img = image::ImageReader::new(cursor)
                .with_guessed_format()
                .map_err(|e| TransformError::Decode(e.to_string()))?
                .decode()
                .map_err(|e| TransformError::Decode(e.to_string()))?;

            let (src_width, src_height) = img.dimensions();
            let resized = img.thumbnail(max_width, max_height);
            let (width, height) = resized.dimensions();

            let estimated_size = (width * height * 3) as usize;
            let mut buffer = Vec::with_capacity(estimated_size);
            let mut cursor = Cursor::new(&mut buffer);
            resized
                .write_to(&mut cursor, format)
                .map_err(|e| TransformError::Encode(e.to_string()))?;

            tracing::debug!(
                src_width,
                src_height,
                width,
                height,
                size_bytes = buffer.len(),
                "Thumbnail generated"
            );

            Ok(Bytes::from(buffer))
        })
        .await
        .map_err(|e| TransformError::Internal(e.to_string()))??;

        Ok((result, Self::output_content_type(format).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn png_fixture(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128u8])
        });
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[tokio::test]
    async fn test_transform_bounds_dimensions() {
        let thumbnailer = ImageThumbnailer::new(16, 16);
        let data = png_fixture(64, 48);

        let (out, content_type) = thumbnailer.transform(&data, "image/png").await.unwrap();
        assert_eq!(content_type, "image/png");

        let thumb = image::load_from_memory(&out).unwrap();
        let (w, h) = thumb.dimensions();
        assert!(w <= 16 && h <= 16);
        assert!(w > 0 && h > 0);
    }

    #[tokio::test]
    async fn test_transform_preserves_source_format() {
        let thumbnailer = ImageThumbnailer::new(32, 32);
        let data = png_fixture(40, 40);

        let (out, content_type) = thumbnailer.transform(&data, "image/png").await.unwrap();
        assert_eq!(content_type, "image/png");
        assert_eq!(
            image::guess_format(&out).unwrap(),
            image::ImageFormat::Png
        );
    }

    #[tokio::test]
    async fn test_transform_rejects_garbage_bytes() {
        let thumbnailer = ImageThumbnailer::new(16, 16);
        let result = thumbnailer.transform(b"not an image", "image/png").await;
        assert!(matches!(result, Err(TransformError::Decode(_))));
    }
}
