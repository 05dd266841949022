//! Thumbnail key derivation for storage backends.
//!
//! A thumbnail key is `{stem}_thumbnail{extension}` where stem and extension
//! split the key's final path segment on its last dot. Both directions live
//! here so the naming convention has exactly one definition.

/// Marker inserted before the extension of a derived thumbnail key.
const THUMBNAIL_MARKER: &str = "_thumbnail";

/// Returns the byte offset where the key's final path segment starts.
fn filename_start(key: &str) -> usize {
    key.rfind('/').map(|i| i + 1).unwrap_or(0)
}

/// Derive the canonical thumbnail key for an original key.
///
/// The marker is inserted before the final extension of the last path
/// segment; a key without an extension gets the marker appended. Dots in
/// directory segments are not extension separators.
///
/// Passing an empty key is a programming error.
pub fn derive_thumbnail_key(original_key: &str) -> String {
    debug_assert!(!original_key.is_empty(), "storage key must not be empty");

    let start = filename_start(original_key);
    match original_key[start..].rfind('.') {
        Some(dot) => {
            let split = start + dot;
            format!(
                "{}{}{}",
                &original_key[..split],
                THUMBNAIL_MARKER,
                &original_key[split..]
            )
        }
        None => format!("{}{}", original_key, THUMBNAIL_MARKER),
    }
}

/// Recover the original key from a thumbnail key.
///
/// Strips the `_thumbnail` marker only when it sits immediately before the
/// final extension (or at the end of an extensionless key). Keys without the
/// marker in that position are returned unchanged, so calling this on a
/// non-thumbnail key is a no-op rather than a corruption risk. Occurrences
/// of the marker elsewhere in the key are left untouched.
pub fn extract_original_key(thumbnail_key: &str) -> String {
    let start = filename_start(thumbnail_key);
    let filename = &thumbnail_key[start..];

    let marker_end = match filename.rfind('.') {
        Some(dot) => start + dot,
        None => thumbnail_key.len(),
    };

    if thumbnail_key[..marker_end].ends_with(THUMBNAIL_MARKER) {
        let marker_start = marker_end - THUMBNAIL_MARKER.len();
        format!(
            "{}{}",
            &thumbnail_key[..marker_start],
            &thumbnail_key[marker_end..]
        )
    } else {
        thumbnail_key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_inserts_marker_before_extension() {
        assert_eq!(derive_thumbnail_key("image.jpg"), "image_thumbnail.jpg");
        assert_eq!(
            derive_thumbnail_key("media/photo.png"),
            "media/photo_thumbnail.png"
        );
    }

    #[test]
    fn test_derive_appends_marker_without_extension() {
        assert_eq!(derive_thumbnail_key("image"), "image_thumbnail");
        assert_eq!(derive_thumbnail_key("media/image"), "media/image_thumbnail");
    }

    #[test]
    fn test_derive_ignores_dots_in_directory_segments() {
        assert_eq!(
            derive_thumbnail_key("v1.2/photo"),
            "v1.2/photo_thumbnail"
        );
        assert_eq!(
            derive_thumbnail_key("v1.2/photo.jpg"),
            "v1.2/photo_thumbnail.jpg"
        );
    }

    #[test]
    fn test_extract_strips_marker_before_extension() {
        assert_eq!(extract_original_key("image_thumbnail.jpg"), "image.jpg");
        assert_eq!(
            extract_original_key("media/photo_thumbnail.png"),
            "media/photo.png"
        );
        assert_eq!(extract_original_key("image_thumbnail"), "image");
    }

    #[test]
    fn test_extract_returns_non_thumbnail_keys_unchanged() {
        assert_eq!(extract_original_key("image.jpg"), "image.jpg");
        assert_eq!(extract_original_key("media/photo.png"), "media/photo.png");
        assert_eq!(extract_original_key("plain"), "plain");
    }

    #[test]
    fn test_extract_leaves_marker_elsewhere_untouched() {
        assert_eq!(
            extract_original_key("my_thumbnail_gallery/photo.jpg"),
            "my_thumbnail_gallery/photo.jpg"
        );
        assert_eq!(
            extract_original_key("a_thumbnail_b.jpg"),
            "a_thumbnail_b.jpg"
        );
    }

    #[test]
    fn test_round_trip_for_non_thumbnail_keys() {
        for key in [
            "image.jpg",
            "photo.png",
            "media/2024/shot.webp",
            "no_extension",
            "v1.2/archive/frame",
            "my_thumbnail_gallery/photo.jpg",
        ] {
            assert_eq!(extract_original_key(&derive_thumbnail_key(key)), key);
        }
    }

    #[test]
    fn test_extract_is_idempotent() {
        for key in ["image_thumbnail.jpg", "image.jpg", "media/photo_thumbnail"] {
            let once = extract_original_key(key);
            assert_eq!(extract_original_key(&once), once);
        }
    }
}
