//! Image dimension probing.
//!
//! Thin wrapper around the `image` crate. All decode failures (corrupt
//! data, unsupported format, empty input) come back as [`DecodeError`];
//! nothing escapes this boundary as a panic. Stateless and safe to call
//! from concurrent handler invocations.

use image::GenericImageView;
use thiserror::Error;

/// A payload that could not be interpreted as an image.
#[derive(Debug, Error)]
#[error("image decode failed: {0}")]
pub struct DecodeError(#[from] image::ImageError);

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Decodes an image container format and returns its pixel dimensions.
pub fn probe(bytes: &[u8]) -> Result<Dimensions, DecodeError> {
    let img = image::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();
    Ok(Dimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(width, height);
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_probe_valid_png() {
        let bytes = png_bytes(3, 2);
        let dims = probe(&bytes).unwrap();
        assert_eq!(dims, Dimensions { width: 3, height: 2 });
    }

    #[test]
    fn test_probe_garbage_fails() {
        let result = probe(b"definitely not an image");
        assert!(result.is_err());
    }

    #[test]
    fn test_probe_empty_input_fails() {
        let result = probe(&[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_probe_truncated_png_fails() {
        let bytes = png_bytes(3, 2);
        let result = probe(&bytes[..8]);
        assert!(result.is_err());
    }
}
