//! PNG and JPEG encoding for export.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};

use crate::buffer::ImageBuffer;
use crate::error::EditError;

/// Output formats supported by export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Pick a format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, EditError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            _ => Err(EditError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Encode an image to PNG or JPEG bytes.
///
/// `jpeg_quality` is clamped to 1-100 and ignored for PNG.
///
/// # Errors
///
/// Returns `EditError::DegenerateGeometry` for an empty image,
/// `EditError::InvalidBuffer` for malformed pixel data and
/// `EditError::Encode` if the codec fails.
pub fn encode(image: &ImageBuffer, format: ImageFormat, jpeg_quality: u8) -> Result<Vec<u8>, EditError> {
    if image.width == 0 || image.height == 0 {
        return Err(EditError::DegenerateGeometry(format!(
            "cannot encode a {}x{} image",
            image.width, image.height
        )));
    }

    let expected = image.width as usize * image.height as usize * 3;
    if image.pixels.len() != expected {
        return Err(EditError::InvalidBuffer {
            expected,
            actual: image.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let result = match format {
        ImageFormat::Png => PngEncoder::new(&mut buffer).write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgb8,
        ),
        ImageFormat::Jpeg => JpegEncoder::new_with_quality(&mut buffer, jpeg_quality.clamp(1, 100))
            .write_image(&image.pixels, image.width, image.height, ExtendedColorType::Rgb8),
    };
    result.map_err(|e| EditError::Encode(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Save an image to `path`, choosing the format from the extension.
///
/// # Errors
///
/// Returns `EditError::UnsupportedFormat` for unknown extensions and
/// `EditError::InvalidFilePath` if the file cannot be written.
pub fn save(path: impl AsRef<Path>, image: &ImageBuffer, jpeg_quality: u8) -> Result<(), EditError> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    let bytes = encode(image, format, jpeg_quality)?;

    std::fs::write(path, &bytes).map_err(|e| EditError::InvalidFilePath {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::info!(path = %path.display(), ?format, bytes = bytes.len(), "image saved");
    Ok(())
}
