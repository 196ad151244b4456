//! PNG and JPEG decoding for import.

use std::io::Cursor;
use std::path::Path;

use image::ImageReader;

use super::orientation::read_orientation;
use crate::buffer::ImageBuffer;
use crate::error::EditError;

/// Decode encoded image bytes into an upright RGB buffer.
///
/// The format is guessed from the content, so the file extension does not
/// matter. EXIF orientation, when present, is applied.
///
/// # Errors
///
/// Returns `EditError::Decode` if the bytes are not a supported image and
/// `EditError::DegenerateGeometry` if the image has no pixels.
pub fn decode(bytes: &[u8]) -> Result<ImageBuffer, EditError> {
    if bytes.is_empty() {
        return Err(EditError::Decode("empty input".to_string()));
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| EditError::Decode(e.to_string()))?;
    let img = reader
        .decode()
        .map_err(|e| EditError::Decode(e.to_string()))?;

    let orientation = read_orientation(bytes);
    let rgb = orientation.apply(img).into_rgb8();

    let buffer = ImageBuffer::from_rgb_image(rgb);
    if buffer.is_empty() {
        return Err(EditError::DegenerateGeometry(format!(
            "decoded image is {}x{}",
            buffer.width, buffer.height
        )));
    }

    tracing::debug!(
        width = buffer.width,
        height = buffer.height,
        ?orientation,
        "image decoded"
    );
    Ok(buffer)
}

/// Read and decode an image file.
///
/// # Errors
///
/// Returns `EditError::InvalidFilePath` if the file cannot be read and the
/// errors of [`decode`] otherwise.
pub fn load(path: impl AsRef<Path>) -> Result<ImageBuffer, EditError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| EditError::InvalidFilePath {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    decode(&bytes)
}
