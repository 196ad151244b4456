//! Display-time resampling for zoom.
//!
//! Zoom never touches the stored buffer. The editor resamples a copy of the
//! working buffer each time it builds a display frame.

use serde::{Deserialize, Serialize};

use crate::buffer::ImageBuffer;
use crate::error::EditError;
use crate::geometry::Size;

/// Filter type for display resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    /// Nearest neighbor interpolation (fastest, blocky when zoomed in).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl ResampleFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResampleFilter::Nearest => image::imageops::FilterType::Nearest,
            ResampleFilter::Bilinear => image::imageops::FilterType::Triangle,
            ResampleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Size of a `size` image displayed at `zoom`.
///
/// Each dimension is truncated and never drops below one pixel.
pub fn zoomed_size(size: Size, zoom: f64) -> Size {
    let scale = |v: u32| ((v as f64 * zoom) as u32).max(1);
    Size::new(scale(size.width), scale(size.height))
}

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `EditError::DegenerateGeometry` for a zero target size and
/// `EditError::InvalidBuffer` if the source pixel data is malformed.
pub fn resize(image: &ImageBuffer, target: Size, filter: ResampleFilter) -> Result<ImageBuffer, EditError> {
    if target.is_empty() {
        return Err(EditError::DegenerateGeometry(format!(
            "resize target is {}x{}",
            target.width, target.height
        )));
    }

    // Fast path: if dimensions match, just clone
    if image.size() == target {
        return Ok(image.clone());
    }

    let rgb_image = image.to_rgb_image()?;
    let resized = image::imageops::resize(&rgb_image, target.width, target.height, filter.to_image_filter());

    Ok(ImageBuffer::from_rgb_image(resized))
}
