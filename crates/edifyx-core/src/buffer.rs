//! In-memory RGB pixel buffer.

use crate::error::EditError;
use crate::geometry::Size;

/// An 8-bit RGB image in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create a new ImageBuffer with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            expected_len(width, height),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an ImageBuffer, rejecting pixel data of the wrong length.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EditError> {
        let expected = expected_len(width, height);
        if pixels.len() != expected {
            return Err(EditError::InvalidBuffer {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A buffer filled with a single color.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let pixels = color
            .iter()
            .copied()
            .cycle()
            .take(expected_len(width, height))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an ImageBuffer from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbImage for use with `image`/`imageproc` routines.
    pub fn to_rgb_image(&self) -> Result<image::RgbImage, EditError> {
        let actual = self.pixels.len();
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or(
            EditError::InvalidBuffer {
                expected: expected_len(self.width, self.height),
                actual,
            },
        )
    }

    /// Dimensions as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * 3
    }

    /// Read a pixel, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

fn expected_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}
