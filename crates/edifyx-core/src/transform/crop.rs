//! Rectangular pixel crops.
//!
//! The editor crops from the original buffer, so the rectangle handed to
//! [`crop_to_rect`] is always expressed in that buffer's pixel grid. Mapping
//! from display space happens earlier, in [`crate::geometry::map_crop_rect`].

use crate::buffer::ImageBuffer;
use crate::geometry::PixelRect;

/// Copy the pixels inside `rect` into a new buffer.
///
/// The rectangle is clamped to the image bounds first. Returns `None` when
/// the clamped rectangle is empty, which callers treat as a no-op.
///
/// # Example
///
/// ```
/// use edifyx_core::buffer::ImageBuffer;
/// use edifyx_core::geometry::PixelRect;
/// use edifyx_core::transform::crop_to_rect;
///
/// let image = ImageBuffer::filled(100, 100, [128, 128, 128]);
/// let cropped = crop_to_rect(&image, PixelRect::new(25, 25, 50, 50)).unwrap();
/// assert_eq!(cropped.width, 50);
/// ```
pub fn crop_to_rect(image: &ImageBuffer, rect: PixelRect) -> Option<ImageBuffer> {
    let rect = rect.clamp_to(image.size());
    if rect.is_empty() {
        return None;
    }

    // Fast path: full crop returns a clone
    if rect.width == image.width && rect.height == image.height {
        return Some(image.clone());
    }

    let src_stride = image.stride();
    let row_len = rect.width as usize * 3;
    let mut output = Vec::with_capacity(row_len * rect.height as usize);

    // Copy pixel data row by row
    for y in rect.y..rect.y + rect.height {
        let start = y as usize * src_stride + rect.x as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    Some(ImageBuffer::new(rect.width, rect.height, output))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> ImageBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v);
                pixels.push(v);
                pixels.push(v);
            }
        }
        ImageBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_full_crop() {
        let img = test_image(100, 100);
        let result = crop_to_rect(&img, PixelRect::new(0, 0, 100, 100)).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_center_crop() {
        let img = test_image(10, 10);
        let result = crop_to_rect(&img, PixelRect::new(2, 2, 6, 6)).unwrap();

        assert_eq!(result.width, 6);
        assert_eq!(result.height, 6);
        // First pixel comes from (2, 2): 2 * 10 + 2 = 22
        assert_eq!(result.pixels[0], 22);
    }

    #[test]
    fn test_crop_pixel_values_preserved() {
        let img = test_image(10, 10);
        let result = crop_to_rect(&img, PixelRect::new(3, 3, 4, 4)).unwrap();

        // Last pixel comes from (6, 6): 66
        assert_eq!(result.pixel(3, 3), Some([66, 66, 66]));
        // Second row starts at (3, 4): 43
        assert_eq!(result.pixel(0, 1), Some([43, 43, 43]));
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = test_image(10, 10);
        let result = crop_to_rect(&img, PixelRect::new(8, 8, 5, 5)).unwrap();
        assert_eq!((result.width, result.height), (2, 2));
    }

    #[test]
    fn test_crop_rectangular() {
        let img = test_image(200, 100);
        let result = crop_to_rect(&img, PixelRect::new(0, 0, 50, 100)).unwrap();
        assert_eq!((result.width, result.height), (50, 100));
    }

    #[test]
    fn test_empty_crop_is_none() {
        let img = test_image(10, 10);
        assert!(crop_to_rect(&img, PixelRect::new(5, 5, 0, 3)).is_none());
        assert!(crop_to_rect(&img, PixelRect::new(10, 0, 4, 4)).is_none());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
