//! Freehand brush strokes.
//!
//! A stroke is a chain of segments. The editor records the last image-space
//! point on press and draws one segment per pointer move.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, BresenhamLineIter};
use serde::{Deserialize, Serialize};

use crate::buffer::ImageBuffer;
use crate::error::EditError;
use crate::geometry::Point;

/// Thinnest allowed stroke, in pixels.
pub const MIN_BRUSH_WIDTH: u32 = 1;
/// Thickest allowed stroke, in pixels.
pub const MAX_BRUSH_WIDTH: u32 = 50;

/// Brush color and stroke width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushSettings {
    /// RGB stroke color.
    pub color: [u8; 3],
    /// Stroke width in image pixels (1-50).
    pub width: u32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            color: [0, 0, 255],
            width: 3,
        }
    }
}

impl BrushSettings {
    /// Create settings, clamping the width into the allowed range.
    pub fn new(color: [u8; 3], width: u32) -> Self {
        let clamped = width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH);
        if clamped != width {
            tracing::warn!(width, clamped, "brush width out of range");
        }
        Self {
            color,
            width: clamped,
        }
    }

    /// Build settings from user input: a `#RRGGBB` string and a width.
    ///
    /// An unparseable color falls back to `fallback.color`; a missing width
    /// falls back to `fallback.width`.
    pub fn from_input(hex: &str, width: Option<u32>, fallback: BrushSettings) -> Self {
        let color = parse_hex_color(hex).unwrap_or_else(|| {
            tracing::warn!(input = hex, "invalid brush color, using default");
            fallback.color
        });
        Self::new(color, width.unwrap_or(fallback.width))
    }
}

/// Parse a `#RRGGBB` color string.
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Draw one stroke segment from `from` to `to` (image space) into `image`.
///
/// Width 1 draws a plain line. Wider brushes stamp a round footprint exactly
/// `width` pixels across at every point of the segment, which gives round
/// caps and joins between consecutive segments.
///
/// # Errors
///
/// Returns `EditError::InvalidBuffer` if the pixel data does not match the
/// image dimensions; the image is left untouched in that case.
pub fn draw_segment(
    image: &mut ImageBuffer,
    from: Point,
    to: Point,
    brush: &BrushSettings,
) -> Result<(), EditError> {
    let expected = image.width as usize * image.height as usize * 3;
    if image.pixels.len() != expected {
        return Err(EditError::InvalidBuffer {
            expected,
            actual: image.pixels.len(),
        });
    }

    let pixels = std::mem::take(&mut image.pixels);
    let mut canvas = RgbImage::from_raw(image.width, image.height, pixels).ok_or(
        EditError::InvalidBuffer {
            expected,
            actual: 0,
        },
    )?;

    let color = Rgb(brush.color);
    let start = (from.x as f32, from.y as f32);
    let end = (to.x as f32, to.y as f32);

    if brush.width <= 1 {
        draw_line_segment_mut(&mut canvas, start, end, color);
    } else {
        let footprint = round_footprint(brush.width);
        for center in BresenhamLineIter::new(start, end) {
            stamp(&mut canvas, center, &footprint, color);
        }
        stamp(&mut canvas, (to.x, to.y), &footprint, color);
    }

    image.pixels = canvas.into_raw();
    Ok(())
}

/// Offsets of a disc `width` pixels across, relative to the stamp center.
///
/// Even widths have no middle pixel; their extra row and column fall on the
/// positive side of the center.
fn round_footprint(width: u32) -> Vec<(i32, i32)> {
    let w = width as i32;
    let shift = (w - 1) / 2;
    let mid = (w - 1) as f32 / 2.0;
    let r2 = (width as f32 / 2.0).powi(2);

    let mut offsets = Vec::new();
    for row in 0..w {
        for col in 0..w {
            let (dx, dy) = (col as f32 - mid, row as f32 - mid);
            if dx * dx + dy * dy <= r2 {
                offsets.push((col - shift, row - shift));
            }
        }
    }
    offsets
}

fn stamp(canvas: &mut RgbImage, center: (i32, i32), footprint: &[(i32, i32)], color: Rgb<u8>) {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    for &(dx, dy) in footprint {
        let (x, y) = (center.0 + dx, center.1 + dy);
        if x >= 0 && y >= 0 && x < w && y < h {
            canvas.put_pixel(x as u32, y as u32, color);
        }
    }
}
