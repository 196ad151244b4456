//! Display-space to image-space coordinate mapping.
//!
//! The presentation layer reports pointer positions relative to the top-left
//! corner of the displayed (zoomed) image. Editing operations need positions
//! in the stored buffer, so every pointer coordinate passes through
//! [`to_image_space`] (brush points) or [`map_crop_rect`] (crop corners).
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, x grows right, y grows down
//! - Display points may be negative or beyond the displayed size (drags
//!   leaving the canvas); mapping clamps them into the buffer

use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// An integer point, in display or image space depending on context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        *self = *self + rhs;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An axis-aligned pixel rectangle in image space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The same rectangle shifted by `(dx, dy)`.
    pub fn offset(self, dx: u32, dy: u32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Intersect with a `size`-sized buffer anchored at the origin.
    pub fn clamp_to(self, size: Size) -> Self {
        let x = self.x.min(size.width);
        let y = self.y.min(size.height);
        let right = self.x.saturating_add(self.width).min(size.width);
        let bottom = self.y.saturating_add(self.height).min(size.height);
        Self {
            x,
            y,
            width: right.saturating_sub(x),
            height: bottom.saturating_sub(y),
        }
    }
}

/// Per-axis scale factors from display space to image space.
fn scale_factors(displayed: Size, buffer: Size) -> Result<(f64, f64), EditError> {
    if displayed.is_empty() {
        return Err(EditError::DegenerateGeometry(format!(
            "display surface is {}x{}",
            displayed.width, displayed.height
        )));
    }
    if buffer.is_empty() {
        return Err(EditError::DegenerateGeometry(format!(
            "buffer is {}x{}",
            buffer.width, buffer.height
        )));
    }
    Ok((
        buffer.width as f64 / displayed.width as f64,
        buffer.height as f64 / displayed.height as f64,
    ))
}

/// Scale a display point into image space without clamping.
///
/// The result may lie outside the buffer. Crop corners use this because a
/// corner at the far display edge must land on the far buffer edge
/// (`buffer.width`), one past the last pixel.
pub fn scale_to_image_space(
    display_point: Point,
    displayed: Size,
    buffer: Size,
) -> Result<(i64, i64), EditError> {
    let (sx, sy) = scale_factors(displayed, buffer)?;
    Ok((
        (display_point.x as f64 * sx).round() as i64,
        (display_point.y as f64 * sy).round() as i64,
    ))
}

/// Map a display point to the image pixel under it.
///
/// Computes `round(p * buffer / displayed)` per axis and clamps the result
/// to `[0, buffer - 1]`.
///
/// # Errors
///
/// Returns `EditError::DegenerateGeometry` if either size has a zero
/// dimension.
pub fn to_image_space(display_point: Point, displayed: Size, buffer: Size) -> Result<Point, EditError> {
    let (x, y) = scale_to_image_space(display_point, displayed, buffer)?;
    Ok(Point::new(
        x.clamp(0, buffer.width as i64 - 1) as i32,
        y.clamp(0, buffer.height as i64 - 1) as i32,
    ))
}

/// Map two display-space corners to an image-space rectangle.
///
/// Corners may arrive in any order. Each axis is ordered into (min, max) and
/// clamped to `[0, buffer]`. The result can be empty (zero width or height);
/// callers treat that as a no-op.
pub fn map_crop_rect(
    start: Point,
    end: Point,
    displayed: Size,
    buffer: Size,
) -> Result<PixelRect, EditError> {
    let (x1, y1) = scale_to_image_space(start, displayed, buffer)?;
    let (x2, y2) = scale_to_image_space(end, displayed, buffer)?;

    let clamp_x = |v: i64| v.clamp(0, buffer.width as i64) as u32;
    let clamp_y = |v: i64| v.clamp(0, buffer.height as i64) as u32;

    let left = clamp_x(x1.min(x2));
    let right = clamp_x(x1.max(x2));
    let top = clamp_y(y1.min(y2));
    let bottom = clamp_y(y1.max(y2));

    Ok(PixelRect::new(left, top, right - left, bottom - top))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapping() {
        let size = Size::new(100, 50);
        let p = to_image_space(Point::new(42, 17), size, size).unwrap();
        assert_eq!(p, Point::new(42, 17));
    }

    #[test]
    fn test_zoomed_in_mapping() {
        // Displayed at 2x: display (40, 20) is image (20, 10)
        let p = to_image_space(Point::new(40, 20), Size::new(200, 100), Size::new(100, 50)).unwrap();
        assert_eq!(p, Point::new(20, 10));
    }

    #[test]
    fn test_mapping_rounds() {
        // 3 * 100 / 200 = 1.5 rounds away from zero
        let p = to_image_space(Point::new(3, 3), Size::new(200, 200), Size::new(100, 100)).unwrap();
        assert_eq!(p, Point::new(2, 2));
    }

    #[test]
    fn test_mapping_clamps() {
        let displayed = Size::new(100, 100);
        let buffer = Size::new(10, 10);
        assert_eq!(
            to_image_space(Point::new(-50, -1), displayed, buffer).unwrap(),
            Point::new(0, 0)
        );
        assert_eq!(
            to_image_space(Point::new(100, 500), displayed, buffer).unwrap(),
            Point::new(9, 9)
        );
    }

    #[test]
    fn test_zero_display_size_is_error() {
        let result = to_image_space(Point::new(1, 1), Size::new(0, 10), Size::new(10, 10));
        assert!(matches!(result, Err(EditError::DegenerateGeometry(_))));
    }

    #[test]
    fn test_crop_rect_orders_corners() {
        let size = Size::new(100, 100);
        let rect = map_crop_rect(Point::new(60, 80), Point::new(10, 20), size, size).unwrap();
        assert_eq!(rect, PixelRect::new(10, 20, 50, 60));
    }

    #[test]
    fn test_crop_rect_full_display() {
        let rect = map_crop_rect(
            Point::new(0, 0),
            Point::new(120, 60),
            Size::new(120, 60),
            Size::new(100, 50),
        )
        .unwrap();
        assert_eq!(rect, PixelRect::new(0, 0, 100, 50));
    }

    #[test]
    fn test_crop_rect_clamps_outside_drag() {
        let size = Size::new(50, 50);
        let rect = map_crop_rect(Point::new(-20, -20), Point::new(80, 30), size, size).unwrap();
        assert_eq!(rect, PixelRect::new(0, 0, 50, 30));
    }

    #[test]
    fn test_crop_rect_single_point_is_empty() {
        let size = Size::new(50, 50);
        let rect = map_crop_rect(Point::new(7, 7), Point::new(7, 7), size, size).unwrap();
        assert!(rect.is_empty());
    }

    #[test]
    fn test_pixel_rect_clamp() {
        let rect = PixelRect::new(8, 8, 10, 10).clamp_to(Size::new(12, 10));
        assert_eq!(rect, PixelRect::new(8, 8, 4, 2));

        let outside = PixelRect::new(20, 20, 5, 5).clamp_to(Size::new(10, 10));
        assert!(outside.is_empty());
    }

    #[test]
    fn test_point_arithmetic() {
        let mut p = Point::new(3, 4);
        p += Point::new(-5, 1);
        assert_eq!(p, Point::new(-2, 5));
        assert_eq!(p - Point::new(1, 1), Point::new(-3, 4));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn size_strategy() -> impl Strategy<Value = Size> {
        (1u32..=4000, 1u32..=4000).prop_map(|(w, h)| Size::new(w, h))
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-10_000i32..=10_000, -10_000i32..=10_000).prop_map(|(x, y)| Point::new(x, y))
    }

    proptest! {
        /// Property: mapped points always land inside the buffer.
        #[test]
        fn prop_mapping_within_bounds(
            point in point_strategy(),
            displayed in size_strategy(),
            buffer in size_strategy(),
        ) {
            let p = to_image_space(point, displayed, buffer).unwrap();
            prop_assert!(p.x >= 0 && (p.x as u32) < buffer.width);
            prop_assert!(p.y >= 0 && (p.y as u32) < buffer.height);
        }

        /// Property: crop rectangles never extend past the buffer.
        #[test]
        fn prop_crop_rect_within_bounds(
            start in point_strategy(),
            end in point_strategy(),
            displayed in size_strategy(),
            buffer in size_strategy(),
        ) {
            let rect = map_crop_rect(start, end, displayed, buffer).unwrap();
            prop_assert!(rect.x + rect.width <= buffer.width);
            prop_assert!(rect.y + rect.height <= buffer.height);
        }

        /// Property: corner order does not matter.
        #[test]
        fn prop_crop_rect_symmetric(
            start in point_strategy(),
            end in point_strategy(),
            displayed in size_strategy(),
            buffer in size_strategy(),
        ) {
            let a = map_crop_rect(start, end, displayed, buffer).unwrap();
            let b = map_crop_rect(end, start, displayed, buffer).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Property: the full display area maps to the full buffer.
        #[test]
        fn prop_full_display_maps_to_full_buffer(
            displayed in size_strategy(),
            buffer in size_strategy(),
        ) {
            let corner = Point::new(displayed.width as i32, displayed.height as i32);
            let rect = map_crop_rect(Point::ORIGIN, corner, displayed, buffer).unwrap();
            prop_assert_eq!(rect, PixelRect::new(0, 0, buffer.width, buffer.height));
        }
    }
}
