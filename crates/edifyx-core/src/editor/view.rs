//! Placement, zoom and selection of the displayed image.

use crate::geometry::Point;

/// How the working buffer is presented on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Display scale (> 0). 1.0 shows the buffer pixel for pixel.
    pub zoom: f64,
    /// Canvas position of the image's top-left corner.
    pub offset: Point,
    /// Whether the image is selected (and may be moved).
    pub selected: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Point::ORIGIN,
            selected: false,
        }
    }
}

impl ViewState {
    /// Convert a canvas point into a point relative to the displayed image.
    pub fn to_local(&self, canvas_point: Point) -> Point {
        canvas_point - self.offset
    }

    /// Scale the zoom factor, refusing results that would not stay positive
    /// and finite. Returns true when the factor changed.
    pub fn scale_zoom(&mut self, factor: f64) -> bool {
        let next = self.zoom * factor;
        if !next.is_normal() || next <= 0.0 {
            return false;
        }
        self.zoom = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view() {
        let view = ViewState::default();
        assert_eq!(view.zoom, 1.0);
        assert_eq!(view.offset, Point::ORIGIN);
        assert!(!view.selected);
    }

    #[test]
    fn test_to_local() {
        let view = ViewState {
            offset: Point::new(30, 40),
            ..Default::default()
        };
        assert_eq!(view.to_local(Point::new(35, 41)), Point::new(5, 1));
        assert_eq!(view.to_local(Point::new(0, 0)), Point::new(-30, -40));
    }

    #[test]
    fn test_scale_zoom() {
        let mut view = ViewState::default();
        assert!(view.scale_zoom(2.0));
        assert_eq!(view.zoom, 2.0);

        assert!(!view.scale_zoom(0.0));
        assert!(!view.scale_zoom(f64::INFINITY));
        assert!(!view.scale_zoom(f64::NAN));
        assert_eq!(view.zoom, 2.0);
    }
}
