//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::brush::BrushSettings;
use crate::transform::{EdgeFill, InterpolationFilter, ResampleFilter};

/// Default multiplicative zoom step.
pub const DEFAULT_ZOOM_STEP: f64 = 1.2;
/// Default JPEG export quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;
/// Default ceiling on the zoomed display size, in pixels per side.
pub const DEFAULT_MAX_DISPLAY_DIMENSION: u32 = 8192;

/// Tunables for an [`EditorState`](crate::editor::EditorState).
///
/// Every field has a default, so a partial object deserializes cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Zoom factor multiplier per zoom action (> 1.0).
    pub zoom_step: f64,
    /// Zooming in is refused once the longer displayed side would exceed
    /// this many pixels.
    pub max_display_dimension: u32,
    /// Brush used until the user picks another.
    pub brush: BrushSettings,
    /// Interpolation used by rotation.
    pub rotation_filter: InterpolationFilter,
    /// How rotation fills pixels it exposes.
    pub edge_fill: EdgeFill,
    /// Filter used to resample the working buffer for display.
    pub display_filter: ResampleFilter,
    /// RGB color of the crop preview rectangle.
    pub crop_overlay_color: [u8; 3],
    /// Line thickness of the crop preview rectangle, in display pixels.
    pub crop_overlay_thickness: u32,
    /// JPEG export quality (1-100).
    pub jpeg_quality: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            zoom_step: DEFAULT_ZOOM_STEP,
            max_display_dimension: DEFAULT_MAX_DISPLAY_DIMENSION,
            brush: BrushSettings::default(),
            rotation_filter: InterpolationFilter::default(),
            edge_fill: EdgeFill::default(),
            display_filter: ResampleFilter::default(),
            crop_overlay_color: [255, 255, 0],
            crop_overlay_thickness: 2,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl EditorConfig {
    /// Repair out-of-range values, falling back to defaults.
    pub fn sanitize(mut self) -> Self {
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            tracing::warn!(zoom_step = self.zoom_step, "invalid zoom step, using default");
            self.zoom_step = DEFAULT_ZOOM_STEP;
        }
        if self.max_display_dimension == 0 {
            tracing::warn!("display ceiling is zero, using default");
            self.max_display_dimension = DEFAULT_MAX_DISPLAY_DIMENSION;
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            tracing::warn!(jpeg_quality = self.jpeg_quality, "jpeg quality out of range");
            self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        }
        if self.crop_overlay_thickness == 0 {
            tracing::warn!("crop overlay thickness is zero, using 1");
            self.crop_overlay_thickness = 1;
        }
        self.brush = BrushSettings::new(self.brush.color, self.brush.width);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.zoom_step, 1.2);
        assert_eq!(config.max_display_dimension, 8192);
        assert_eq!(config.brush.color, [0, 0, 255]);
        assert_eq!(config.brush.width, 3);
        assert_eq!(config.edge_fill, EdgeFill::Constant([0, 0, 0]));
        assert_eq!(config.rotation_filter, InterpolationFilter::Bilinear);
        assert_eq!(config.display_filter, ResampleFilter::Bilinear);
        assert_eq!(config.crop_overlay_color, [255, 255, 0]);
        assert_eq!(config.crop_overlay_thickness, 2);
        assert_eq!(config.jpeg_quality, 90);
    }

    #[test]
    fn test_sanitize_keeps_valid_config() {
        let config = EditorConfig::default();
        assert_eq!(config.sanitize(), config);
    }

    #[test]
    fn test_sanitize_repairs_values() {
        let config = EditorConfig {
            zoom_step: 0.5,
            max_display_dimension: 0,
            jpeg_quality: 0,
            crop_overlay_thickness: 0,
            brush: BrushSettings {
                color: [1, 2, 3],
                width: 400,
            },
            ..Default::default()
        }
        .sanitize();

        assert_eq!(config.zoom_step, DEFAULT_ZOOM_STEP);
        assert_eq!(config.max_display_dimension, DEFAULT_MAX_DISPLAY_DIMENSION);
        assert_eq!(config.jpeg_quality, 1);
        assert_eq!(config.crop_overlay_thickness, 1);
        assert_eq!(config.brush.width, 50);
        assert_eq!(config.brush.color, [1, 2, 3]);
    }

    #[test]
    fn test_sanitize_rejects_nan_zoom_step() {
        let config = EditorConfig {
            zoom_step: f64::NAN,
            ..Default::default()
        }
        .sanitize();
        assert_eq!(config.zoom_step, DEFAULT_ZOOM_STEP);
    }
}
