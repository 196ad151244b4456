//! The editing session.
//!
//! [`EditorState`] owns the original and working buffers, the view, the
//! active tool and the color slider state. The presentation layer calls one
//! method per user action and repaints from [`EditorState::display_frame`]
//! whenever the returned [`Outcome`] asks for it.
//!
//! # Buffers
//!
//! - `original` is captured at import and is the source of every crop
//! - `working` carries all edits and is what gets displayed and exported
//! - `region` is the rectangle of `original` that `working` was cut from, so
//!   a crop of an already cropped image still reads from `original`
//!
//! # Color sliders
//!
//! The first slider change after any other edit snapshots `working` as the
//! adjustment base. Every slider change re-derives `working` from the base
//! and the current values of all three sliders. Any other edit commits the
//! result: the base is dropped and the sliders return to neutral.

mod frame;
mod tool;
mod view;

pub use frame::DisplayFrame;
pub use tool::{CropGesture, ToolKind, ToolMode};
pub use view::ViewState;

use std::path::Path;

use crate::adjustments::{apply_color_adjustments, ColorAdjustments};
use crate::brush::BrushSettings;
use crate::buffer::ImageBuffer;
use crate::config::EditorConfig;
use crate::error::{EditError, NoOp, Outcome};
use crate::geometry::{map_crop_rect, PixelRect, Point, Size};
use crate::io::{self, ImageFormat};
use crate::transform::{apply_rotation, crop_to_rect, is_whole_turn, zoomed_size};

/// Largest rotation magnitude accepted, in degrees.
pub const MAX_ROTATION_DEGREES: f64 = 360.0;

/// Buffers of a loaded image.
#[derive(Debug, Clone)]
struct Session {
    original: ImageBuffer,
    working: ImageBuffer,
    region: PixelRect,
}

impl Session {
    fn new(image: ImageBuffer) -> Self {
        let region = PixelRect::new(0, 0, image.width, image.height);
        Self {
            original: image.clone(),
            working: image,
            region,
        }
    }
}

/// All state of one editing session.
#[derive(Debug, Clone)]
pub struct EditorState {
    config: EditorConfig,
    session: Option<Session>,
    view: ViewState,
    tool: ToolMode,
    brush: BrushSettings,
    adjustments: ColorAdjustments,
    adjust_base: Option<ImageBuffer>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorState {
    /// Create an empty editor. Out-of-range config values are repaired.
    pub fn new(config: EditorConfig) -> Self {
        let config = config.sanitize();
        Self {
            config,
            session: None,
            view: ViewState::default(),
            tool: ToolMode::None,
            brush: config.brush,
            adjustments: ColorAdjustments::default(),
            adjust_base: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    /// Current slider values.
    pub fn color_adjustments(&self) -> ColorAdjustments {
        self.adjustments
    }

    pub fn has_image(&self) -> bool {
        self.session.is_some()
    }

    /// The buffer carrying all edits.
    pub fn working(&self) -> Option<&ImageBuffer> {
        self.session.as_ref().map(|s| &s.working)
    }

    /// The buffer captured at import.
    pub fn original(&self) -> Option<&ImageBuffer> {
        self.session.as_ref().map(|s| &s.original)
    }

    /// The rectangle of the original that the working buffer covers.
    pub fn crop_region(&self) -> Option<PixelRect> {
        self.session.as_ref().map(|s| s.region)
    }

    /// Size of the working buffer on screen at the current zoom.
    pub fn displayed_size(&self) -> Option<Size> {
        self.session
            .as_ref()
            .map(|s| zoomed_size(s.working.size(), self.view.zoom))
    }

    /// Load an image file, replacing the current one.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidFilePath` or `EditError::Decode` when the
    /// file cannot be loaded; the editor is unchanged in that case.
    pub fn import(&mut self, path: impl AsRef<Path>) -> Result<Outcome, EditError> {
        let path = path.as_ref();
        let image = io::load(path).inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "import failed");
        })?;
        tracing::info!(
            path = %path.display(),
            width = image.width,
            height = image.height,
            "image imported"
        );
        self.load_image(image)
    }

    /// Decode encoded PNG/JPEG bytes, replacing the current image.
    ///
    /// # Errors
    ///
    /// Returns `EditError::Decode` if the bytes are not a supported image;
    /// the editor is unchanged in that case.
    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<Outcome, EditError> {
        let image = io::decode(bytes).inspect_err(|e| {
            tracing::warn!(error = %e, "import failed");
        })?;
        tracing::info!(width = image.width, height = image.height, "image imported");
        self.load_image(image)
    }

    /// Replace the current image with an already decoded buffer.
    ///
    /// The view (zoom, placement, selection) and the active tool are kept;
    /// any unfinished gesture is discarded. If the kept zoom would push the
    /// new image past the display ceiling, zoom is lowered to fit.
    ///
    /// # Errors
    ///
    /// Returns `EditError::DegenerateGeometry` for an empty buffer and
    /// `EditError::InvalidBuffer` if the pixel data does not match the size.
    pub fn load_image(&mut self, image: ImageBuffer) -> Result<Outcome, EditError> {
        if image.width == 0 || image.height == 0 {
            return Err(EditError::DegenerateGeometry(format!(
                "cannot load a {}x{} image",
                image.width, image.height
            )));
        }
        let image = ImageBuffer::from_raw(image.width, image.height, image.pixels)?;

        self.commit_adjustments();
        self.tool = ToolMode::idle(self.tool.kind());
        let size = image.size();
        self.session = Some(Session::new(image));

        if !self.fits_display(size, self.view.zoom) {
            let longest = size.width.max(size.height) as f64;
            let zoom = (self.config.max_display_dimension as f64 / longest).max(1.0);
            tracing::warn!(from = self.view.zoom, to = zoom, "zoom reduced to fit display ceiling");
            self.view.zoom = zoom;
        }
        Ok(Outcome::Redraw)
    }

    /// Drop the image and reset the view, tool and sliders.
    pub fn clear(&mut self) -> Outcome {
        self.commit_adjustments();
        self.session = None;
        self.view = ViewState::default();
        self.tool = ToolMode::None;
        tracing::info!("canvas cleared");
        Outcome::Redraw
    }

    /// Save the working buffer, choosing PNG or JPEG from the extension.
    ///
    /// # Errors
    ///
    /// Returns `EditError::UnsupportedFormat` for other extensions and
    /// `EditError::InvalidFilePath` if the file cannot be written.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<Outcome, EditError> {
        let Some(session) = self.session.as_ref() else {
            return Ok(self.no_op("export", NoOp::NoImageLoaded));
        };
        io::save(path, &session.working, self.config.jpeg_quality).inspect_err(|e| {
            tracing::warn!(error = %e, "export failed");
        })?;
        Ok(Outcome::Handled)
    }

    /// Encode the working buffer in memory. Returns `Ok(None)` with no image.
    ///
    /// # Errors
    ///
    /// Returns `EditError::Encode` if the codec fails.
    pub fn export_bytes(&self, format: ImageFormat) -> Result<Option<Vec<u8>>, EditError> {
        let Some(session) = self.session.as_ref() else {
            self.no_op("export", NoOp::NoImageLoaded);
            return Ok(None);
        };
        let bytes = io::encode(&session.working, format, self.config.jpeg_quality)?;
        tracing::info!(?format, bytes = bytes.len(), "image exported");
        Ok(Some(bytes))
    }

    /// Multiply the zoom factor by the configured step.
    ///
    /// Refused with `NoOp::DegenerateGeometry` once the displayed image would
    /// pass `max_display_dimension`.
    pub fn zoom_in(&mut self) -> Outcome {
        self.zoom_by(self.config.zoom_step, "zoom_in")
    }

    /// Divide the zoom factor by the configured step.
    pub fn zoom_out(&mut self) -> Outcome {
        self.zoom_by(1.0 / self.config.zoom_step, "zoom_out")
    }

    fn zoom_by(&mut self, factor: f64, op: &'static str) -> Outcome {
        if self.session.is_none() {
            return self.no_op(op, NoOp::NoImageLoaded);
        }
        let mut next = self.view;
        if !next.scale_zoom(factor) {
            tracing::warn!(zoom = self.view.zoom, "zoom limit reached");
            return self.no_op(op, NoOp::DegenerateGeometry);
        }
        if let Some(session) = self.session.as_ref() {
            if factor > 1.0 && !self.fits_display(session.working.size(), next.zoom) {
                tracing::warn!(
                    zoom = self.view.zoom,
                    ceiling = self.config.max_display_dimension,
                    "zoom would exceed display ceiling"
                );
                return self.no_op(op, NoOp::DegenerateGeometry);
            }
        }
        self.view = next;
        tracing::debug!(zoom = self.view.zoom, "zoom changed");
        Outcome::Redraw
    }

    /// Whether `size` at `zoom` stays within the display ceiling. Zoom at or
    /// below 1.0 always fits, so an image larger than the ceiling can still
    /// be shown at its own size.
    fn fits_display(&self, size: Size, zoom: f64) -> bool {
        if zoom <= 1.0 {
            return true;
        }
        let displayed = zoomed_size(size, zoom);
        displayed.width.max(displayed.height) <= self.config.max_display_dimension
    }

    /// Crop to the rectangle spanned by two corners.
    ///
    /// Corners are display coordinates relative to the displayed image, in
    /// any order. The pixels are copied from the original buffer, so earlier
    /// brush strokes, rotations and color changes are not carried over. A
    /// rectangle with zero area leaves everything unchanged.
    pub fn crop(&mut self, start: Point, end: Point) -> Outcome {
        let Some(displayed) = self.displayed_size() else {
            return self.no_op("crop", NoOp::NoImageLoaded);
        };
        let Some(session) = self.session.as_ref() else {
            return self.no_op("crop", NoOp::NoImageLoaded);
        };

        let rect = match map_crop_rect(start, end, displayed, session.working.size()) {
            Ok(rect) if !rect.is_empty() => rect,
            _ => return self.no_op("crop", NoOp::DegenerateGeometry),
        };
        let source = rect
            .offset(session.region.x, session.region.y)
            .clamp_to(session.original.size());
        let Some(cropped) = crop_to_rect(&session.original, source) else {
            return self.no_op("crop", NoOp::DegenerateGeometry);
        };

        self.commit_adjustments();
        tracing::info!(
            x = source.x,
            y = source.y,
            width = source.width,
            height = source.height,
            "image cropped"
        );
        if let Some(session) = self.session.as_mut() {
            session.working = cropped;
            session.region = source;
        }
        Outcome::Redraw
    }

    /// Rotate the working buffer about its center.
    ///
    /// Positive angles turn counter-clockwise. Angles are clamped to
    /// ±[`MAX_ROTATION_DEGREES`]; the canvas keeps its size and exposed
    /// pixels follow the configured edge fill.
    pub fn rotate(&mut self, angle_degrees: f64) -> Outcome {
        if self.session.is_none() {
            return self.no_op("rotate", NoOp::NoImageLoaded);
        }
        if !angle_degrees.is_finite() {
            tracing::warn!(angle_degrees, "ignoring non-finite rotation angle");
            return self.no_op("rotate", NoOp::DegenerateGeometry);
        }

        let angle = angle_degrees.clamp(-MAX_ROTATION_DEGREES, MAX_ROTATION_DEGREES);
        if angle != angle_degrees {
            tracing::warn!(angle_degrees, clamped = angle, "rotation angle out of range");
        }

        self.commit_adjustments();
        if is_whole_turn(angle) {
            tracing::debug!(angle, "whole-turn rotation, pixels unchanged");
            return Outcome::Redraw;
        }

        let (filter, fill) = (self.config.rotation_filter, self.config.edge_fill);
        if let Some(session) = self.session.as_mut() {
            session.working = apply_rotation(&session.working, angle, filter, fill);
        }
        tracing::info!(angle, "image rotated");
        Outcome::Redraw
    }

    /// Set the hue slider (steps on the 100-step hue circle).
    pub fn set_hue(&mut self, hue_shift: i32) -> Outcome {
        self.set_color_adjustments(ColorAdjustments {
            hue_shift,
            ..self.adjustments
        })
    }

    /// Set the saturation slider (factor, 1.0 neutral).
    pub fn set_saturation(&mut self, saturation: f32) -> Outcome {
        self.set_color_adjustments(ColorAdjustments {
            saturation,
            ..self.adjustments
        })
    }

    /// Set the luminosity slider (factor, 1.0 neutral).
    pub fn set_luminosity(&mut self, luminosity: f32) -> Outcome {
        self.set_color_adjustments(ColorAdjustments {
            luminosity,
            ..self.adjustments
        })
    }

    /// Set all three sliders and re-derive the working buffer from the
    /// adjustment base.
    pub fn set_color_adjustments(&mut self, adjustments: ColorAdjustments) -> Outcome {
        let Some(session) = self.session.as_mut() else {
            return self.no_op("color_adjustments", NoOp::NoImageLoaded);
        };

        let clamped = adjustments.clamped();
        if clamped.saturation != adjustments.saturation || clamped.luminosity != adjustments.luminosity {
            tracing::warn!(?adjustments, ?clamped, "color factors out of range");
        }

        let base = self
            .adjust_base
            .get_or_insert_with(|| session.working.clone());
        let mut derived = base.clone();
        apply_color_adjustments(&mut derived.pixels, &clamped);
        session.working = derived;
        self.adjustments = clamped;

        tracing::debug!(?clamped, "color adjustments applied");
        Outcome::Redraw
    }

    /// Use `brush` for subsequent strokes.
    pub fn set_brush(&mut self, brush: BrushSettings) {
        self.brush = BrushSettings::new(brush.color, brush.width);
    }

    /// Set the brush from a `#RRGGBB` string and an optional width.
    ///
    /// Invalid input falls back to the configured default brush.
    pub fn configure_brush(&mut self, hex_color: &str, width: Option<u32>) -> BrushSettings {
        self.brush = BrushSettings::from_input(hex_color, width, self.config.brush);
        tracing::debug!(brush = ?self.brush, "brush configured");
        self.brush
    }

    /// Make the current slider result permanent.
    fn commit_adjustments(&mut self) {
        if self.adjust_base.take().is_some() {
            tracing::debug!(adjustments = ?self.adjustments, "color adjustments committed");
        }
        self.adjustments = ColorAdjustments::default();
    }

    fn no_op(&self, op: &'static str, reason: NoOp) -> Outcome {
        tracing::debug!(op, %reason, "nothing to do");
        Outcome::NothingToDo(reason)
    }
}
