//! Editor session bindings.
//!
//! [`JsEditor`] wraps the core `EditorState`. Every action returns `true`
//! when the canvas should be repainted from [`JsEditor::display_frame`].
//!
//! # Example
//!
//! ```typescript
//! import init, { JsEditor } from '@edifyx/wasm';
//!
//! await init();
//! const editor = new JsEditor({ zoom_step: 1.25, jpeg_quality: 85 });
//! editor.import_bytes(new Uint8Array(await file.arrayBuffer()));
//!
//! editor.activate_tool('brush');
//! editor.configure_brush('#FF0000', 8);
//! canvas.onpointerdown = (e) => editor.pointer_press(e.offsetX, e.offsetY) && repaint();
//! canvas.onpointermove = (e) => editor.pointer_move(e.offsetX, e.offsetY) && repaint();
//! canvas.onpointerup = (e) => editor.pointer_release(e.offsetX, e.offsetY) && repaint();
//! ```

use edifyx_core::{
    BrushSettings, EditorConfig, EditorState, ImageFormat, Point, ToolKind,
};
use wasm_bindgen::prelude::*;

use crate::console::{fail, report};
use crate::types::JsDisplayFrame;

/// An editing session for JavaScript.
#[wasm_bindgen]
pub struct JsEditor {
    inner: EditorState,
}

#[wasm_bindgen]
impl JsEditor {
    /// Create an editor from a config object.
    ///
    /// Missing fields take their defaults; `undefined` or `null` uses the
    /// default config.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsEditor, JsValue> {
        if config.is_undefined() || config.is_null() {
            return Ok(Self::with_defaults());
        }
        let config: EditorConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))?;
        Ok(Self::from_config(config))
    }

    /// Create an editor with the default config.
    pub fn with_defaults() -> JsEditor {
        Self::from_config(EditorConfig::default())
    }

    /// Whether an image is loaded
    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// Current zoom factor
    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.view().zoom
    }

    /// Name of the active tool: "none", "select", "brush" or "crop"
    #[wasm_bindgen(getter)]
    pub fn tool(&self) -> String {
        tool_name(self.inner.tool().kind()).to_string()
    }

    /// Width of the working buffer, or 0 with no image
    #[wasm_bindgen(getter)]
    pub fn image_width(&self) -> u32 {
        self.inner.working().map_or(0, |w| w.width)
    }

    /// Height of the working buffer, or 0 with no image
    #[wasm_bindgen(getter)]
    pub fn image_height(&self) -> u32 {
        self.inner.working().map_or(0, |w| w.height)
    }

    /// Decode PNG or JPEG bytes and make them the current image.
    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<bool, JsValue> {
        self.inner
            .import_bytes(bytes)
            .map(|outcome| report("import", outcome))
            .map_err(|e| fail("import", e))
    }

    /// Drop the image and reset the view.
    pub fn clear(&mut self) -> bool {
        report("clear", self.inner.clear())
    }

    /// Encode the working buffer as "png" or "jpeg".
    ///
    /// Returns `undefined` when no image is loaded.
    pub fn export(&self, format: &str) -> Result<Option<Vec<u8>>, JsValue> {
        let format = parse_format(format).map_err(|e| JsValue::from_str(&e))?;
        self.inner
            .export_bytes(format)
            .map_err(|e| fail("export", e))
    }

    pub fn zoom_in(&mut self) -> bool {
        report("zoom_in", self.inner.zoom_in())
    }

    pub fn zoom_out(&mut self) -> bool {
        report("zoom_out", self.inner.zoom_out())
    }

    /// Switch to "none", "select", "brush" or "crop".
    pub fn activate_tool(&mut self, name: &str) -> Result<bool, JsValue> {
        let kind = parse_tool(name).map_err(|e| JsValue::from_str(&e))?;
        Ok(report("activate_tool", self.inner.activate_tool(kind)))
    }

    pub fn select(&mut self) -> bool {
        report("select", self.inner.select())
    }

    pub fn deselect(&mut self) -> bool {
        report("deselect", self.inner.deselect())
    }

    /// Move the selected image by a canvas delta.
    pub fn move_by(&mut self, dx: i32, dy: i32) -> bool {
        report("move", self.inner.move_by(Point::new(dx, dy)))
    }

    /// Pointer pressed at canvas coordinates.
    pub fn pointer_press(&mut self, x: i32, y: i32) -> Result<bool, JsValue> {
        self.inner
            .pointer_press(Point::new(x, y))
            .map(|outcome| report("pointer_press", outcome))
            .map_err(|e| fail("pointer_press", e))
    }

    /// Pointer moved to canvas coordinates.
    pub fn pointer_move(&mut self, x: i32, y: i32) -> Result<bool, JsValue> {
        self.inner
            .pointer_move(Point::new(x, y))
            .map(|outcome| report("pointer_move", outcome))
            .map_err(|e| fail("pointer_move", e))
    }

    /// Pointer released at canvas coordinates.
    pub fn pointer_release(&mut self, x: i32, y: i32) -> Result<bool, JsValue> {
        self.inner
            .pointer_release(Point::new(x, y))
            .map(|outcome| report("pointer_release", outcome))
            .map_err(|e| fail("pointer_release", e))
    }

    /// Crop to two corners given relative to the displayed image.
    pub fn crop(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        report("crop", self.inner.crop(Point::new(x1, y1), Point::new(x2, y2)))
    }

    /// Rotate by degrees, positive = counter-clockwise.
    pub fn rotate(&mut self, angle_degrees: f64) -> bool {
        report("rotate", self.inner.rotate(angle_degrees))
    }

    /// Hue slider, in steps of the 100-step hue circle.
    pub fn set_hue(&mut self, hue_shift: i32) -> bool {
        report("set_hue", self.inner.set_hue(hue_shift))
    }

    /// Saturation slider as a factor (1.0 neutral).
    pub fn set_saturation(&mut self, factor: f32) -> bool {
        report("set_saturation", self.inner.set_saturation(factor))
    }

    /// Luminosity slider as a factor (1.0 neutral).
    pub fn set_luminosity(&mut self, factor: f32) -> bool {
        report("set_luminosity", self.inner.set_luminosity(factor))
    }

    /// Set the brush from a `#RRGGBB` string and optional width.
    ///
    /// Invalid input falls back to the configured default brush.
    pub fn configure_brush(&mut self, hex_color: &str, width: Option<u32>) {
        self.inner.configure_brush(hex_color, width);
    }

    /// Current brush color as `#RRGGBB`
    #[wasm_bindgen(getter)]
    pub fn brush_color(&self) -> String {
        hex_color(self.inner.brush())
    }

    /// Current brush width in pixels
    #[wasm_bindgen(getter)]
    pub fn brush_width(&self) -> u32 {
        self.inner.brush().width
    }

    /// The frame to paint, or `undefined` with no image loaded.
    pub fn display_frame(&self) -> Result<Option<JsDisplayFrame>, JsValue> {
        self.inner
            .display_frame()
            .map(|frame| frame.map(JsDisplayFrame::from))
            .map_err(|e| fail("display_frame", e))
    }
}

impl JsEditor {
    fn from_config(config: EditorConfig) -> Self {
        Self {
            inner: EditorState::new(config),
        }
    }

    /// The wrapped session.
    #[allow(dead_code)] // Used by native tests
    pub(crate) fn state(&self) -> &EditorState {
        &self.inner
    }
}

fn parse_tool(name: &str) -> Result<ToolKind, String> {
    match name.to_ascii_lowercase().as_str() {
        "none" => Ok(ToolKind::None),
        "select" => Ok(ToolKind::Select),
        "brush" => Ok(ToolKind::Brush),
        "crop" => Ok(ToolKind::Crop),
        _ => Err(format!("Unknown tool: {}", name)),
    }
}

fn tool_name(kind: ToolKind) -> &'static str {
    match kind {
        ToolKind::None => "none",
        ToolKind::Select => "select",
        ToolKind::Brush => "brush",
        ToolKind::Crop => "crop",
    }
}

fn parse_format(name: &str) -> Result<ImageFormat, String> {
    match name.to_ascii_lowercase().as_str() {
        "png" => Ok(ImageFormat::Png),
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        _ => Err(format!("Unsupported export format: {}", name)),
    }
}

fn hex_color(brush: BrushSettings) -> String {
    let [r, g, b] = brush.color;
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}


/// WASM-specific tests that build `JsValue`s.
///
/// Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Serialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Serialize)]
    struct PartialConfig {
        zoom_step: f64,
        jpeg_quality: u8,
    }

    #[wasm_bindgen_test]
    fn test_new_with_partial_config() {
        let config = serde_wasm_bindgen::to_value(&PartialConfig {
            zoom_step: 2.0,
            jpeg_quality: 70,
        })
        .unwrap();

        let editor = JsEditor::new(config).unwrap();

        assert_eq!(editor.state().config().zoom_step, 2.0);
        assert_eq!(editor.state().config().jpeg_quality, 70);
        assert_eq!(editor.state().config().brush, BrushSettings::default());
    }

    #[wasm_bindgen_test]
    fn test_new_with_undefined_config() {
        let editor = JsEditor::new(JsValue::UNDEFINED).unwrap();
        assert_eq!(*editor.state().config(), EditorConfig::default());
    }

    #[wasm_bindgen_test]
    fn test_new_with_invalid_config() {
        let invalid = serde_wasm_bindgen::to_value(&"not a config").unwrap();
        assert!(JsEditor::new(invalid).is_err());
    }

    #[wasm_bindgen_test]
    fn test_import_garbage_fails() {
        let mut editor = JsEditor::with_defaults();
        assert!(editor.import_bytes(&[1, 2, 3, 4]).is_err());
        assert!(!editor.has_image());
    }

    #[wasm_bindgen_test]
    fn test_unknown_tool_fails() {
        let mut editor = JsEditor::with_defaults();
        assert!(editor.activate_tool("lasso").is_err());
    }

    #[wasm_bindgen_test]
    fn test_image_data_length() {
        let mut editor = JsEditor::with_defaults();
        let png = edifyx_core::io::encode(
            &edifyx_core::ImageBuffer::filled(8, 6, [1, 2, 3]),
            ImageFormat::Png,
            90,
        )
        .unwrap();
        editor.import_bytes(&png).unwrap();

        let frame = editor.display_frame().unwrap().unwrap();
        assert_eq!(frame.image_data().length(), 8 * 6 * 4);
    }
}
