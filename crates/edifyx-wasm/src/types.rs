//! WASM-compatible wrapper types for display frames.

use edifyx_core::DisplayFrame;
use wasm_bindgen::prelude::*;

/// A display frame for JavaScript, already converted to RGBA.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` and `image_data()` copy
/// it into JavaScript memory.
#[wasm_bindgen]
pub struct JsDisplayFrame {
    width: u32,
    height: u32,
    offset_x: i32,
    offset_y: i32,
    selected: bool,
    rgba: Vec<u8>,
}

#[wasm_bindgen]
impl JsDisplayFrame {
    /// Frame width in display pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in display pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Canvas x of the frame's top-left corner
    #[wasm_bindgen(getter)]
    pub fn offset_x(&self) -> i32 {
        self.offset_x
    }

    /// Canvas y of the frame's top-left corner
    #[wasm_bindgen(getter)]
    pub fn offset_y(&self) -> i32 {
        self.offset_y
    }

    /// Whether to draw the selection border
    #[wasm_bindgen(getter)]
    pub fn selected(&self) -> bool {
        self.selected
    }

    /// Number of bytes in the RGBA buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.rgba.len()
    }

    /// RGBA pixel data as `Uint8Array`.
    pub fn pixels(&self) -> Vec<u8> {
        self.rgba.clone()
    }

    /// RGBA pixel data as `Uint8ClampedArray`, ready for `new ImageData(...)`.
    ///
    /// ```typescript
    /// const frame = editor.display_frame();
    /// if (frame) {
    ///   const data = new ImageData(frame.image_data(), frame.width, frame.height);
    ///   ctx.putImageData(data, frame.offset_x, frame.offset_y);
    /// }
    /// ```
    pub fn image_data(&self) -> js_sys::Uint8ClampedArray {
        js_sys::Uint8ClampedArray::from(self.rgba.as_slice())
    }
}

impl From<DisplayFrame> for JsDisplayFrame {
    fn from(frame: DisplayFrame) -> Self {
        Self {
            width: frame.width,
            height: frame.height,
            offset_x: frame.offset.x,
            offset_y: frame.offset.y,
            selected: frame.selected,
            rgba: frame.to_rgba(),
        }
    }
}
