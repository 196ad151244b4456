//! Edify-X WASM - WebAssembly bindings for the Edify-X editing core
//!
//! This crate exposes an editing session to a browser-based presentation
//! layer. JavaScript forwards toolbar clicks, slider changes and pointer
//! events; the session answers whether to repaint and hands back RGBA frames.
//!
//! # Module Structure
//!
//! - `editor` - The `JsEditor` session wrapper
//! - `types` - WASM-compatible display frame
//! - `console` - No-op and failure reporting to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditor } from '@edifyx/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsEditor(undefined);
//! editor.import_bytes(new Uint8Array(await file.arrayBuffer()));
//! editor.zoom_in();
//! const frame = editor.display_frame();
//! ```

use wasm_bindgen::prelude::*;

mod console;
mod editor;
mod types;

pub use editor::JsEditor;
pub use types::JsDisplayFrame;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: install a panic hook for readable errors in the browser console
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
