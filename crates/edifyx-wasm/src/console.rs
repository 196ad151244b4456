//! Browser console reporting.
//!
//! Calls into `web_sys::console` only exist on wasm32; elsewhere (native unit
//! tests) messages are dropped.

use edifyx_core::{EditError, Outcome};
use wasm_bindgen::JsValue;

/// Log a debug line when an operation did nothing. Returns whether the
/// caller should repaint.
pub(crate) fn report(op: &str, outcome: Outcome) -> bool {
    if let Outcome::NothingToDo(reason) = outcome {
        debug(&format!("edifyx: {}: {}", op, reason));
    }
    outcome.needs_redraw()
}

/// Warn about a failed operation and convert the error for JavaScript.
pub(crate) fn fail(op: &str, err: EditError) -> JsValue {
    let message = format!("{} failed: {}", op, err);
    warn(&message);
    JsValue::from_str(&message)
}

#[cfg(target_arch = "wasm32")]
fn debug(message: &str) {
    web_sys::console::debug_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn debug(_message: &str) {}

#[cfg(target_arch = "wasm32")]
pub(crate) fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn warn(_message: &str) {}

#[cfg(test)]
mod tests {
    use super::*;
    use edifyx_core::NoOp;

    #[test]
    fn test_report_redraw_flag() {
        assert!(report("zoom_in", Outcome::Redraw));
        assert!(!report("pointer_release", Outcome::Handled));
        assert!(!report("crop", Outcome::NothingToDo(NoOp::DegenerateGeometry)));
    }
}
