//! Error and outcome types shared by every editing operation.
//!
//! Editing operations return `Result<Outcome, EditError>`. Failures that the
//! caller must surface to the user (unreadable files, codec failures) are
//! `Err`; operations that simply had nothing to act on return
//! `Ok(Outcome::NothingToDo(..))` so the presentation layer can ignore them.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Recoverable errors reported by the editing core.
#[derive(Debug, Error)]
pub enum EditError {
    /// Import or export target could not be read or written.
    #[error("Invalid file path {}: {reason}", path.display())]
    InvalidFilePath { path: PathBuf, reason: String },

    /// Zero-sized display surface or zero-area region.
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Export target has an extension that no encoder handles.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Bytes could not be decoded as an image.
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// The encoder rejected the image.
    #[error("Failed to encode image: {0}")]
    Encode(String),

    /// Pixel data length does not match the declared dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },
}

/// Why an operation left the editor untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOp {
    /// No image has been imported (or it was cleared).
    NoImageLoaded,
    /// The requested region or display surface has zero area.
    DegenerateGeometry,
    /// A move was requested while the image is not selected.
    NotSelected,
    /// A pointer event arrived with no gesture in progress.
    NoGesture,
    /// Pointer events arrived while no tool is active.
    NoActiveTool,
}

impl fmt::Display for NoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            NoOp::NoImageLoaded => "no image loaded",
            NoOp::DegenerateGeometry => "degenerate geometry",
            NoOp::NotSelected => "image not selected",
            NoOp::NoGesture => "no gesture in progress",
            NoOp::NoActiveTool => "no active tool",
        };
        f.write_str(msg)
    }
}

/// Result of a successful editing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Visible state changed; the presentation layer should fetch a new frame.
    Redraw,
    /// Internal state changed (a gesture started or ended) but nothing visible.
    Handled,
    /// Nothing happened.
    NothingToDo(NoOp),
}

impl Outcome {
    /// True when the caller should repaint.
    pub fn needs_redraw(self) -> bool {
        matches!(self, Outcome::Redraw)
    }

    /// True when the call changed nothing.
    pub fn is_no_op(self) -> bool {
        matches!(self, Outcome::NothingToDo(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_error_display() {
        let err = EditError::InvalidFilePath {
            path: PathBuf::from("/nope/photo.png"),
            reason: "No such file or directory".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid file path /nope/photo.png: No such file or directory"
        );

        let err = EditError::InvalidBuffer {
            expected: 30,
            actual: 29,
        };
        assert_eq!(
            err.to_string(),
            "Invalid pixel data: expected 30 bytes (width * height * 3), got 29"
        );
    }

    #[test]
    fn test_outcome_flags() {
        assert!(Outcome::Redraw.needs_redraw());
        assert!(!Outcome::Handled.needs_redraw());
        assert!(Outcome::NothingToDo(NoOp::NoImageLoaded).is_no_op());
        assert!(!Outcome::Redraw.is_no_op());
    }

    #[test]
    fn test_no_op_display() {
        assert_eq!(NoOp::NoImageLoaded.to_string(), "no image loaded");
        assert_eq!(NoOp::NotSelected.to_string(), "image not selected");
    }
}
