//! Edify-X Core - Image editing library
//!
//! This crate provides the editing core for Edify-X: an editor session that
//! holds the original and working buffers and applies move, zoom, crop,
//! brush, rotation and hue/saturation/luminosity edits driven by pointer and
//! slider events from a presentation layer.
//!
//! # Module Structure
//!
//! - `editor` - The editing session, tool modes and display frames
//! - `geometry` - Display-space to image-space coordinate mapping
//! - `transform` - Crop, rotation and display resampling
//! - `brush` - Freehand stroke rendering
//! - `adjustments` - HSV color adjustments
//! - `io` - PNG/JPEG load and save
//! - `config` - Editor tunables
//! - `error` - Error and outcome types
//!
//! # Usage
//!
//! ```ignore
//! use edifyx_core::{EditorState, EditorConfig, Point, ToolKind};
//!
//! let mut editor = EditorState::new(EditorConfig::default());
//! editor.import("photo.jpg")?;
//! editor.activate_tool(ToolKind::Crop);
//! editor.pointer_press(Point::new(10, 10))?;
//! editor.pointer_move(Point::new(200, 120))?;
//! editor.pointer_release(Point::new(200, 120))?;
//! editor.export("photo_cropped.png")?;
//! ```

pub mod adjustments;
pub mod brush;
pub mod buffer;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod io;
pub mod transform;

pub use adjustments::ColorAdjustments;
pub use brush::BrushSettings;
pub use buffer::ImageBuffer;
pub use config::EditorConfig;
pub use editor::{DisplayFrame, EditorState, ToolKind, ToolMode, ViewState};
pub use error::{EditError, NoOp, Outcome};
pub use geometry::{to_image_space, PixelRect, Point, Size};
pub use io::ImageFormat;
pub use transform::{EdgeFill, InterpolationFilter, ResampleFilter};
