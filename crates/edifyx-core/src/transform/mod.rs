//! Pixel transforms applied to the working buffer.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Crop rectangles are in pixels of the buffer being cropped
//! - Origin is top-left corner

mod crop;
mod resize;
mod rotation;

pub use crop::crop_to_rect;
pub use resize::{resize, zoomed_size, ResampleFilter};
pub use rotation::{apply_rotation, is_whole_turn, EdgeFill, InterpolationFilter};
