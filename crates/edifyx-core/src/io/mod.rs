//! File I/O for the editing core.
//!
//! This module provides functionality for:
//! - Loading PNG and JPEG images from disk or memory, upright per EXIF orientation
//! - Saving the working buffer as PNG or JPEG, chosen by file extension
//!
//! Codecs come from the `image` crate; EXIF parsing from `kamadak-exif`.
//! All operations are synchronous.
//!
//! # Examples
//!
//! ```ignore
//! use edifyx_core::io::{load, save};
//!
//! let image = load("photo.jpg")?;
//! save("photo.png", &image, 90)?;
//! ```

mod decode;
mod encode;
mod orientation;

pub use decode::{decode, load};
pub use encode::{encode, save, ImageFormat};
pub use orientation::{read_orientation, Orientation};
