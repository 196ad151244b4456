//! EXIF orientation handling on import.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;

/// How the camera stored the picture relative to upright, from the EXIF
/// `Orientation` tag (values 1-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Upright,
    Mirrored,
    UpsideDown,
    MirroredUpsideDown,
    /// Mirrored, then turned a quarter clockwise.
    MirroredQuarterCw,
    /// Needs a quarter turn clockwise.
    QuarterCw,
    /// Mirrored, then turned a quarter counter-clockwise.
    MirroredQuarterCcw,
    /// Needs a quarter turn counter-clockwise.
    QuarterCcw,
}

impl Orientation {
    /// Map a tag value; unknown values are treated as upright.
    pub fn from_tag(value: u32) -> Self {
        match value {
            2 => Self::Mirrored,
            3 => Self::UpsideDown,
            4 => Self::MirroredUpsideDown,
            5 => Self::MirroredQuarterCw,
            6 => Self::QuarterCw,
            7 => Self::MirroredQuarterCcw,
            8 => Self::QuarterCcw,
            _ => Self::Upright,
        }
    }

    /// Turn a decoded image upright.
    pub fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Self::Upright => img,
            Self::Mirrored => img.fliph(),
            Self::UpsideDown => img.rotate180(),
            Self::MirroredUpsideDown => img.flipv(),
            Self::MirroredQuarterCw => img.rotate90().fliph(),
            Self::QuarterCw => img.rotate90(),
            Self::MirroredQuarterCcw => img.rotate270().fliph(),
            Self::QuarterCcw => img.rotate270(),
        }
    }
}

/// Read the EXIF orientation tag from encoded image bytes.
///
/// Images without EXIF data, or without the tag, are upright.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Upright;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from_tag)
        .unwrap_or_default()
}
