//! Displayable frames derived from the working buffer.

use image::Rgb;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use super::tool::CropGesture;
use super::EditorState;
use crate::buffer::ImageBuffer;
use crate::error::EditError;
use crate::geometry::Point;
use crate::transform::resize;

/// The working buffer as it should appear on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFrame {
    /// Frame width in display pixels.
    pub width: u32,
    /// Frame height in display pixels.
    pub height: u32,
    /// Bytes per row of `pixels`.
    pub stride: usize,
    /// RGB pixel data, row-major.
    pub pixels: Vec<u8>,
    /// Canvas position of the frame's top-left corner.
    pub offset: Point,
    /// Whether the presentation layer should draw a selection border.
    pub selected: bool,
}

impl DisplayFrame {
    fn from_buffer(buffer: ImageBuffer, offset: Point, selected: bool) -> Self {
        Self {
            width: buffer.width,
            height: buffer.height,
            stride: buffer.stride(),
            pixels: buffer.pixels,
            offset,
            selected,
        }
    }

    /// The pixels as opaque RGBA, as canvas `ImageData` expects.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for px in self.pixels.chunks_exact(3) {
            rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        rgba
    }
}

impl EditorState {
    /// Build the frame to show for the current state.
    ///
    /// The working buffer is resampled to the zoomed size. While a crop drag
    /// is in progress, its rectangle is drawn onto the frame; the stored
    /// buffers are never touched. Returns `Ok(None)` with no image loaded.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidBuffer` if the working buffer is malformed.
    pub fn display_frame(&self) -> Result<Option<DisplayFrame>, EditError> {
        let (Some(session), Some(displayed)) = (self.session.as_ref(), self.displayed_size()) else {
            return Ok(None);
        };

        let mut scaled = resize(&session.working, displayed, self.config.display_filter)?;

        if let Some(gesture) = self.tool.crop_gesture() {
            scaled = self.draw_crop_overlay(scaled, gesture)?;
        }

        Ok(Some(DisplayFrame::from_buffer(
            scaled,
            self.view.offset,
            self.view.selected,
        )))
    }

    fn draw_crop_overlay(&self, frame: ImageBuffer, gesture: CropGesture) -> Result<ImageBuffer, EditError> {
        let max_x = frame.width as i32 - 1;
        let max_y = frame.height as i32 - 1;
        let left = gesture.start.x.min(gesture.end.x).clamp(0, max_x);
        let right = gesture.start.x.max(gesture.end.x).clamp(0, max_x);
        let top = gesture.start.y.min(gesture.end.y).clamp(0, max_y);
        let bottom = gesture.start.y.max(gesture.end.y).clamp(0, max_y);

        let mut canvas = frame.to_rgb_image()?;
        let color = Rgb(self.config.crop_overlay_color);

        // Each ring is drawn one pixel further inside the previous one.
        for inset in 0..self.config.crop_overlay_thickness as i32 {
            let width = right - left + 1 - 2 * inset;
            let height = bottom - top + 1 - 2 * inset;
            if width <= 0 || height <= 0 {
                break;
            }
            let rect = Rect::at(left + inset, top + inset).of_size(width as u32, height as u32);
            draw_hollow_rect_mut(&mut canvas, rect, color);
        }

        Ok(ImageBuffer::from_rgb_image(canvas))
    }
}
