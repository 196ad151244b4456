//! Tool modes and pointer dispatch.
//!
//! Exactly one [`ToolMode`] is active at a time and each variant carries its
//! own gesture state. The presentation layer forwards every pointer event to
//! [`EditorState::pointer_press`], [`EditorState::pointer_move`] or
//! [`EditorState::pointer_release`]; the active mode decides what happens.
//!
//! Pointer positions are canvas coordinates. The image is drawn with its
//! top-left corner at the view offset, so handlers first convert to points
//! relative to the displayed image.

use serde::{Deserialize, Serialize};

use super::EditorState;
use crate::brush::draw_segment;
use crate::error::{EditError, NoOp, Outcome};
use crate::geometry::{to_image_space, Point, Size};

/// Tool identifiers, without gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    None,
    Select,
    Brush,
    Crop,
}

/// An in-progress crop drag, in coordinates relative to the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropGesture {
    pub start: Point,
    pub end: Point,
}

/// The active tool and its gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    /// Pointer events are ignored.
    #[default]
    None,
    /// Dragging moves the selected image.
    Select {
        /// Canvas point of the previous drag event.
        drag_anchor: Option<Point>,
    },
    /// Dragging paints into the working buffer.
    Brush {
        /// Image-space end of the last drawn segment.
        last_point: Option<Point>,
    },
    /// Dragging outlines a crop rectangle; release applies it.
    Crop { gesture: Option<CropGesture> },
}

impl ToolMode {
    /// Idle state for a tool.
    pub fn idle(kind: ToolKind) -> Self {
        match kind {
            ToolKind::None => ToolMode::None,
            ToolKind::Select => ToolMode::Select { drag_anchor: None },
            ToolKind::Brush => ToolMode::Brush { last_point: None },
            ToolKind::Crop => ToolMode::Crop { gesture: None },
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolMode::None => ToolKind::None,
            ToolMode::Select { .. } => ToolKind::Select,
            ToolMode::Brush { .. } => ToolKind::Brush,
            ToolMode::Crop { .. } => ToolKind::Crop,
        }
    }

    /// True while a press has not yet been released.
    pub fn has_gesture(&self) -> bool {
        match self {
            ToolMode::None => false,
            ToolMode::Select { drag_anchor } => drag_anchor.is_some(),
            ToolMode::Brush { last_point } => last_point.is_some(),
            ToolMode::Crop { gesture } => gesture.is_some(),
        }
    }

    /// The crop rectangle being dragged, if any.
    pub fn crop_gesture(&self) -> Option<CropGesture> {
        match self {
            ToolMode::Crop { gesture } => *gesture,
            _ => None,
        }
    }
}

fn contains(size: Size, local: Point) -> bool {
    local.x >= 0 && local.y >= 0 && (local.x as u32) < size.width && (local.y as u32) < size.height
}

impl EditorState {
    /// Switch tools, discarding any unfinished gesture.
    ///
    /// Activating Select marks the image as selected; any other tool clears
    /// the selection.
    pub fn activate_tool(&mut self, kind: ToolKind) -> Outcome {
        if self.tool.has_gesture() {
            tracing::debug!(tool = ?self.tool.kind(), "discarding unfinished gesture");
        }
        self.tool = ToolMode::idle(kind);
        self.view.selected = kind == ToolKind::Select;
        tracing::debug!(tool = ?kind, "tool activated");
        Outcome::Redraw
    }

    /// Activate the select tool.
    pub fn select(&mut self) -> Outcome {
        self.activate_tool(ToolKind::Select)
    }

    /// Drop the selection and switch to no active tool.
    pub fn deselect(&mut self) -> Outcome {
        self.activate_tool(ToolKind::None)
    }

    /// Move the image placement by `delta` canvas pixels.
    ///
    /// Only allowed while the image is selected.
    pub fn move_by(&mut self, delta: Point) -> Outcome {
        if self.session.is_none() {
            return self.no_op("move", NoOp::NoImageLoaded);
        }
        if !self.view.selected {
            return self.no_op("move", NoOp::NotSelected);
        }
        self.view.offset += delta;
        Outcome::Redraw
    }

    /// Route a pointer press to the active tool.
    ///
    /// # Errors
    ///
    /// Propagates pixel buffer errors from the brush.
    pub fn pointer_press(&mut self, canvas_point: Point) -> Result<Outcome, EditError> {
        let Some(displayed) = self.displayed_size() else {
            return Ok(self.no_op("pointer_press", NoOp::NoImageLoaded));
        };
        let local = self.view.to_local(canvas_point);

        match self.tool {
            ToolMode::None => Ok(self.no_op("pointer_press", NoOp::NoActiveTool)),
            ToolMode::Select { .. } => {
                if contains(displayed, local) {
                    self.tool = ToolMode::Select {
                        drag_anchor: Some(canvas_point),
                    };
                    tracing::debug!(?canvas_point, "drag started");
                    Ok(Outcome::Handled)
                } else {
                    tracing::debug!(?canvas_point, "press outside image, deselecting");
                    Ok(self.deselect())
                }
            }
            ToolMode::Brush { .. } => {
                let point = match self.map_to_buffer(local, displayed) {
                    Some(point) => point,
                    None => return Ok(self.no_op("pointer_press", NoOp::DegenerateGeometry)),
                };
                self.tool = ToolMode::Brush {
                    last_point: Some(point),
                };
                tracing::debug!(?point, "stroke started");
                Ok(Outcome::Handled)
            }
            ToolMode::Crop { .. } => {
                self.tool = ToolMode::Crop {
                    gesture: Some(CropGesture {
                        start: local,
                        end: local,
                    }),
                };
                tracing::debug!(start = ?local, "crop drag started");
                Ok(Outcome::Redraw)
            }
        }
    }

    /// Route a pointer move to the active tool.
    ///
    /// # Errors
    ///
    /// Propagates pixel buffer errors from the brush.
    pub fn pointer_move(&mut self, canvas_point: Point) -> Result<Outcome, EditError> {
        let Some(displayed) = self.displayed_size() else {
            return Ok(self.no_op("pointer_move", NoOp::NoImageLoaded));
        };
        let local = self.view.to_local(canvas_point);

        match self.tool {
            ToolMode::None => Ok(self.no_op("pointer_move", NoOp::NoActiveTool)),
            ToolMode::Select { drag_anchor: None }
            | ToolMode::Brush { last_point: None }
            | ToolMode::Crop { gesture: None } => Ok(self.no_op("pointer_move", NoOp::NoGesture)),
            ToolMode::Select {
                drag_anchor: Some(anchor),
            } => {
                self.tool = ToolMode::Select {
                    drag_anchor: Some(canvas_point),
                };
                Ok(self.move_by(canvas_point - anchor))
            }
            ToolMode::Brush {
                last_point: Some(last),
            } => {
                let point = match self.map_to_buffer(local, displayed) {
                    Some(point) => point,
                    None => return Ok(self.no_op("pointer_move", NoOp::DegenerateGeometry)),
                };
                self.commit_adjustments();
                let brush = self.brush;
                if let Some(session) = self.session.as_mut() {
                    draw_segment(&mut session.working, last, point, &brush)?;
                }
                self.tool = ToolMode::Brush {
                    last_point: Some(point),
                };
                Ok(Outcome::Redraw)
            }
            ToolMode::Crop {
                gesture: Some(gesture),
            } => {
                self.tool = ToolMode::Crop {
                    gesture: Some(CropGesture { end: local, ..gesture }),
                };
                Ok(Outcome::Redraw)
            }
        }
    }

    /// Route a pointer release to the active tool.
    ///
    /// Releasing a crop drag applies the crop.
    ///
    /// # Errors
    ///
    /// Currently infallible; the signature matches the other pointer events.
    pub fn pointer_release(&mut self, canvas_point: Point) -> Result<Outcome, EditError> {
        if self.session.is_none() {
            return Ok(self.no_op("pointer_release", NoOp::NoImageLoaded));
        }
        let local = self.view.to_local(canvas_point);

        match self.tool {
            ToolMode::None => Ok(self.no_op("pointer_release", NoOp::NoActiveTool)),
            ToolMode::Select { drag_anchor: None }
            | ToolMode::Brush { last_point: None }
            | ToolMode::Crop { gesture: None } => {
                Ok(self.no_op("pointer_release", NoOp::NoGesture))
            }
            ToolMode::Select { .. } => {
                self.tool = ToolMode::Select { drag_anchor: None };
                tracing::debug!("drag finished");
                Ok(Outcome::Handled)
            }
            ToolMode::Brush { .. } => {
                self.tool = ToolMode::Brush { last_point: None };
                tracing::debug!("stroke finished");
                Ok(Outcome::Handled)
            }
            ToolMode::Crop {
                gesture: Some(gesture),
            } => {
                self.tool = ToolMode::Crop { gesture: None };
                match self.crop(gesture.start, local) {
                    // The preview rectangle still has to disappear.
                    Outcome::NothingToDo(_) => Ok(Outcome::Redraw),
                    outcome => Ok(outcome),
                }
            }
        }
    }

    fn map_to_buffer(&self, local: Point, displayed: Size) -> Option<Point> {
        let buffer = self.session.as_ref()?.working.size();
        to_image_space(local, displayed, buffer).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ImageBuffer;
    use crate::config::EditorConfig;

    const WHITE: [u8; 3] = [255, 255, 255];

    fn editor_with(width: u32, height: u32) -> EditorState {
        let mut editor = EditorState::new(EditorConfig::default());
        editor
            .load_image(ImageBuffer::filled(width, height, WHITE))
            .unwrap();
        editor
    }

    #[test]
    fn test_tool_kind_round_trip() {
        for kind in [ToolKind::None, ToolKind::Select, ToolKind::Brush, ToolKind::Crop] {
            assert_eq!(ToolMode::idle(kind).kind(), kind);
            assert!(!ToolMode::idle(kind).has_gesture());
        }
    }

    #[test]
    fn test_pointer_without_image() {
        let mut editor = EditorState::default();
        editor.activate_tool(ToolKind::Brush);
        assert_eq!(
            editor.pointer_press(Point::new(1, 1)).unwrap(),
            Outcome::NothingToDo(NoOp::NoImageLoaded)
        );
    }

    #[test]
    fn test_pointer_without_tool() {
        let mut editor = editor_with(10, 10);
        assert_eq!(
            editor.pointer_press(Point::new(1, 1)).unwrap(),
            Outcome::NothingToDo(NoOp::NoActiveTool)
        );
        assert_eq!(
            editor.pointer_move(Point::new(2, 2)).unwrap(),
            Outcome::NothingToDo(NoOp::NoActiveTool)
        );
    }

    #[test]
    fn test_move_without_press() {
        let mut editor = editor_with(10, 10);
        editor.activate_tool(ToolKind::Crop);
        assert_eq!(
            editor.pointer_move(Point::new(2, 2)).unwrap(),
            Outcome::NothingToDo(NoOp::NoGesture)
        );
        assert_eq!(
            editor.pointer_release(Point::new(2, 2)).unwrap(),
            Outcome::NothingToDo(NoOp::NoGesture)
        );
    }

    #[test]
    fn test_select_drag_moves_image() {
        let mut editor = editor_with(20, 20);
        editor.select();
        assert!(editor.view().selected);

        assert_eq!(editor.pointer_press(Point::new(5, 5)).unwrap(), Outcome::Handled);
        assert_eq!(editor.pointer_move(Point::new(8, 9)).unwrap(), Outcome::Redraw);
        assert_eq!(editor.pointer_move(Point::new(10, 9)).unwrap(), Outcome::Redraw);
        assert_eq!(editor.pointer_release(Point::new(10, 9)).unwrap(), Outcome::Handled);

        assert_eq!(editor.view().offset, Point::new(5, 4));
        assert_eq!(editor.tool(), ToolMode::Select { drag_anchor: None });
    }

    #[test]
    fn test_press_outside_deselects() {
        let mut editor = editor_with(20, 20);
        editor.select();

        assert_eq!(editor.pointer_press(Point::new(25, 5)).unwrap(), Outcome::Redraw);
        assert!(!editor.view().selected);
        assert_eq!(editor.tool(), ToolMode::None);
    }

    #[test]
    fn test_press_uses_offset() {
        let mut editor = editor_with(20, 20);
        editor.select();
        editor.move_by(Point::new(100, 100));

        // Inside the moved image
        assert_eq!(editor.pointer_press(Point::new(105, 105)).unwrap(), Outcome::Handled);
        editor.pointer_release(Point::new(105, 105)).unwrap();

        // Where the image used to be
        editor.pointer_press(Point::new(5, 5)).unwrap();
        assert!(!editor.view().selected);
    }

    #[test]
    fn test_move_requires_selection() {
        let mut editor = editor_with(10, 10);
        assert_eq!(
            editor.move_by(Point::new(3, 3)),
            Outcome::NothingToDo(NoOp::NotSelected)
        );
        assert_eq!(editor.view().offset, Point::ORIGIN);
    }

    #[test]
    fn test_deselect_switches_to_no_tool() {
        let mut editor = editor_with(10, 10);
        editor.activate_tool(ToolKind::Crop);

        assert_eq!(editor.deselect(), Outcome::Redraw);
        assert_eq!(editor.tool(), ToolMode::None);
        assert!(!editor.view().selected);
    }

    #[test]
    fn test_leaving_select_clears_selection() {
        let mut editor = editor_with(10, 10);
        editor.select();
        editor.activate_tool(ToolKind::Brush);
        assert!(!editor.view().selected);
    }

    #[test]
    fn test_brush_stroke_paints() {
        let mut editor = editor_with(50, 50);
        editor.set_brush(crate::brush::BrushSettings::new([255, 0, 0], 1));
        editor.activate_tool(ToolKind::Brush);

        assert_eq!(editor.pointer_press(Point::new(10, 10)).unwrap(), Outcome::Handled);
        assert_eq!(editor.pointer_move(Point::new(20, 10)).unwrap(), Outcome::Redraw);
        assert_eq!(editor.pointer_release(Point::new(20, 10)).unwrap(), Outcome::Handled);

        let working = editor.working().unwrap();
        assert_eq!(working.pixel(15, 10), Some([255, 0, 0]));
        assert_eq!(working.pixel(15, 12), Some(WHITE));
        assert_eq!(editor.tool(), ToolMode::Brush { last_point: None });
    }

    #[test]
    fn test_brush_maps_through_zoom() {
        let mut editor = editor_with(50, 50);
        editor.set_brush(crate::brush::BrushSettings::new([0, 0, 0], 3));
        editor.activate_tool(ToolKind::Brush);
        editor.zoom_in();
        editor.zoom_in();

        // The middle of the zoomed display is the middle of the image
        let displayed = editor.displayed_size().unwrap();
        assert!(displayed.width > 50);
        let middle = Point::new(displayed.width as i32 / 2, displayed.height as i32 / 2);
        editor.pointer_press(middle).unwrap();
        editor.pointer_move(middle).unwrap();

        assert_eq!(editor.working().unwrap().pixel(25, 25), Some([0, 0, 0]));
    }

    #[test]
    fn test_switching_tool_discards_stroke() {
        let mut editor = editor_with(20, 20);
        editor.activate_tool(ToolKind::Brush);
        editor.pointer_press(Point::new(1, 1)).unwrap();

        editor.activate_tool(ToolKind::Crop);
        assert_eq!(editor.tool(), ToolMode::Crop { gesture: None });
        assert_eq!(
            editor.pointer_move(Point::new(5, 5)).unwrap(),
            Outcome::NothingToDo(NoOp::NoGesture)
        );
        assert!(editor.working().unwrap().pixels.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_crop_drag_applies_on_release() {
        let mut editor = editor_with(40, 30);
        editor.activate_tool(ToolKind::Crop);

        assert_eq!(editor.pointer_press(Point::new(30, 20)).unwrap(), Outcome::Redraw);
        editor.pointer_move(Point::new(15, 12)).unwrap();
        assert_eq!(
            editor.tool().crop_gesture(),
            Some(CropGesture {
                start: Point::new(30, 20),
                end: Point::new(15, 12),
            })
        );
        // Still uncropped mid-drag
        assert_eq!(editor.working().unwrap().size(), Size::new(40, 30));

        assert_eq!(editor.pointer_release(Point::new(10, 10)).unwrap(), Outcome::Redraw);
        assert_eq!(editor.working().unwrap().size(), Size::new(20, 10));
        // Crop tool stays active for the next rectangle
        assert_eq!(editor.tool(), ToolMode::Crop { gesture: None });
    }

    #[test]
    fn test_crop_click_without_drag_is_harmless() {
        let mut editor = editor_with(40, 30);
        editor.activate_tool(ToolKind::Crop);

        editor.pointer_press(Point::new(10, 10)).unwrap();
        assert_eq!(editor.pointer_release(Point::new(10, 10)).unwrap(), Outcome::Redraw);
        assert_eq!(editor.working().unwrap().size(), Size::new(40, 30));
    }
}
