//! Drag and resize gestures on the selected shape.
//!
//! A gesture mutates the shape in place on every pointer move. Nothing is
//! recorded until the gesture ends; the outcome returned then is what the
//! history turns into a single command.

use crate::canvas::Canvas;
use crate::selection::{self, ResizeHandle};
use crate::shapes::{ShapeGeometry, ShapeId};
use kurbo::Point;
use log::debug;

/// Gesture in progress, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Moving the whole shape. `last_point` advances on every update.
    Dragging {
        shape_id: ShapeId,
        last_point: Point,
        start_anchor: Point,
    },
    /// Resizing from a handle. `anchor` and `original` stay fixed for the
    /// whole gesture.
    Resizing {
        shape_id: ShapeId,
        handle: ResizeHandle,
        anchor: Point,
        original: ShapeGeometry,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }
}

/// Net effect of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOutcome {
    pub shape_id: ShapeId,
    /// Bounds origin before the drag.
    pub from: Point,
    /// Bounds origin after the drag.
    pub to: Point,
}

/// Net effect of a finished resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeOutcome {
    pub shape_id: ShapeId,
    pub before: ShapeGeometry,
    pub after: ShapeGeometry,
}

impl Canvas {
    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, GestureState::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.gesture, GestureState::Resizing { .. })
    }

    /// Begin moving the selected shape. Returns false if nothing is selected.
    pub fn start_drag(&mut self, point: Point) -> bool {
        let Some(shape) = self.selected_shape() else {
            return false;
        };
        debug!("start drag of {} at {:?}", shape.id(), point);
        self.gesture = GestureState::Dragging {
            shape_id: shape.id(),
            last_point: point,
            start_anchor: shape.anchor(),
        };
        true
    }

    /// Move the dragged shape by the pointer's motion since the last update.
    /// Ignored when no drag is active.
    pub fn update_drag(&mut self, point: Point) {
        let GestureState::Dragging {
            shape_id,
            last_point,
            ..
        } = &mut self.gesture
        else {
            return;
        };
        let delta = point - *last_point;
        *last_point = point;
        let id = *shape_id;
        if let Some(shape) = self.document.get_shape_mut(id) {
            shape.translate(delta);
        }
        self.update_selection_markers();
    }

    /// Finish the drag. Returns its outcome, or None if no drag was active or
    /// the shape did not move.
    pub fn end_drag(&mut self) -> Option<DragOutcome> {
        let GestureState::Dragging {
            shape_id,
            start_anchor,
            ..
        } = std::mem::take(&mut self.gesture)
        else {
            return None;
        };
        let to = self.document.get_shape(shape_id)?.anchor();
        debug!("end drag of {shape_id}: {start_anchor:?} -> {to:?}");
        (to != start_anchor).then_some(DragOutcome {
            shape_id,
            from: start_anchor,
            to,
        })
    }

    /// Begin resizing the selected shape from `handle`. Returns false if
    /// nothing is selected.
    pub fn start_resize(&mut self, handle: ResizeHandle, point: Point) -> bool {
        let Some(shape) = self.selected_shape() else {
            return false;
        };
        debug!("start resize of {} from {:?}", shape.id(), handle);
        self.gesture = GestureState::Resizing {
            shape_id: shape.id(),
            handle,
            anchor: point,
            original: shape.geometry(),
        };
        true
    }

    /// Recompute the resized geometry from the gesture's snapshot and the
    /// total pointer delta. Ignored when no resize is active.
    pub fn update_resize(&mut self, point: Point) {
        let GestureState::Resizing {
            shape_id,
            handle,
            anchor,
            original,
        } = &self.gesture
        else {
            return;
        };
        let geometry =
            selection::resize_geometry(original, *handle, point - *anchor, &self.resize_limits);
        let id = *shape_id;
        if let Some(shape) = self.document.get_shape_mut(id) {
            shape.set_geometry(&geometry);
        }
        self.update_selection_markers();
    }

    /// Finish the resize. Returns its outcome, or None if no resize was active
    /// or the geometry did not change.
    pub fn end_resize(&mut self) -> Option<ResizeOutcome> {
        let GestureState::Resizing {
            shape_id, original, ..
        } = std::mem::take(&mut self.gesture)
        else {
            return None;
        };
        let after = self.document.get_shape(shape_id)?.geometry();
        debug!("end resize of {shape_id}");
        (after != original).then_some(ResizeOutcome {
            shape_id,
            before: original,
            after,
        })
    }

    /// Drop the gesture without touching the shape.
    pub fn cancel_gesture(&mut self) {
        self.gesture = GestureState::Idle;
    }

    /// Drop the gesture and put the shape back where it was when the gesture
    /// started.
    pub fn revert_gesture(&mut self) {
        match std::mem::take(&mut self.gesture) {
            GestureState::Idle => return,
            GestureState::Dragging {
                shape_id,
                start_anchor,
                ..
            } => {
                if let Some(shape) = self.document.get_shape_mut(shape_id) {
                    shape.move_to(start_anchor);
                }
            }
            GestureState::Resizing {
                shape_id, original, ..
            } => {
                if let Some(shape) = self.document.get_shape_mut(shape_id) {
                    shape.set_geometry(&original);
                }
            }
        }
        debug!("gesture reverted");
        self.update_selection_markers();
    }
}
