//! Reversible edits.

use crate::canvas::Canvas;
use crate::factory;
use crate::shapes::{Shape, ShapeGeometry, ShapeId, ShapeStyle};
use kurbo::Point;
use thiserror::Error;

/// Why a command could not be applied or reverted.
///
/// A failing command leaves the canvas untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("shape {0} is not on the canvas")]
    ShapeNotFound(ShapeId),
    #[error("shape {0} is already on the canvas")]
    DuplicateShape(ShapeId),
    #[error("geometry does not fit shape {0}")]
    GeometryMismatch(ShapeId),
}

/// One completed user action, with everything needed to undo it.
///
/// Commands refer to shapes by id, so they stay valid while other commands
/// add or remove shapes around them.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append a shape and select it.
    AddShape { shape: Shape },
    /// Remove a shape. `index` is its position in paint order, used to put it
    /// back in the same place.
    RemoveShape { shape: Shape, index: usize },
    /// Move a shape so its bounds origin goes from `from` to `to`.
    MoveShape {
        shape_id: ShapeId,
        from: Point,
        to: Point,
    },
    /// Replace a shape's geometry.
    ResizeShape {
        shape_id: ShapeId,
        before: ShapeGeometry,
        after: ShapeGeometry,
    },
    /// Replace a shape's visual properties.
    ChangeProperties {
        shape_id: ShapeId,
        before: ShapeStyle,
        after: ShapeStyle,
    },
}

impl Command {
    /// Build a removal command for a shape currently on the canvas.
    pub fn remove(canvas: &Canvas, shape_id: ShapeId) -> Result<Self, CommandError> {
        let index = canvas
            .document
            .index_of(shape_id)
            .ok_or(CommandError::ShapeNotFound(shape_id))?;
        let shape = canvas.document.shapes()[index].clone();
        Ok(Command::RemoveShape { shape, index })
    }

    /// Short description for status text and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Command::AddShape { .. } => "Add shape",
            Command::RemoveShape { .. } => "Delete shape",
            Command::MoveShape { .. } => "Move shape",
            Command::ResizeShape { .. } => "Resize shape",
            Command::ChangeProperties { .. } => "Change properties",
        }
    }

    /// The shape this command acts on.
    pub fn shape_id(&self) -> ShapeId {
        match self {
            Command::AddShape { shape } | Command::RemoveShape { shape, .. } => shape.id(),
            Command::MoveShape { shape_id, .. }
            | Command::ResizeShape { shape_id, .. }
            | Command::ChangeProperties { shape_id, .. } => *shape_id,
        }
    }

    /// Perform the command.
    pub fn apply(&self, canvas: &mut Canvas) -> Result<(), CommandError> {
        match self {
            Command::AddShape { shape } => {
                let end = canvas.document.len();
                insert(canvas, end, shape)
            }
            Command::RemoveShape { shape, .. } => remove(canvas, shape.id()),
            Command::MoveShape { shape_id, to, .. } => move_shape(canvas, *shape_id, *to),
            Command::ResizeShape {
                shape_id, after, ..
            } => set_geometry(canvas, *shape_id, after),
            Command::ChangeProperties {
                shape_id, after, ..
            } => set_properties(canvas, *shape_id, after),
        }
    }

    /// Undo the command.
    pub fn revert(&self, canvas: &mut Canvas) -> Result<(), CommandError> {
        match self {
            Command::AddShape { shape } => remove(canvas, shape.id()),
            Command::RemoveShape { shape, index } => insert(canvas, *index, shape),
            Command::MoveShape { shape_id, from, .. } => move_shape(canvas, *shape_id, *from),
            Command::ResizeShape {
                shape_id, before, ..
            } => set_geometry(canvas, *shape_id, before),
            Command::ChangeProperties {
                shape_id, before, ..
            } => set_properties(canvas, *shape_id, before),
        }
    }
}

fn insert(canvas: &mut Canvas, index: usize, shape: &Shape) -> Result<(), CommandError> {
    let id = shape.id();
    if canvas.document.contains(id) {
        return Err(CommandError::DuplicateShape(id));
    }
    canvas.document.insert_shape(index, shape.clone());
    canvas.select(id);
    Ok(())
}

fn remove(canvas: &mut Canvas, id: ShapeId) -> Result<(), CommandError> {
    canvas
        .document
        .remove_shape(id)
        .ok_or(CommandError::ShapeNotFound(id))?;
    canvas.clear_selection();
    Ok(())
}

fn move_shape(canvas: &mut Canvas, id: ShapeId, target: Point) -> Result<(), CommandError> {
    let shape = canvas
        .document
        .get_shape_mut(id)
        .ok_or(CommandError::ShapeNotFound(id))?;
    shape.move_to(target);
    canvas.update_selection_markers();
    Ok(())
}

fn set_geometry(
    canvas: &mut Canvas,
    id: ShapeId,
    geometry: &ShapeGeometry,
) -> Result<(), CommandError> {
    let shape = canvas
        .document
        .get_shape_mut(id)
        .ok_or(CommandError::ShapeNotFound(id))?;
    if !shape.set_geometry(geometry) {
        return Err(CommandError::GeometryMismatch(id));
    }
    canvas.update_selection_markers();
    Ok(())
}

fn set_properties(
    canvas: &mut Canvas,
    id: ShapeId,
    properties: &ShapeStyle,
) -> Result<(), CommandError> {
    let shape = canvas
        .document
        .get_shape_mut(id)
        .ok_or(CommandError::ShapeNotFound(id))?;
    factory::apply_properties(shape, properties);
    canvas.select(id);
    Ok(())
}
