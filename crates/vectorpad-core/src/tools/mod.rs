//! Drawing tools.

use crate::factory;
use crate::geometry::{normalize_draw_rect, normalize_square};
use crate::shapes::{MIN_POLYGON_POINTS, Polygon, Shape, ShapeGeometry, ShapeKind, ShapeStyle};
use kurbo::{Point, Rect};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by drawing tools.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("a polygon needs at least 3 points, got {0}")]
    NotEnoughPolygonPoints(usize),
}

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Line,
    Rectangle,
    Square,
    Ellipse,
    Circle,
    Polygon,
}

impl ToolKind {
    /// The shape kind this tool draws, if any.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Select => None,
            ToolKind::Line => Some(ShapeKind::Line),
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Square => Some(ShapeKind::Square),
            ToolKind::Ellipse => Some(ShapeKind::Ellipse),
            ToolKind::Circle => Some(ShapeKind::Circle),
            ToolKind::Polygon => Some(ShapeKind::Polygon),
        }
    }

    pub fn name(self) -> &'static str {
        match self.shape_kind() {
            Some(kind) => kind.name(),
            None => "Select",
        }
    }
}

impl From<ShapeKind> for ToolKind {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Line => ToolKind::Line,
            ShapeKind::Rectangle => ToolKind::Rectangle,
            ShapeKind::Square => ToolKind::Square,
            ShapeKind::Ellipse => ToolKind::Ellipse,
            ShapeKind::Circle => ToolKind::Circle,
            ShapeKind::Polygon => ToolKind::Polygon,
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// A drag-drawn shape is in progress.
    Active {
        /// Starting point of the drag.
        start: Point,
        /// Shape being drawn. Its id becomes the committed shape's id.
        preview: Shape,
    },
    /// Polygon vertices placed so far.
    Polygon {
        points: Vec<Point>,
        /// Last pointer position, used for the rubber-band edge.
        cursor: Option<Point>,
    },
}

/// Manages the current tool, its state and the properties for new shapes.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
    /// Properties applied to new shapes.
    pub current_style: ShapeStyle,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool. Anything drawn but not finished is discarded.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.is_active() {
            debug!("discarding in-progress {} drawing", self.current_tool.name());
        }
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// Begin a drag-drawn shape. Ignored for the select and polygon tools.
    pub fn begin(&mut self, point: Point) {
        let Some(kind) = self.current_tool.shape_kind() else {
            return;
        };
        if kind == ShapeKind::Polygon {
            return;
        }
        let mut preview = factory::create_styled(kind, &self.current_style);
        preview.set_geometry(&drag_geometry(kind, point, point));
        self.state = ToolState::Active {
            start: point,
            preview,
        };
    }

    /// Update the in-progress shape.
    pub fn update(&mut self, point: Point) {
        let Some(kind) = self.current_tool.shape_kind() else {
            return;
        };
        match &mut self.state {
            ToolState::Active { start, preview } => {
                preview.set_geometry(&drag_geometry(kind, *start, point));
            }
            ToolState::Polygon { cursor, .. } => *cursor = Some(point),
            ToolState::Idle => {}
        }
    }

    /// End a drag-drawn shape and return it.
    pub fn end(&mut self, point: Point) -> Option<Shape> {
        if !matches!(self.state, ToolState::Active { .. }) {
            return None;
        }
        self.update(point);
        match std::mem::take(&mut self.state) {
            ToolState::Active { preview, .. } => Some(preview),
            _ => None,
        }
    }

    /// Place a polygon vertex.
    ///
    /// Clicking within `close_distance` of the first vertex, once enough
    /// vertices exist, finishes the polygon instead and returns it.
    pub fn add_polygon_point(
        &mut self,
        point: Point,
        close_distance: f64,
    ) -> Result<Option<Shape>, ToolError> {
        if self.current_tool != ToolKind::Polygon {
            return Ok(None);
        }
        match &mut self.state {
            ToolState::Polygon { points, cursor } => {
                let closes = points.len() >= MIN_POLYGON_POINTS
                    && points
                        .first()
                        .is_some_and(|first| first.distance(point) <= close_distance);
                if closes {
                    return self.finish_polygon();
                }
                points.push(point);
                *cursor = None;
            }
            _ => {
                self.state = ToolState::Polygon {
                    points: vec![point],
                    cursor: None,
                };
            }
        }
        Ok(None)
    }

    /// Finish the polygon in progress.
    ///
    /// Returns `Ok(None)` if no polygon is being drawn. With too few vertices
    /// the polygon is discarded and an error is returned.
    pub fn finish_polygon(&mut self) -> Result<Option<Shape>, ToolError> {
        let ToolState::Polygon { points, .. } = std::mem::take(&mut self.state) else {
            return Ok(None);
        };
        if points.len() < MIN_POLYGON_POINTS {
            warn!("discarding polygon with {} points", points.len());
            return Err(ToolError::NotEnoughPolygonPoints(points.len()));
        }
        let mut shape = factory::create_styled(ShapeKind::Polygon, &self.current_style);
        shape.set_geometry(&ShapeGeometry::Points(points));
        Ok(Some(shape))
    }

    /// Vertices of the polygon being drawn.
    pub fn polygon_points(&self) -> &[Point] {
        match &self.state {
            ToolState::Polygon { points, .. } => points,
            _ => &[],
        }
    }

    /// Cancel the current interaction.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Check if a tool interaction is active.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ToolState::Idle)
    }

    /// Get the preview shape for the current interaction.
    ///
    /// A polygon preview includes the pointer position as a trailing vertex.
    pub fn preview_shape(&self) -> Option<Shape> {
        match &self.state {
            ToolState::Idle => None,
            ToolState::Active { preview, .. } => Some(preview.clone()),
            ToolState::Polygon { points, cursor } => {
                let mut points = points.clone();
                points.extend(*cursor);
                let mut polygon = Polygon::new(points);
                polygon.style = factory::effective_style(ShapeKind::Polygon, &self.current_style);
                Some(polygon.into())
            }
        }
    }
}

/// Geometry of a shape of `kind` drawn by dragging from `start` to `end`.
fn drag_geometry(kind: ShapeKind, start: Point, end: Point) -> ShapeGeometry {
    match kind {
        ShapeKind::Line => ShapeGeometry::Segment { start, end },
        ShapeKind::Square | ShapeKind::Circle => box_geometry(normalize_square(start, end)),
        ShapeKind::Rectangle | ShapeKind::Ellipse | ShapeKind::Polygon => {
            box_geometry(normalize_draw_rect(start, end))
        }
    }
}

fn box_geometry(rect: Rect) -> ShapeGeometry {
    ShapeGeometry::Box {
        position: rect.origin(),
        width: rect.width(),
        height: rect.height(),
    }
}
