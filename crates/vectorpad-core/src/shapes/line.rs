//! Line shape.

use super::{ShapeGeometry, ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::{point_near_segment, sanitize_point};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight segment between two endpoints. Lines never fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// First endpoint (P1).
    pub start: Point,
    /// Second endpoint (P2).
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style: ShapeStyle::default(),
        }
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(sanitize_point(self.start), sanitize_point(self.end))
    }

    fn hit_test(&self, point: Point, threshold: f64) -> bool {
        point_near_segment(
            point,
            sanitize_point(self.start),
            sanitize_point(self.end),
            threshold,
        )
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    fn geometry(&self) -> ShapeGeometry {
        ShapeGeometry::Segment {
            start: self.start,
            end: self.end,
        }
    }

    fn set_geometry(&mut self, geometry: &ShapeGeometry) -> bool {
        match geometry {
            ShapeGeometry::Segment { start, end } => {
                self.start = *start;
                self.end = *end;
                true
            }
            _ => false,
        }
    }

    fn ensure_positioned(&mut self) {
        self.start = sanitize_point(self.start);
        self.end = sanitize_point(self.end);
    }
}
