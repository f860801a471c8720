//! Polygon shape.

use super::{ShapeGeometry, ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::{point_in_polygon, points_bounds, sanitize_point};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum number of vertices for a complete polygon.
pub const MIN_POLYGON_POINTS: usize = 3;

/// A closed polygon. Vertex order defines the edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub(crate) id: ShapeId,
    /// Vertices in drawing order.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Polygon {
    /// Create a polygon from its vertices.
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style: ShapeStyle::default(),
        }
    }
}

impl ShapeTrait for Polygon {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        points_bounds(&self.points)
    }

    fn hit_test(&self, point: Point, _threshold: f64) -> bool {
        point_in_polygon(point, &self.points)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some((first, rest)) = self.points.split_first() else {
            return path;
        };
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }

    fn geometry(&self) -> ShapeGeometry {
        ShapeGeometry::Points(self.points.clone())
    }

    fn set_geometry(&mut self, geometry: &ShapeGeometry) -> bool {
        match geometry {
            ShapeGeometry::Points(points) => {
                self.points.clone_from(points);
                true
            }
            _ => false,
        }
    }

    fn ensure_positioned(&mut self) {
        for p in &mut self.points {
            *p = sanitize_point(*p);
        }
    }
}
