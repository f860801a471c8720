//! Rectangle shape.

use super::{ShapeGeometry, ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::{rect_contains, sanitize_point};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle. Squares are rectangles drawn with equal sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width: width.max(0.0),
            height: height.max(0.0),
            style: ShapeStyle::default(),
        }
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(sanitize_point(self.position), (self.width, self.height))
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, _threshold: f64) -> bool {
        rect_contains(self.as_rect(), point)
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.position = sanitize_point(self.position) + delta;
    }

    fn geometry(&self) -> ShapeGeometry {
        ShapeGeometry::Box {
            position: self.position,
            width: self.width,
            height: self.height,
        }
    }

    fn set_geometry(&mut self, geometry: &ShapeGeometry) -> bool {
        match geometry {
            ShapeGeometry::Box {
                position,
                width,
                height,
            } => {
                self.position = *position;
                self.width = width.max(0.0);
                self.height = height.max(0.0);
                true
            }
            _ => false,
        }
    }

    fn ensure_positioned(&mut self) {
        self.position = sanitize_point(self.position);
    }
}
