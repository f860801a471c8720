//! Shape definitions for the drawing surface.

mod color;
mod ellipse;
mod line;
mod polygon;
mod rectangle;

pub use color::{ArgbColor, ColorParseError};
pub use ellipse::Ellipse;
pub use line::Line;
pub use polygon::{MIN_POLYGON_POINTS, Polygon};
pub use rectangle::Rectangle;

use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Kind of shape a tool or record asks for.
///
/// `Square` and `Circle` only exist at construction time; they produce a
/// [`Rectangle`] and an [`Ellipse`] with equal sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Square,
    Ellipse,
    Circle,
    Polygon,
}

impl ShapeKind {
    /// The kind a stored shape of this kind reports.
    pub fn stored(self) -> Self {
        match self {
            ShapeKind::Square => ShapeKind::Rectangle,
            ShapeKind::Circle => ShapeKind::Ellipse,
            other => other,
        }
    }

    /// True for kinds whose width and height are kept equal while drawing.
    pub fn is_uniform(self) -> bool {
        matches!(self, ShapeKind::Square | ShapeKind::Circle)
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Line => "Line",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Square => "Square",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Circle => "Circle",
            ShapeKind::Polygon => "Polygon",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Visual properties of a shape.
///
/// The same record is what the property panel edits and what
/// `ChangeProperties` commands capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: ArgbColor,
    /// Fill color. Transparent whenever `has_fill` is false.
    pub fill_color: ArgbColor,
    /// Stroke width, always > 0.
    pub stroke_thickness: f64,
    /// Whether the interior is painted. Ignored for lines.
    pub has_fill: bool,
}

impl ShapeStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color (None = no fill).
    pub fn fill(&self) -> Option<Color> {
        if self.has_fill && !self.fill_color.is_transparent() {
            Some(self.fill_color.into())
        } else {
            None
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: ArgbColor::BLACK,
            fill_color: ArgbColor::TRANSPARENT,
            stroke_thickness: 2.0,
            has_fill: false,
        }
    }
}

/// Full geometry of a shape, independent of its style and identity.
///
/// Resize commands capture this before and after a gesture so the change can
/// be replayed and inverted exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeGeometry {
    /// Line endpoints P1 and P2.
    Segment { start: Point, end: Point },
    /// Rectangle or ellipse bounding box.
    Box {
        position: Point,
        width: f64,
        height: f64,
    },
    /// Polygon vertices.
    Points(Vec<Point>),
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point hits this shape. `threshold` only matters for lines.
    fn hit_test(&self, point: Point, threshold: f64) -> bool;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Move every coordinate by `delta`.
    fn translate(&mut self, delta: Vec2);

    /// Snapshot of the current geometry.
    fn geometry(&self) -> ShapeGeometry;

    /// Replace the geometry. Returns false (and changes nothing) if the
    /// geometry belongs to another shape variant.
    fn set_geometry(&mut self, geometry: &ShapeGeometry) -> bool;

    /// Give an unplaced shape a concrete position at the origin.
    fn ensure_positioned(&mut self);
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Polygon(Polygon),
}

macro_rules! delegate {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            Shape::Line($s) => $body,
            Shape::Rectangle($s) => $body,
            Shape::Ellipse($s) => $body,
            Shape::Polygon($s) => $body,
        }
    };
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        delegate!(self, s => s.id())
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(_) => ShapeKind::Line,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    pub fn bounds(&self) -> Rect {
        delegate!(self, s => s.bounds())
    }

    pub fn hit_test(&self, point: Point, threshold: f64) -> bool {
        delegate!(self, s => s.hit_test(point, threshold))
    }

    pub fn to_path(&self) -> BezPath {
        delegate!(self, s => s.to_path())
    }

    pub fn style(&self) -> &ShapeStyle {
        delegate!(self, s => s.style())
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        delegate!(self, s => s.style_mut())
    }

    pub fn translate(&mut self, delta: Vec2) {
        delegate!(self, s => s.translate(delta))
    }

    pub fn geometry(&self) -> ShapeGeometry {
        delegate!(self, s => s.geometry())
    }

    pub fn set_geometry(&mut self, geometry: &ShapeGeometry) -> bool {
        delegate!(self, s => s.set_geometry(geometry))
    }

    pub fn ensure_positioned(&mut self) {
        delegate!(self, s => s.ensure_positioned())
    }

    /// Top-left corner of the bounding box. Moves are expressed in terms of
    /// this point.
    pub fn anchor(&self) -> Point {
        self.bounds().origin()
    }

    /// Translate the shape so its anchor lands on `target`.
    pub fn move_to(&mut self, target: Point) {
        let delta = target - self.anchor();
        self.translate(delta);
    }

}

impl From<Line> for Shape {
    fn from(line: Line) -> Self {
        Shape::Line(line)
    }
}

impl From<Rectangle> for Shape {
    fn from(rect: Rectangle) -> Self {
        Shape::Rectangle(rect)
    }
}

impl From<Ellipse> for Shape {
    fn from(ellipse: Ellipse) -> Self {
        Shape::Ellipse(ellipse)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}
