//! Shape construction and property application.

use crate::shapes::{ArgbColor, Ellipse, Line, Polygon, Rectangle, Shape, ShapeKind, ShapeStyle};
use kurbo::Point;

/// Create a shape of the requested kind with zero-size geometry at the origin.
///
/// `Square` and `Circle` produce a rectangle and an ellipse.
pub fn create(kind: ShapeKind) -> Shape {
    match kind {
        ShapeKind::Line => Line::new(Point::ZERO, Point::ZERO).into(),
        ShapeKind::Rectangle | ShapeKind::Square => Rectangle::new(Point::ZERO, 0.0, 0.0).into(),
        ShapeKind::Ellipse | ShapeKind::Circle => Ellipse::new(Point::ZERO, 0.0, 0.0).into(),
        ShapeKind::Polygon => Polygon::new(Vec::new()).into(),
    }
}

/// Create a shape and apply `properties` to it.
pub fn create_styled(kind: ShapeKind, properties: &ShapeStyle) -> Shape {
    let mut shape = create(kind);
    apply_properties(&mut shape, properties);
    shape
}

/// The style a shape of `kind` ends up with after `properties` are applied.
///
/// Fill is only kept for filled, non-line shapes; everything else gets a
/// transparent fill.
pub fn effective_style(kind: ShapeKind, properties: &ShapeStyle) -> ShapeStyle {
    let fills = properties.has_fill && kind.stored() != ShapeKind::Line;
    ShapeStyle {
        stroke_color: properties.stroke_color,
        fill_color: if fills {
            properties.fill_color
        } else {
            ArgbColor::TRANSPARENT
        },
        stroke_thickness: properties.stroke_thickness,
        has_fill: fills,
    }
}

/// Apply a properties record to an existing shape. Idempotent.
pub fn apply_properties(shape: &mut Shape, properties: &ShapeStyle) {
    let style = effective_style(shape.kind(), properties);
    *shape.style_mut() = style;
}
