//! Selection and resize handle system.

use crate::config::EditorConfig;
use crate::geometry::{centered_square, centroid, rect_contains};
use crate::shapes::{Shape, ShapeGeometry};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Handle hit area side length in canvas units.
pub const HANDLE_SIZE: f64 = 8.0;

/// Where disabled handles are parked, well outside any canvas.
pub const OFF_CANVAS: Point = Point::new(-100_000.0, -100_000.0);

/// One of the four corner handles of the selected shape.
///
/// Lines only use `TopLeft` (P1) and `TopRight` (P2); their bottom handles are
/// disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    /// Hit-test order. The first matching handle wins.
    pub const ALL: [ResizeHandle; 4] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
    ];

    fn is_left(self) -> bool {
        matches!(self, ResizeHandle::TopLeft | ResizeHandle::BottomLeft)
    }

    fn is_top(self) -> bool {
        matches!(self, ResizeHandle::TopLeft | ResizeHandle::TopRight)
    }
}

/// A resize handle with its position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in canvas coordinates.
    pub position: Point,
    pub kind: ResizeHandle,
    /// Disabled handles sit at [`OFF_CANVAS`] and never hit.
    pub enabled: bool,
}

impl Handle {
    pub fn new(position: Point, kind: ResizeHandle) -> Self {
        Self {
            position,
            kind,
            enabled: true,
        }
    }

    pub fn disabled(kind: ResizeHandle) -> Self {
        Self {
            position: OFF_CANVAS,
            kind,
            enabled: false,
        }
    }

    /// Square hit area of side `size` centered on the handle.
    pub fn rect(&self, size: f64) -> Rect {
        centered_square(self.position, size)
    }

    /// Check if a point hits this handle.
    pub fn hit_test(&self, point: Point, size: f64) -> bool {
        self.enabled && rect_contains(self.rect(size), point)
    }
}

/// Get the four resize handles for a shape, in hit-test order.
pub fn get_handles(shape: &Shape) -> Vec<Handle> {
    match shape {
        Shape::Line(line) => vec![
            Handle::new(line.start, ResizeHandle::TopLeft),
            Handle::new(line.end, ResizeHandle::TopRight),
            Handle::disabled(ResizeHandle::BottomLeft),
            Handle::disabled(ResizeHandle::BottomRight),
        ],
        Shape::Rectangle(_) | Shape::Ellipse(_) | Shape::Polygon(_) => {
            corner_handles(shape.bounds())
        }
    }
}

/// Generate corner handles for a bounding rectangle.
fn corner_handles(bounds: Rect) -> Vec<Handle> {
    vec![
        Handle::new(Point::new(bounds.x0, bounds.y0), ResizeHandle::TopLeft),
        Handle::new(Point::new(bounds.x1, bounds.y0), ResizeHandle::TopRight),
        Handle::new(Point::new(bounds.x0, bounds.y1), ResizeHandle::BottomLeft),
        Handle::new(Point::new(bounds.x1, bounds.y1), ResizeHandle::BottomRight),
    ]
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(shape: &Shape, point: Point, size: f64) -> Option<ResizeHandle> {
    get_handles(shape)
        .into_iter()
        .find(|handle| handle.hit_test(point, size))
        .map(|handle| handle.kind)
}

/// Limits applied while resizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeLimits {
    /// Smallest width/height for rectangles and ellipses.
    pub min_size: f64,
    /// Drag distance that changes a polygon's scale by 100%.
    pub scale_divisor: f64,
    /// Polygon scale floor.
    pub min_scale: f64,
}

impl Default for ResizeLimits {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

impl From<&EditorConfig> for ResizeLimits {
    fn from(config: &EditorConfig) -> Self {
        Self {
            min_size: config.min_resize_size,
            scale_divisor: config.polygon_scale_divisor,
            min_scale: config.min_polygon_scale,
        }
    }
}

/// Derive a shape's geometry from its geometry at gesture start plus the total
/// pointer delta since then.
///
/// The result only depends on `original` and `delta`, so repeated updates
/// during one gesture never accumulate error.
pub fn resize_geometry(
    original: &ShapeGeometry,
    handle: ResizeHandle,
    delta: Vec2,
    limits: &ResizeLimits,
) -> ShapeGeometry {
    match original {
        ShapeGeometry::Segment { start, end } => {
            if handle.is_left() {
                ShapeGeometry::Segment {
                    start: *start + delta,
                    end: *end,
                }
            } else {
                ShapeGeometry::Segment {
                    start: *start,
                    end: *end + delta,
                }
            }
        }
        ShapeGeometry::Box {
            position,
            width,
            height,
        } => resize_box(*position, *width, *height, handle, delta, limits.min_size),
        ShapeGeometry::Points(points) => {
            ShapeGeometry::Points(scale_points(points, handle, delta, limits))
        }
    }
}

fn resize_box(
    position: Point,
    width: f64,
    height: f64,
    handle: ResizeHandle,
    delta: Vec2,
    min_size: f64,
) -> ShapeGeometry {
    let right = position.x + width;
    let bottom = position.y + height;

    let (x, w) = if handle.is_left() {
        let left = (position.x + delta.x).min(right - min_size);
        (left, right - left)
    } else {
        (position.x, (width + delta.x).max(min_size))
    };
    let (y, h) = if handle.is_top() {
        let top = (position.y + delta.y).min(bottom - min_size);
        (top, bottom - top)
    } else {
        (position.y, (height + delta.y).max(min_size))
    };

    ShapeGeometry::Box {
        position: Point::new(x, y),
        width: w,
        height: h,
    }
}

/// Scale polygon vertices about their centroid. Dragging a handle away from
/// the shape grows it on that axis.
fn scale_points(
    points: &[Point],
    handle: ResizeHandle,
    delta: Vec2,
    limits: &ResizeLimits,
) -> Vec<Point> {
    let center = centroid(points);
    let dx = delta.x / limits.scale_divisor;
    let dy = delta.y / limits.scale_divisor;
    let sx = if handle.is_left() { 1.0 - dx } else { 1.0 + dx };
    let sy = if handle.is_top() { 1.0 - dy } else { 1.0 + dy };
    let sx = sx.max(limits.min_scale);
    let sy = sy.max(limits.min_scale);

    points
        .iter()
        .map(|p| {
            Point::new(
                center.x + (p.x - center.x) * sx,
                center.y + (p.y - center.y) * sy,
            )
        })
        .collect()
}

/// Apply a resize to a copy of `original` and return it.
pub fn apply_resize(
    original: &Shape,
    handle: ResizeHandle,
    delta: Vec2,
    limits: &ResizeLimits,
) -> Shape {
    let mut shape = original.clone();
    let geometry = resize_geometry(&original.geometry(), handle, delta, limits);
    shape.set_geometry(&geometry);
    shape
}
