//! Geometry kernel: pure functions over points and point sequences.
//!
//! Shapes delegate their bounding-box and hit-test logic here so every
//! variant shares one implementation of the underlying math.

use kurbo::{Point, Rect, Vec2};

/// Distance (in canvas units) under which a point counts as touching a line.
pub const HIT_THRESHOLD: f64 = 10.0;

/// Replace non-finite coordinates with 0, so an unplaced shape behaves as if
/// it sits at the origin.
pub fn sanitize_point(point: Point) -> Point {
    let fix = |v: f64| if v.is_finite() { v } else { 0.0 };
    Point::new(fix(point.x), fix(point.y))
}

/// Distance from a point to a line segment (a -> b).
///
/// The projection is clamped to the segment, so points beyond either end are
/// measured to the nearest endpoint.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// True if `point` is strictly closer than `threshold` to the segment a -> b.
pub fn point_near_segment(point: Point, a: Point, b: Point, threshold: f64) -> bool {
    point_to_segment_dist(point, a, b) < threshold
}

/// Inclusive containment test (points on the edge are inside).
pub fn rect_contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Even-odd ray casting. Polygons with fewer than three points never contain
/// anything.
pub fn point_in_polygon(point: Point, points: &[Point]) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let cross_x = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Min/max envelope of a point sequence. Empty input yields a zero rect at the
/// origin.
pub fn points_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |acc, p| {
            Rect::new(
                acc.x0.min(p.x),
                acc.y0.min(p.y),
                acc.x1.max(p.x),
                acc.y1.max(p.y),
            )
        })
}

/// Arithmetic mean of all vertices (origin for an empty sequence).
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ZERO;
    }
    let sum = points
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    (sum / points.len() as f64).to_point()
}

/// Rectangle spanned by a drag from `start` to `end`, normalized so width and
/// height are non-negative.
pub fn normalize_draw_rect(start: Point, end: Point) -> Rect {
    let x = start.x.min(end.x);
    let y = start.y.min(end.y);
    let w = (end.x - start.x).abs();
    let h = (end.y - start.y).abs();
    Rect::new(x, y, x + w, y + h)
}

/// Square spanned by a drag from `start` to `end`.
///
/// The side is the larger of the drag's width and height. The corner at
/// `start` stays fixed and the square grows toward `end` on each axis.
pub fn normalize_square(start: Point, end: Point) -> Rect {
    let draw = normalize_draw_rect(start, end);
    let side = draw.width().max(draw.height());
    let x = if end.x < start.x { start.x - side } else { start.x };
    let y = if end.y < start.y { start.y - side } else { start.y };
    Rect::new(x, y, x + side, y + side)
}

/// Square rect of `size` centered on `center`, used for handle hit areas.
pub fn centered_square(center: Point, size: f64) -> Rect {
    let half = size / 2.0;
    Rect::new(center.x - half, center.y - half, center.x + half, center.y + half)
}
