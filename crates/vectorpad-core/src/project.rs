//! Project files: a flat list of shape records plus the canvas size.
//!
//! Records are the load/save contract. Loading validates every record before
//! anything is built, so a corrupt file never yields a partial document.

use crate::canvas::CanvasDocument;
use crate::geometry::sanitize_point;
use crate::shapes::{
    ArgbColor, ColorParseError, Ellipse, Line, MIN_POLYGON_POINTS, Polygon, Rectangle, Shape,
    ShapeKind, ShapeStyle,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Why a single record could not be turned into a shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("invalid {field}: {source}")]
    Color {
        field: &'static str,
        #[source]
        source: ColorParseError,
    },
    #[error("stroke thickness must be finite and positive, got {0}")]
    Thickness(f64),
    #[error("width and height must be finite and non-negative")]
    Size,
    #[error("coordinates must be finite")]
    Coordinate,
    #[error("polygon needs at least 3 points, got {0}")]
    TooFewPoints(usize),
}

/// Errors raised while reading or writing project files.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("failed to access project file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed project file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid canvas size {width} x {height}")]
    CanvasSize { width: f64, height: f64 },
    #[error("shape {index}: {source}")]
    Shape {
        index: usize,
        #[source]
        source: RecordError,
    },
}

/// A point in a polygon record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordPoint {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for RecordPoint {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<RecordPoint> for Point {
    fn from(p: RecordPoint) -> Self {
        Point::new(p.x, p.y)
    }
}

/// Geometry fields of a record, tagged by `kind`.
///
/// `Square` and `Circle` are accepted on load and become a rectangle and an
/// ellipse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RecordGeometry {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    #[serde(alias = "Square")]
    Rectangle {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
    #[serde(alias = "Circle")]
    Ellipse {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
    Polygon { points: Vec<RecordPoint> },
}

/// One shape as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRecord {
    #[serde(flatten)]
    pub geometry: RecordGeometry,
    /// `#AARRGGBB`.
    pub stroke_color: String,
    /// `#AARRGGBB`.
    pub fill_color: String,
    pub stroke_thickness: f64,
    pub has_fill: bool,
}

impl ShapeRecord {
    /// Build the record for a shape. Unset or non-finite coordinates are
    /// written as 0 so the file always loads back.
    pub fn from_shape(shape: &Shape) -> Self {
        let geometry = match shape {
            Shape::Line(line) => {
                let (start, end) = (sanitize_point(line.start), sanitize_point(line.end));
                RecordGeometry::Line {
                    x1: start.x,
                    y1: start.y,
                    x2: end.x,
                    y2: end.y,
                }
            }
            Shape::Rectangle(rect) => {
                let position = sanitize_point(rect.position);
                RecordGeometry::Rectangle {
                    left: position.x,
                    top: position.y,
                    width: finite_or_zero(rect.width),
                    height: finite_or_zero(rect.height),
                }
            }
            Shape::Ellipse(ellipse) => {
                let position = sanitize_point(ellipse.position);
                RecordGeometry::Ellipse {
                    left: position.x,
                    top: position.y,
                    width: finite_or_zero(ellipse.width),
                    height: finite_or_zero(ellipse.height),
                }
            }
            Shape::Polygon(poly) => RecordGeometry::Polygon {
                points: poly
                    .points
                    .iter()
                    .map(|p| RecordPoint::from(sanitize_point(*p)))
                    .collect(),
            },
        };
        let style = shape.style();
        Self {
            geometry,
            stroke_color: style.stroke_color.to_hex(),
            fill_color: style.fill_color.to_hex(),
            stroke_thickness: style.stroke_thickness,
            has_fill: style.has_fill,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self.geometry {
            RecordGeometry::Line { .. } => ShapeKind::Line,
            RecordGeometry::Rectangle { .. } => ShapeKind::Rectangle,
            RecordGeometry::Ellipse { .. } => ShapeKind::Ellipse,
            RecordGeometry::Polygon { .. } => ShapeKind::Polygon,
        }
    }

    /// Validate the record and build a shape with a fresh id.
    pub fn to_shape(&self) -> Result<Shape, RecordError> {
        let style = self.style()?;
        let mut shape: Shape = match &self.geometry {
            RecordGeometry::Line { x1, y1, x2, y2 } => {
                finite(&[*x1, *y1, *x2, *y2])?;
                Line::new(Point::new(*x1, *y1), Point::new(*x2, *y2)).into()
            }
            RecordGeometry::Rectangle {
                left,
                top,
                width,
                height,
            } => {
                let (position, width, height) = checked_box(*left, *top, *width, *height)?;
                Rectangle::new(position, width, height).into()
            }
            RecordGeometry::Ellipse {
                left,
                top,
                width,
                height,
            } => {
                let (position, width, height) = checked_box(*left, *top, *width, *height)?;
                Ellipse::new(position, width, height).into()
            }
            RecordGeometry::Polygon { points } => {
                if points.len() < MIN_POLYGON_POINTS {
                    return Err(RecordError::TooFewPoints(points.len()));
                }
                for p in points {
                    finite(&[p.x, p.y])?;
                }
                Polygon::new(points.iter().copied().map(Point::from).collect()).into()
            }
        };
        *shape.style_mut() = style;
        Ok(shape)
    }

    fn style(&self) -> Result<ShapeStyle, RecordError> {
        let stroke_color = ArgbColor::from_hex(&self.stroke_color).map_err(|source| {
            RecordError::Color {
                field: "strokeColor",
                source,
            }
        })?;
        let fill_color =
            ArgbColor::from_hex(&self.fill_color).map_err(|source| RecordError::Color {
                field: "fillColor",
                source,
            })?;
        if !self.stroke_thickness.is_finite() || self.stroke_thickness <= 0.0 {
            return Err(RecordError::Thickness(self.stroke_thickness));
        }
        Ok(ShapeStyle {
            stroke_color,
            fill_color,
            stroke_thickness: self.stroke_thickness,
            has_fill: self.has_fill,
        })
    }
}

fn finite(values: &[f64]) -> Result<(), RecordError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(RecordError::Coordinate)
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn checked_box(left: f64, top: f64, width: f64, height: f64) -> Result<(Point, f64, f64), RecordError> {
    finite(&[left, top])?;
    if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
        return Err(RecordError::Size);
    }
    Ok((Point::new(left, top), width, height))
}

/// A saved project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub shapes: Vec<ShapeRecord>,
}

impl ProjectFile {
    /// Capture a document's shapes in paint order.
    pub fn from_document(document: &CanvasDocument) -> Self {
        Self {
            canvas_width: document.width,
            canvas_height: document.height,
            shapes: document.shapes().iter().map(ShapeRecord::from_shape).collect(),
        }
    }

    /// Build a document. Fails on the first invalid record.
    pub fn to_document(&self) -> Result<CanvasDocument, ProjectError> {
        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !size_ok(self.canvas_width) || !size_ok(self.canvas_height) {
            return Err(ProjectError::CanvasSize {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        let shapes = self
            .shapes
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .to_shape()
                    .map_err(|source| ProjectError::Shape { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CanvasDocument::with_shapes(
            self.canvas_width,
            self.canvas_height,
            shapes,
        ))
    }

    pub fn to_json(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a project file from disk. Records are not validated here.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Number of records per stored kind.
    pub fn count_by_kind(&self) -> Vec<(ShapeKind, usize)> {
        [
            ShapeKind::Line,
            ShapeKind::Rectangle,
            ShapeKind::Ellipse,
            ShapeKind::Polygon,
        ]
        .into_iter()
        .map(|kind| (kind, self.shapes.iter().filter(|r| r.kind() == kind).count()))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;
    use crate::shapes::ShapeGeometry;

    fn sample_document() -> CanvasDocument {
        let mut doc = CanvasDocument::new(800.0, 600.0);
        let styled = ShapeStyle {
            stroke_color: ArgbColor::new(200, 10, 20, 30),
            fill_color: ArgbColor::rgb(0, 128, 255),
            stroke_thickness: 3.5,
            has_fill: true,
        };
        let mut line: Shape = Line::new(Point::new(0.5, 1.25), Point::new(100.0, 80.0)).into();
        factory::apply_properties(&mut line, &styled);
        let mut rect: Shape = Rectangle::new(Point::new(10.0, 20.0), 30.0, 40.0).into();
        factory::apply_properties(&mut rect, &styled);
        let ellipse: Shape = Ellipse::new(Point::new(-5.0, 7.0), 0.0, 12.0).into();
        let poly: Shape = Polygon::new(vec![
            Point::new(1.0, 1.0),
            Point::new(9.0, 1.0),
            Point::new(5.0, 7.5),
        ])
        .into();
        for s in [line, rect, ellipse, poly] {
            doc.add_shape(s);
        }
        doc
    }

    fn same_content(a: &Shape, b: &Shape) -> bool {
        a.kind() == b.kind() && a.geometry() == b.geometry() && a.style() == b.style()
    }

    #[test]
    fn test_round_trip() {
        let doc = sample_document();
        let json = ProjectFile::from_document(&doc).to_json().unwrap();
        let loaded = ProjectFile::from_json(&json).unwrap().to_document().unwrap();

        assert_eq!(loaded.len(), doc.len());
        assert_eq!(loaded.width, 800.0);
        for (a, b) in doc.shapes().iter().zip(loaded.shapes()) {
            assert!(same_content(a, b), "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_record_format() {
        let doc = sample_document();
        let project = ProjectFile::from_document(&doc);
        let value: serde_json::Value = serde_json::to_value(&project).unwrap();
        let line = &value["shapes"][0];
        assert_eq!(line["kind"], "Line");
        assert_eq!(line["x1"], 0.5);
        assert_eq!(line["strokeColor"], "#C80A141E");
        // Lines never carry a fill
        assert_eq!(line["fillColor"], "#00FFFFFF");
        assert_eq!(line["hasFill"], false);
        assert_eq!(value["shapes"][1]["fillColor"], "#FF0080FF");
        assert_eq!(value["shapes"][3]["points"][2]["y"], 7.5);
        assert_eq!(value["canvasWidth"], 800.0);
    }

    #[test]
    fn test_square_and_circle_aliases() {
        let json = r##"{
            "canvasWidth": 100, "canvasHeight": 100,
            "shapes": [
                { "kind": "Square", "left": 1, "top": 2, "width": 5, "height": 5,
                  "strokeColor": "#FF000000", "fillColor": "00FFFFFF",
                  "strokeThickness": 1, "hasFill": false },
                { "kind": "Circle", "left": 0, "top": 0, "width": 8, "height": 8,
                  "strokeColor": "#FF000000", "fillColor": "#FFFF0000",
                  "strokeThickness": 2, "hasFill": true }
            ]
        }"##;
        let doc = ProjectFile::from_json(json).unwrap().to_document().unwrap();
        assert_eq!(doc.shapes()[0].kind(), ShapeKind::Rectangle);
        assert_eq!(doc.shapes()[1].kind(), ShapeKind::Ellipse);
        assert_eq!(doc.shapes()[1].style().fill_color, ArgbColor::rgb(255, 0, 0));
    }

    #[test]
    fn test_invalid_records_fail_whole_load() {
        let mut project = ProjectFile::from_document(&sample_document());
        project.shapes[2].stroke_color = "#GG000000".to_string();
        let err = project.to_document().unwrap_err();
        assert!(matches!(
            err,
            ProjectError::Shape {
                index: 2,
                source: RecordError::Color { field: "strokeColor", .. }
            }
        ));
    }

    #[test]
    fn test_validation_rules() {
        let base = ProjectFile::from_document(&sample_document());

        let mut p = base.clone();
        p.shapes[0].stroke_thickness = 0.0;
        assert!(matches!(
            p.to_document(),
            Err(ProjectError::Shape { source: RecordError::Thickness(_), .. })
        ));

        let mut p = base.clone();
        p.shapes[1].geometry = RecordGeometry::Rectangle {
            left: 0.0,
            top: 0.0,
            width: -1.0,
            height: 5.0,
        };
        assert!(matches!(
            p.to_document(),
            Err(ProjectError::Shape { index: 1, source: RecordError::Size })
        ));

        let mut p = base.clone();
        p.shapes[3].geometry = RecordGeometry::Polygon {
            points: vec![RecordPoint { x: 0.0, y: 0.0 }, RecordPoint { x: 1.0, y: 1.0 }],
        };
        assert!(matches!(
            p.to_document(),
            Err(ProjectError::Shape { source: RecordError::TooFewPoints(2), .. })
        ));

        let mut p = base.clone();
        p.canvas_width = 0.0;
        assert!(matches!(p.to_document(), Err(ProjectError::CanvasSize { .. })));
    }

    #[test]
    fn test_unset_position_saves_as_origin() {
        let mut doc = CanvasDocument::new(100.0, 100.0);
        doc.add_shape(Rectangle::new(Point::new(f64::NAN, f64::NAN), 5.0, 5.0).into());
        doc.add_shape(Line::new(Point::new(f64::NAN, 2.0), Point::new(4.0, f64::INFINITY)).into());

        let json = ProjectFile::from_document(&doc).to_json().unwrap();
        assert!(!json.contains("null"));

        let loaded = ProjectFile::from_json(&json).unwrap().to_document().unwrap();
        assert_eq!(
            loaded.shapes()[0].geometry(),
            ShapeGeometry::Box {
                position: Point::ZERO,
                width: 5.0,
                height: 5.0
            }
        );
        assert_eq!(
            loaded.shapes()[1].geometry(),
            ShapeGeometry::Segment {
                start: Point::new(0.0, 2.0),
                end: Point::new(4.0, 0.0)
            }
        );
    }

    #[test]
    fn test_signed_color_digits_fail_load() {
        let mut project = ProjectFile::from_document(&sample_document());
        project.shapes[1].fill_color = "#+F+F+F+F".to_string();
        assert!(matches!(
            project.to_document(),
            Err(ProjectError::Shape {
                index: 1,
                source: RecordError::Color { field: "fillColor", .. }
            })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ProjectFile::from_json(r#"{ "canvasWidth": 1 }"#),
            Err(ProjectError::Json(_))
        ));
        let unknown_kind = r##"{ "canvasWidth": 1, "canvasHeight": 1, "shapes": [
            { "kind": "Star", "strokeColor": "#FF000000", "fillColor": "#FF000000",
              "strokeThickness": 1, "hasFill": false } ] }"##;
        assert!(ProjectFile::from_json(unknown_kind).is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drawing.json");
        let project = ProjectFile::from_document(&sample_document());
        project.save(&path).unwrap();
        assert_eq!(ProjectFile::load(&path).unwrap(), project);
    }

    #[test]
    fn test_count_by_kind() {
        let project = ProjectFile::from_document(&sample_document());
        let counts = project.count_by_kind();
        assert_eq!(counts[0], (ShapeKind::Line, 1));
        assert_eq!(counts[3], (ShapeKind::Polygon, 1));
    }
}
