//! SVG export.
//!
//! Each shape becomes one SVG element, emitted in paint order on a white
//! background sized to the canvas.

use crate::canvas::CanvasDocument;
use crate::shapes::{ArgbColor, Shape, ShapeStyle};
use std::fmt::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to format SVG: {0}")]
    Format(#[from] fmt::Error),
    #[error("failed to write SVG: {0}")]
    Io(#[from] std::io::Error),
}

/// Render a document as an SVG string.
pub fn export_svg(document: &CanvasDocument) -> Result<String, ExportError> {
    let mut output = String::new();
    writeln!(output, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        output,
        r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#,
        w = document.width,
        h = document.height,
    )?;
    writeln!(
        output,
        r##"  <rect x="0" y="0" width="{}" height="{}" fill="#FFFFFF"/>"##,
        document.width, document.height
    )?;
    for shape in document.shapes() {
        render_shape(&mut output, shape)?;
    }
    writeln!(output, "</svg>")?;
    Ok(output)
}

/// Write a document to `path` as SVG.
pub fn save_svg(document: &CanvasDocument, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let svg = export_svg(document)?;
    std::fs::write(path, svg)?;
    Ok(())
}

fn render_shape(output: &mut String, shape: &Shape) -> fmt::Result {
    match shape {
        Shape::Line(line) => {
            write!(
                output,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}""#,
                line.start.x, line.start.y, line.end.x, line.end.y
            )?;
            write_stroke(output, &line.style)?;
        }
        Shape::Rectangle(rect) => {
            let r = rect.as_rect();
            write!(
                output,
                r#"  <rect x="{}" y="{}" width="{}" height="{}""#,
                r.x0,
                r.y0,
                r.width(),
                r.height()
            )?;
            write_stroke(output, &rect.style)?;
            write_fill(output, &rect.style)?;
        }
        Shape::Ellipse(ellipse) => {
            let center = ellipse.center();
            let (rx, ry) = ellipse.radii();
            write!(
                output,
                r#"  <ellipse cx="{}" cy="{}" rx="{}" ry="{}""#,
                center.x, center.y, rx, ry
            )?;
            write_stroke(output, &ellipse.style)?;
            write_fill(output, &ellipse.style)?;
        }
        Shape::Polygon(poly) => {
            let points = poly
                .points
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            write!(output, r#"  <polygon points="{points}""#)?;
            write_stroke(output, &poly.style)?;
            write_fill(output, &poly.style)?;
        }
    }
    writeln!(output, "/>")
}

fn write_stroke(output: &mut String, style: &ShapeStyle) -> fmt::Result {
    write!(
        output,
        r#" stroke="{}" stroke-width="{}""#,
        style.stroke_color.to_rgb_hex(),
        style.stroke_thickness
    )?;
    write_opacity(output, "stroke-opacity", style.stroke_color)
}

fn write_fill(output: &mut String, style: &ShapeStyle) -> fmt::Result {
    if !style.has_fill || style.fill_color.is_transparent() {
        return write!(output, r#" fill="none""#);
    }
    write!(output, r#" fill="{}""#, style.fill_color.to_rgb_hex())?;
    write_opacity(output, "fill-opacity", style.fill_color)
}

fn write_opacity(output: &mut String, attr: &str, color: ArgbColor) -> fmt::Result {
    if color.a == 255 {
        return Ok(());
    }
    write!(output, r#" {attr}="{:.3}""#, color.opacity())
}
