//! Camera module for the viewport zoom.
//!
//! Zoom is a render-time scale factor only. Shape coordinates never change
//! when the zoom does.

use crate::config::EditorConfig;
use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};

/// Zoom level shown as "100%".
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Camera holds the view scale for the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current zoom level (1.0 = 100%)
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
    /// Amount added or removed by one zoom step
    pub zoom_step: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            min_zoom: 0.1,
            max_zoom: 5.0,
            zoom_step: 0.1,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera using the zoom limits from `config`.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            zoom: DEFAULT_ZOOM.clamp(config.min_zoom, config.max_zoom),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_step: config.zoom_step,
        }
    }

    /// Get the affine transform for rendering.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.zoom)
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        Affine::scale(1.0 / self.zoom) * screen_point
    }

    /// Convert a canvas point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Set the zoom, clamped to the allowed range. Non-finite input is ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + self.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - self.zoom_step);
    }

    /// Reset camera to the default zoom.
    pub fn reset(&mut self) {
        self.set_zoom(DEFAULT_ZOOM);
    }

    /// Zoom as a whole percentage, e.g. "150%".
    pub fn zoom_text(&self) -> String {
        format!("{}%", (self.zoom * 100.0).round() as i64)
    }
}
