//! Tunable editor constants.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading an [`EditorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config value out of range: {0}")]
    OutOfRange(&'static str),
}

/// Every threshold the editing engine uses. Missing keys in a config file fall
/// back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Distance under which a pointer touches a line.
    pub hit_threshold: f64,
    /// Side length of the square hit area around each resize handle.
    pub handle_size: f64,
    /// Smallest width/height an interactive resize can produce.
    pub min_resize_size: f64,
    /// Drag distance that changes a polygon's scale by 100%.
    pub polygon_scale_divisor: f64,
    /// Scale floor for polygon resize.
    pub min_polygon_scale: f64,
    /// Clicking this close to the first vertex closes a polygon.
    pub polygon_close_distance: f64,
    /// Undo entries kept before the oldest is dropped.
    pub max_undo_depth: usize,
    pub default_canvas_width: f64,
    pub default_canvas_height: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            hit_threshold: 10.0,
            handle_size: 8.0,
            min_resize_size: 10.0,
            polygon_scale_divisor: 100.0,
            min_polygon_scale: 0.1,
            polygon_close_distance: 10.0,
            max_undo_depth: 100,
            default_canvas_width: 2000.0,
            default_canvas_height: 2000.0,
            min_zoom: 0.1,
            max_zoom: 5.0,
            zoom_step: 0.1,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.hit_threshold) {
            return Err(ConfigError::OutOfRange("hit_threshold"));
        }
        if !positive(self.handle_size) {
            return Err(ConfigError::OutOfRange("handle_size"));
        }
        if !self.min_resize_size.is_finite() || self.min_resize_size < 0.0 {
            return Err(ConfigError::OutOfRange("min_resize_size"));
        }
        if !positive(self.polygon_scale_divisor) {
            return Err(ConfigError::OutOfRange("polygon_scale_divisor"));
        }
        if !positive(self.min_polygon_scale) {
            return Err(ConfigError::OutOfRange("min_polygon_scale"));
        }
        if !self.polygon_close_distance.is_finite() || self.polygon_close_distance < 0.0 {
            return Err(ConfigError::OutOfRange("polygon_close_distance"));
        }
        if self.max_undo_depth == 0 {
            return Err(ConfigError::OutOfRange("max_undo_depth"));
        }
        if !positive(self.default_canvas_width) || !positive(self.default_canvas_height) {
            return Err(ConfigError::OutOfRange("default canvas size"));
        }
        if !positive(self.min_zoom) || !positive(self.max_zoom) || self.min_zoom > self.max_zoom {
            return Err(ConfigError::OutOfRange("zoom limits"));
        }
        if !positive(self.zoom_step) {
            return Err(ConfigError::OutOfRange("zoom_step"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.hit_threshold, 10.0);
        assert_eq!(config.handle_size, 8.0);
        assert_eq!(config.max_undo_depth, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{ "max_undo_depth": 5 }"#).unwrap();
        assert_eq!(config.max_undo_depth, 5);
        assert_eq!(config.min_resize_size, 10.0);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = EditorConfig::from_json(r#"{ "hit_threshold": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange("hit_threshold")));
        let err = EditorConfig::from_json(r#"{ "min_zoom": 3.0, "max_zoom": 2.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            EditorConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "zoom_step": 0.25 }}"#).unwrap();
        let config = EditorConfig::load(file.path()).unwrap();
        assert_eq!(config.zoom_step, 0.25);
    }

    #[test]
    fn test_json_round_trip() {
        let config = EditorConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }
}
