//! Editor configuration.

use crate::camera::{MAX_ZOOM, MIN_ZOOM};
use crate::clipboard::{DUPLICATE_OFFSET, PASTE_STAGGER};
use crate::elements::{ElementStyle, SerializableColor};
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::snap::GRID_SIZE;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for an editing session. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid cell size in world units.
    pub grid_size: f64,
    pub snap_to_grid: bool,
    pub show_grid: bool,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Arrow-key pan distance in screen pixels.
    pub pan_step: f64,
    /// Arrow-key pan distance with shift held.
    pub pan_step_large: f64,
    /// Zoom change per unit of wheel delta.
    pub wheel_zoom_sensitivity: f64,
    /// Zoom change for the zoom in/out commands.
    pub zoom_step: f64,
    pub paste_stagger: f64,
    pub duplicate_offset: Vec2,
    /// Paste target when no pointer position is known, in world units.
    pub default_paste_anchor: Point,
    pub default_line_width: f64,
    pub default_color: SerializableColor,
    /// Snapshots kept for undo, including the current one.
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            snap_to_grid: false,
            show_grid: true,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            pan_step: 10.0,
            pan_step_large: 50.0,
            wheel_zoom_sensitivity: 0.001,
            zoom_step: 0.1,
            paste_stagger: PASTE_STAGGER,
            duplicate_offset: DUPLICATE_OFFSET,
            default_paste_anchor: Point::new(50.0, 50.0),
            default_line_width: 2.0,
            default_color: SerializableColor::black(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reject values the editor cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            let reason = reason.into();
            log::warn!("Rejected config: {field} {reason}");
            ConfigError::Invalid { field, reason }
        }

        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(invalid("grid_size", "must be positive"));
        }
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            return Err(invalid("min_zoom", "must be positive"));
        }
        if !self.max_zoom.is_finite() || self.max_zoom < self.min_zoom {
            return Err(invalid("max_zoom", format!("must be at least min_zoom ({})", self.min_zoom)));
        }
        if self.default_line_width <= 0.0 {
            return Err(invalid("default_line_width", "must be positive"));
        }
        if self.history_limit == 0 {
            return Err(invalid("history_limit", "must keep at least one snapshot"));
        }
        Ok(())
    }

    /// Style applied to newly drawn elements.
    pub fn default_style(&self) -> ElementStyle {
        ElementStyle::new(self.default_color, self.default_line_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert!((config.grid_size - 20.0).abs() < f64::EPSILON);
        assert!(!config.snap_to_grid);
        assert!(config.show_grid);
        assert_eq!(config.duplicate_offset, Vec2::new(20.0, 20.0));
        assert_eq!(config.history_limit, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = EditorConfig::from_json(r#"{"grid_size": 25.0, "snap_to_grid": true}"#).unwrap();
        assert!((config.grid_size - 25.0).abs() < f64::EPSILON);
        assert!(config.snap_to_grid);
        assert!((config.pan_step - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = EditorConfig::from_json(r#"{"grid_size": 0.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "grid_size", .. }));

        let err = EditorConfig::from_json(r#"{"min_zoom": 2.0, "max_zoom": 1.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_zoom", .. }));

        let err = EditorConfig::from_json(r#"{"history_limit": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "history_limit", .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = EditorConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EditorConfig {
            snap_to_grid: true,
            ..Default::default()
        };
        let back = EditorConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"history_limit": 5, "default_color": {"r": 255, "g": 0, "b": 0, "a": 255}}"#)
            .unwrap();
        let config = EditorConfig::load(file.path()).unwrap();
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.default_style().color, SerializableColor::new(255, 0, 0, 255));
    }

    #[test]
    fn test_missing_file() {
        let err = EditorConfig::load("/nonexistent/sketchpad.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
