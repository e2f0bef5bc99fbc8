//! Interaction tunables.
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! host only spells out what it wants to change:
//!
//! ```
//! let cfg = sketch::config::EngineConfig::from_json(r#"{ "pasteOffset": 24 }"#);
//! assert!(cfg.is_ok());
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts;

/// Error returned when loading or checking an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid engine config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be {rule}, got {value}")]
    Invalid { field: &'static str, rule: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub snap_threshold: f64,
    pub wall_snap_radius: f64,
    pub angle_snap_deg: f64,
    pub min_wall_length: f64,
    pub min_arc_length: f64,
    pub arc_bow: f64,
    pub default_wall_height: f64,
    pub default_label_text: String,
    pub default_label_font_size: f64,
    pub default_dimension_offset: f64,
    pub paste_offset: f64,
    pub history_limit: usize,
    pub zoom_factor: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snap_threshold: consts::SNAP_THRESHOLD,
            wall_snap_radius: consts::WALL_SNAP_RADIUS,
            angle_snap_deg: consts::ANGLE_SNAP_DEG,
            min_wall_length: consts::MIN_WALL_LENGTH,
            min_arc_length: consts::MIN_ARC_LENGTH,
            arc_bow: consts::ARC_BOW,
            default_wall_height: consts::DEFAULT_WALL_HEIGHT,
            default_label_text: consts::DEFAULT_LABEL_TEXT.to_owned(),
            default_label_font_size: consts::DEFAULT_LABEL_FONT_SIZE,
            default_dimension_offset: consts::DEFAULT_DIMENSION_OFFSET,
            paste_offset: consts::PASTE_OFFSET,
            history_limit: consts::HISTORY_LIMIT,
            zoom_factor: consts::ZOOM_FACTOR,
            min_zoom: consts::MIN_ZOOM,
            max_zoom: consts::MAX_ZOOM,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) config and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed JSON or an invalid value.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    ///
    /// Returns the first tunable outside its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("snapThreshold", self.snap_threshold),
            ("wallSnapRadius", self.wall_snap_radius),
            ("angleSnapDeg", self.angle_snap_deg),
            ("defaultWallHeight", self.default_wall_height),
            ("defaultLabelFontSize", self.default_label_font_size),
            ("minZoom", self.min_zoom),
        ];
        for (field, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::Invalid { field, rule: "positive", value });
            }
        }

        let non_negative = [
            ("minWallLength", self.min_wall_length),
            ("minArcLength", self.min_arc_length),
            ("pasteOffset", self.paste_offset),
            ("defaultDimensionOffset", self.default_dimension_offset),
        ];
        for (field, value) in non_negative {
            if value < 0.0 || !value.is_finite() {
                return Err(ConfigError::Invalid { field, rule: "non-negative", value });
            }
        }

        if self.zoom_factor <= 1.0 {
            return Err(ConfigError::Invalid { field: "zoomFactor", rule: "greater than 1", value: self.zoom_factor });
        }
        if self.max_zoom < self.min_zoom {
            return Err(ConfigError::Invalid { field: "maxZoom", rule: "at least minZoom", value: self.max_zoom });
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid { field: "historyLimit", rule: "at least 1", value: 0.0 });
        }
        Ok(())
    }
}
