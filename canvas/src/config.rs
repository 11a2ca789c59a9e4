//! Tunable board behavior.
//!
//! Every knob has the default the board ships with; hosts may deserialize a
//! partial JSON object over it (missing keys keep their defaults).

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_YARN_COLOR;

/// What to do with a loaded connection whose endpoint does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DanglingPolicy {
    /// Drop the connection and log a warning.
    #[default]
    Prune,
    /// Reject the whole document.
    Strict,
}

/// Error returned when a config would leave the board in an unusable state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("zoom.{field} must be finite and greater than zero, got {value}")]
    ZoomBound { field: &'static str, value: f64 },
    #[error("zoom.min ({min}) must not exceed zoom.max ({max})")]
    ZoomRange { min: f64, max: f64 },
    #[error("zoom.step must be finite and greater than 1, got {0}")]
    ZoomStep(f64),
    #[error("notification_ttl_ms must be finite and greater than zero, got {0}")]
    NotificationTtl(f64),
    #[error("{field} must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

/// Camera zoom limits and wheel step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: f64,
    pub max: f64,
    /// Multiplicative factor applied per wheel notch.
    pub step: f64,
}

impl ZoomConfig {
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a non-positive or non-finite bound,
    /// `min > max`, or a step that wouldn't zoom.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("min", self.min), ("max", self.max)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ZoomBound { field, value });
            }
        }
        if self.min > self.max {
            return Err(ConfigError::ZoomRange { min: self.min, max: self.max });
        }
        if !self.step.is_finite() || self.step <= 1.0 {
            return Err(ConfigError::ZoomStep(self.step));
        }
        Ok(())
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self { min: 0.1, max: 3.0, step: 1.1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Sticky note text longer than this many characters is split into a group.
    pub note_split_threshold: usize,
    /// Vertical distance between consecutive notes of a group.
    pub group_offset: f64,
    /// Maximum rotation deviation, in degrees, of split siblings from the head note.
    pub group_rotation_jitter_deg: f64,
    pub zoom: ZoomConfig,
    /// Color given to new yarn connections.
    pub yarn_color: String,
    /// How long a notification stays visible.
    pub notification_ttl_ms: f64,
    pub dangling: DanglingPolicy,
    /// Divide screen-space drag deltas by the camera zoom before applying them.
    pub scale_drag_by_zoom: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            note_split_threshold: 150,
            group_offset: 160.0,
            group_rotation_jitter_deg: 1.5,
            zoom: ZoomConfig::default(),
            yarn_color: DEFAULT_YARN_COLOR.to_owned(),
            notification_ttl_ms: 3000.0,
            dangling: DanglingPolicy::default(),
            scale_drag_by_zoom: true,
        }
    }
}

impl BoardConfig {
    /// Check the numeric knobs a host may have deserialized.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.zoom.validate()?;
        if !self.notification_ttl_ms.is_finite() || self.notification_ttl_ms <= 0.0 {
            return Err(ConfigError::NotificationTtl(self.notification_ttl_ms));
        }
        for (field, value) in
            [("group_offset", self.group_offset), ("group_rotation_jitter_deg", self.group_rotation_jitter_deg)]
        {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}
