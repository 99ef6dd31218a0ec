//! Configuration for the zoom controller.
//!
//! Every field has a serde default, so a partial JSON document only needs to
//! name the values it changes.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BOUNCE_RESET_DURATION_MS, BOUNCE_ZOOM_DURATION_MS, MAX_PINCH_SCALE, MIN_ANIMATED_SCALE,
    MIN_SCALE, RESET_DURATION_MS, RESET_THRESHOLD, ZOOM_DURATION_MS,
};
use panzoom_math::{DEFAULT_MAX_ZOOM_SCALE, DEFAULT_TAP_ZOOM_SCALE};

/// Log level setting for the controller and the replay tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including per-frame trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Tuning values for [`crate::ZoomController`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    /// Version of the configuration file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Lower bound for live pinch scale
    #[serde(default = "default_min_scale")]
    pub min_scale: f32,

    /// Upper bound for live pinch scale
    #[serde(default = "default_max_pinch_scale")]
    pub max_pinch_scale: f32,

    /// Minimum scale a double-tap zooms to
    #[serde(default = "default_tap_zoom_scale")]
    pub tap_zoom_scale: f32,

    /// Ceiling for zoom targets, including zoom-to-fill
    #[serde(default = "default_max_zoom_scale")]
    pub max_zoom_scale: f32,

    /// Pinch released below this scale resets the view
    #[serde(default = "default_reset_threshold")]
    pub reset_threshold: f32,

    /// Floor for animated scale during spring overshoot
    #[serde(default = "default_min_animated_scale")]
    pub min_animated_scale: f32,

    /// Use the spring curve for zoom and reset animations
    #[serde(default = "default_bounce_enabled")]
    pub bounce_enabled: bool,

    #[serde(default = "default_zoom_duration_ms")]
    pub zoom_duration_ms: u64,

    #[serde(default = "default_bounce_zoom_duration_ms")]
    pub bounce_zoom_duration_ms: u64,

    #[serde(default = "default_reset_duration_ms")]
    pub reset_duration_ms: u64,

    #[serde(default = "default_bounce_reset_duration_ms")]
    pub bounce_reset_duration_ms: u64,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_min_scale() -> f32 {
    MIN_SCALE
}

fn default_max_pinch_scale() -> f32 {
    MAX_PINCH_SCALE
}

fn default_tap_zoom_scale() -> f32 {
    DEFAULT_TAP_ZOOM_SCALE
}

fn default_max_zoom_scale() -> f32 {
    DEFAULT_MAX_ZOOM_SCALE
}

fn default_reset_threshold() -> f32 {
    RESET_THRESHOLD
}

fn default_min_animated_scale() -> f32 {
    MIN_ANIMATED_SCALE
}

fn default_bounce_enabled() -> bool {
    true
}

fn default_zoom_duration_ms() -> u64 {
    ZOOM_DURATION_MS
}

fn default_bounce_zoom_duration_ms() -> u64 {
    BOUNCE_ZOOM_DURATION_MS
}

fn default_reset_duration_ms() -> u64 {
    RESET_DURATION_MS
}

fn default_bounce_reset_duration_ms() -> u64 {
    BOUNCE_RESET_DURATION_MS
}

impl ZoomConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            min_scale: default_min_scale(),
            max_pinch_scale: default_max_pinch_scale(),
            tap_zoom_scale: default_tap_zoom_scale(),
            max_zoom_scale: default_max_zoom_scale(),
            reset_threshold: default_reset_threshold(),
            min_animated_scale: default_min_animated_scale(),
            bounce_enabled: default_bounce_enabled(),
            zoom_duration_ms: default_zoom_duration_ms(),
            bounce_zoom_duration_ms: default_bounce_zoom_duration_ms(),
            reset_duration_ms: default_reset_duration_ms(),
            bounce_reset_duration_ms: default_bounce_reset_duration_ms(),
            log_level: LogLevel::default(),
        }
    }

    /// Same configuration with bounce switched on or off.
    pub fn with_bounce(mut self, enabled: bool) -> Self {
        self.bounce_enabled = enabled;
        self
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the scale limits are usable together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite_positive = |value: f32| value.is_finite() && value > 0.0;

        if !finite_positive(self.min_scale) {
            return Err(ConfigError::invalid("min_scale", "must be positive"));
        }
        if !finite_positive(self.max_pinch_scale) || self.max_pinch_scale < self.min_scale {
            return Err(ConfigError::invalid(
                "max_pinch_scale",
                "must be at least min_scale",
            ));
        }
        if !finite_positive(self.tap_zoom_scale) || self.tap_zoom_scale < self.min_scale {
            return Err(ConfigError::invalid(
                "tap_zoom_scale",
                "must be at least min_scale",
            ));
        }
        if !finite_positive(self.max_zoom_scale) || self.max_zoom_scale < self.tap_zoom_scale {
            return Err(ConfigError::invalid(
                "max_zoom_scale",
                "must be at least tap_zoom_scale",
            ));
        }
        if !self.reset_threshold.is_finite() || self.reset_threshold < self.min_scale {
            return Err(ConfigError::invalid(
                "reset_threshold",
                "must be at least min_scale",
            ));
        }
        if !finite_positive(self.min_animated_scale) {
            return Err(ConfigError::invalid("min_animated_scale", "must be positive"));
        }
        Ok(())
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A value is out of its usable range
    #[error("Invalid value for '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}
