//! Top-level configuration with 3-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{defaults, AnnotationConfig, MonitorConfig, ObservabilityConfig, RulesConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`VITALS_*`)
/// 2. Project config (`vitals.toml` in the given root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    pub rules: RulesConfig,
    pub annotation: AnnotationConfig,
    pub monitor: MonitorConfig,
    pub observability: ObservabilityConfig,
}

impl VitalsConfig {
    /// Load configuration with 3-layer resolution. A missing project file
    /// falls back to defaults; an unreadable or invalid one is an error.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(defaults::DEFAULT_CONFIG_FILENAME);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse a single TOML file without env overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bp = &self.rules.blood_pressure;
        let rules = &self.rules;
        let thresholds = [
            ("rules.blood_pressure.systolic_high", bp.systolic_high),
            ("rules.blood_pressure.systolic_low", bp.systolic_low),
            ("rules.blood_pressure.diastolic_high", bp.diastolic_high),
            ("rules.blood_pressure.diastolic_low", bp.diastolic_low),
            ("rules.blood_pressure.trend_delta", bp.trend_delta),
            ("rules.saturation.low_threshold", rules.saturation.low_threshold),
            ("rules.saturation.rapid_drop_points", rules.saturation.rapid_drop_points),
            ("rules.heart_rate.low", rules.heart_rate.low),
            ("rules.heart_rate.high", rules.heart_rate.high),
            ("rules.ecg.peak_factor", rules.ecg.peak_factor),
            ("rules.correlation.systolic_low", rules.correlation.systolic_low),
            ("rules.correlation.saturation_low", rules.correlation.saturation_low),
            ("rules.manual.trigger_value", rules.manual.trigger_value),
        ];
        // NaN slips through every ordered comparison below.
        if let Some((field, _)) = thresholds.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(field, "must be a finite number"));
        }

        if bp.systolic_low >= bp.systolic_high {
            return Err(invalid(
                "rules.blood_pressure.systolic_low",
                "must be below systolic_high",
            ));
        }
        if bp.diastolic_low >= bp.diastolic_high {
            return Err(invalid(
                "rules.blood_pressure.diastolic_low",
                "must be below diastolic_high",
            ));
        }
        if bp.trend_delta < 0.0 {
            return Err(invalid(
                "rules.blood_pressure.trend_delta",
                "must not be negative",
            ));
        }
        if self.rules.heart_rate.low >= self.rules.heart_rate.high {
            return Err(invalid("rules.heart_rate.low", "must be below high"));
        }
        if self.rules.saturation.rapid_drop_window_ms <= 0 {
            return Err(invalid(
                "rules.saturation.rapid_drop_window_ms",
                "must be greater than 0",
            ));
        }
        if self.rules.ecg.window_size < 2 {
            return Err(invalid("rules.ecg.window_size", "must be at least 2"));
        }
        if self.rules.ecg.peak_factor <= 0.0 {
            return Err(invalid("rules.ecg.peak_factor", "must be greater than 0"));
        }
        if self.rules.correlation.window_ms <= 0 {
            return Err(invalid(
                "rules.correlation.window_ms",
                "must be greater than 0",
            ));
        }
        if self.annotation.priority_level == 0 {
            return Err(invalid(
                "annotation.priority_level",
                "must be greater than 0",
            ));
        }
        if self.annotation.max_repeats == 0 {
            return Err(invalid("annotation.max_repeats", "must be greater than 0"));
        }
        if self.monitor.interval_ms == 0 {
            return Err(invalid("monitor.interval_ms", "must be greater than 0"));
        }
        if self.monitor.status_every == 0 {
            return Err(invalid("monitor.status_every", "must be greater than 0"));
        }
        Ok(())
    }

    /// Apply environment variable overrides. Unparseable values are ignored.
    fn apply_env_overrides(&mut self) {
        if let Some(v) = env_parse::<u8>("VITALS_PRIORITY_LEVEL") {
            self.annotation.priority_level = v;
        }
        if let Some(v) = env_parse::<u32>("VITALS_MAX_REPEATS") {
            self.annotation.max_repeats = v;
        }
        if let Some(v) = env_parse("VITALS_REPEAT_MODE") {
            self.annotation.repeat_mode = v;
        }
        if let Some(v) = env_parse("VITALS_ECG_FALLBACK") {
            self.rules.ecg.fallback = v;
        }
        if let Some(v) = env_parse::<u64>("VITALS_MONITOR_INTERVAL_MS") {
            self.monitor.interval_ms = v;
        }
        if let Ok(val) = std::env::var("VITALS_LOG_LEVEL") {
            self.observability.log_level = val;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
