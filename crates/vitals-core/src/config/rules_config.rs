use serde::{Deserialize, Serialize};

use super::defaults;

/// Thresholds and windows for every built-in rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub blood_pressure: BloodPressureRules,
    pub saturation: SaturationRules,
    pub heart_rate: HeartRateRules,
    pub ecg: EcgRules,
    pub correlation: CorrelationRules,
    pub manual: ManualRules,
}

/// Critical bounds (strict comparisons) and the trend step, in mmHg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloodPressureRules {
    pub systolic_high: f64,
    pub systolic_low: f64,
    pub diastolic_high: f64,
    pub diastolic_low: f64,
    /// Each step of a trend must exceed this delta.
    pub trend_delta: f64,
}

impl Default for BloodPressureRules {
    fn default() -> Self {
        Self {
            systolic_high: defaults::DEFAULT_SYSTOLIC_HIGH,
            systolic_low: defaults::DEFAULT_SYSTOLIC_LOW,
            diastolic_high: defaults::DEFAULT_DIASTOLIC_HIGH,
            diastolic_low: defaults::DEFAULT_DIASTOLIC_LOW,
            trend_delta: defaults::DEFAULT_TREND_DELTA,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaturationRules {
    /// Saturation strictly below this is low, in percent.
    pub low_threshold: f64,
    /// Minimum drop between adjacent readings, in percentage points.
    pub rapid_drop_points: f64,
    /// Maximum gap between the two readings of a rapid drop.
    pub rapid_drop_window_ms: i64,
}

impl Default for SaturationRules {
    fn default() -> Self {
        Self {
            low_threshold: defaults::DEFAULT_SATURATION_LOW,
            rapid_drop_points: defaults::DEFAULT_RAPID_DROP_POINTS,
            rapid_drop_window_ms: defaults::DEFAULT_RAPID_DROP_WINDOW_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartRateRules {
    pub low: f64,
    pub high: f64,
}

impl Default for HeartRateRules {
    fn default() -> Self {
        Self {
            low: defaults::DEFAULT_HEART_RATE_LOW,
            high: defaults::DEFAULT_HEART_RATE_HIGH,
        }
    }
}

/// What the ECG rule does when there are fewer samples than the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EcgFallbackPolicy {
    /// No alert until a full window is available.
    #[default]
    None,
    /// One peak alert at the largest observed sample.
    LargestObserved,
}

impl std::str::FromStr for EcgFallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "largest_observed" => Ok(Self::LargestObserved),
            other => Err(format!("unknown ECG fallback policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcgRules {
    pub window_size: usize,
    /// A sample above `peak_factor × window mean` is a peak.
    pub peak_factor: f64,
    pub fallback: EcgFallbackPolicy,
}

impl Default for EcgRules {
    fn default() -> Self {
        Self {
            window_size: defaults::DEFAULT_ECG_WINDOW_SIZE,
            peak_factor: defaults::DEFAULT_ECG_PEAK_FACTOR,
            fallback: EcgFallbackPolicy::default(),
        }
    }
}

/// Hypotensive hypoxemia: low systolic and low saturation close in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationRules {
    /// Readings must be strictly closer than this.
    pub window_ms: i64,
    pub systolic_low: f64,
    pub saturation_low: f64,
}

impl Default for CorrelationRules {
    fn default() -> Self {
        Self {
            window_ms: defaults::DEFAULT_CORRELATION_WINDOW_MS,
            systolic_low: defaults::DEFAULT_CORRELATION_SYSTOLIC_LOW,
            saturation_low: defaults::DEFAULT_CORRELATION_SATURATION_LOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualRules {
    /// Value marking a manual alert as triggered; anything else is untriggered.
    pub trigger_value: f64,
}

impl Default for ManualRules {
    fn default() -> Self {
        Self {
            trigger_value: defaults::DEFAULT_MANUAL_TRIGGER_VALUE,
        }
    }
}
