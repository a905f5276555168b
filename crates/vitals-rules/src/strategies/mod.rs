//! Built-in rule strategies.
//!
//! Every strategy reads thresholds from its section of `RulesConfig`,
//! skips non-finite values, and emits findings in iteration order without
//! deduplication.

pub mod blood_pressure;
pub mod correlation;
pub mod ecg;
pub mod heart_rate;
pub mod manual;
pub mod saturation;

pub use blood_pressure::{BloodPressureThreshold, BloodPressureTrend};
pub use correlation::HypotensiveHypoxemia;
pub use ecg::EcgSlidingWindow;
pub use heart_rate::HeartRateThreshold;
pub use manual::ManualAlertPassThrough;
pub use saturation::{SaturationRapidDrop, SaturationThreshold};
