//! Configuration for the alert engine.
//! TOML-based, 3-layer resolution: env > project file > defaults.

pub mod annotation_config;
pub mod defaults;
pub mod monitor_config;
pub mod observability_config;
pub mod rules_config;
pub mod vitals_config;

pub use annotation_config::{AnnotationConfig, RepeatMode};
pub use monitor_config::MonitorConfig;
pub use observability_config::ObservabilityConfig;
pub use rules_config::{
    BloodPressureRules, CorrelationRules, EcgFallbackPolicy, EcgRules, HeartRateRules,
    ManualRules, RulesConfig, SaturationRules,
};
pub use vitals_config::VitalsConfig;
