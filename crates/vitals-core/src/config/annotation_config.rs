use serde::{Deserialize, Serialize};

use super::defaults;

/// How the repeat annotator counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// Fresh counter per alert, checked once: every alert reads "Repeated 1 times".
    #[default]
    PerAlert,
    /// Count persists across cycles per (patient, condition).
    Tracked,
}

impl std::str::FromStr for RepeatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per_alert" => Ok(Self::PerAlert),
            "tracked" => Ok(Self::Tracked),
            other => Err(format!("unknown repeat mode: {other}")),
        }
    }
}

/// Annotation pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Priority stamped on every alert. There is no per-severity level.
    pub priority_level: u8,
    /// Upper bound of the repeat counter.
    pub max_repeats: u32,
    pub repeat_mode: RepeatMode,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            priority_level: defaults::DEFAULT_PRIORITY_LEVEL,
            max_repeats: defaults::DEFAULT_MAX_REPEATS,
            repeat_mode: RepeatMode::default(),
        }
    }
}
