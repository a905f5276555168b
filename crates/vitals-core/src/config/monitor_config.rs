use serde::{Deserialize, Serialize};

use super::defaults;

/// Periodic monitor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Delay between evaluation sweeps over all patients.
    pub interval_ms: u64,
    /// Emit a status summary every N sweeps.
    pub status_every: u64,
    /// Look-back window for the "recent readings" count in status summaries.
    pub status_window_ms: i64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_ms: defaults::DEFAULT_MONITOR_INTERVAL_MS,
            status_every: defaults::DEFAULT_MONITOR_STATUS_EVERY,
            status_window_ms: defaults::DEFAULT_MONITOR_STATUS_WINDOW_MS,
        }
    }
}
