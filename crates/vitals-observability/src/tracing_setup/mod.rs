//! Tracing setup: structured JSON logging and event helpers.
//!
//! Every entry point uses `try_init`, so a second call (or a host that
//! already installed a subscriber) is reported instead of panicking.

pub mod events;

use tracing_subscriber::EnvFilter;
use vitals_core::config::ObservabilityConfig;

/// Environment variable consulted for the log filter.
pub const LOG_ENV_VAR: &str = "VITALS_LOG";

/// Install a JSON subscriber filtered by `VITALS_LOG`, `info` when unset.
///
/// Returns false when a global subscriber was already installed.
pub fn init_tracing() -> bool {
    init_from_config(&ObservabilityConfig::default())
}

/// Install a JSON subscriber with an explicit filter, ignoring `VITALS_LOG`.
pub fn init_tracing_with_filter(filter: &str) -> bool {
    install(EnvFilter::new(filter), true)
}

/// Initialize tracing from the observability section of the config.
/// `VITALS_LOG` still wins over the configured level when set.
pub fn init_from_config(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    install(filter, config.json)
}

fn install(filter: EnvFilter, json: bool) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if json {
        builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
            .is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
