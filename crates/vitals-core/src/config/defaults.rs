// Single source of truth for all default values.

// --- Config file ---
pub const DEFAULT_CONFIG_FILENAME: &str = "vitals.toml";

// --- Blood pressure ---
pub const DEFAULT_SYSTOLIC_HIGH: f64 = 180.0;
pub const DEFAULT_SYSTOLIC_LOW: f64 = 90.0;
pub const DEFAULT_DIASTOLIC_HIGH: f64 = 110.0;
pub const DEFAULT_DIASTOLIC_LOW: f64 = 60.0;
pub const DEFAULT_TREND_DELTA: f64 = 10.0;

// --- Saturation ---
pub const DEFAULT_SATURATION_LOW: f64 = 92.0;
pub const DEFAULT_RAPID_DROP_POINTS: f64 = 5.0;
pub const DEFAULT_RAPID_DROP_WINDOW_MS: i64 = 600_000; // 10 minutes

// --- Heart rate ---
pub const DEFAULT_HEART_RATE_LOW: f64 = 50.0;
pub const DEFAULT_HEART_RATE_HIGH: f64 = 100.0;

// --- ECG ---
pub const DEFAULT_ECG_WINDOW_SIZE: usize = 5;
pub const DEFAULT_ECG_PEAK_FACTOR: f64 = 2.0;

// --- Hypotensive hypoxemia ---
pub const DEFAULT_CORRELATION_WINDOW_MS: i64 = 60_000;
pub const DEFAULT_CORRELATION_SYSTOLIC_LOW: f64 = 90.0;
pub const DEFAULT_CORRELATION_SATURATION_LOW: f64 = 92.0;

// --- Manual alerts ---
pub const DEFAULT_MANUAL_TRIGGER_VALUE: f64 = 1.0;

// --- Annotation ---
pub const DEFAULT_PRIORITY_LEVEL: u8 = 2;
pub const DEFAULT_MAX_REPEATS: u32 = 3;

// --- Monitor ---
pub const DEFAULT_MONITOR_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_MONITOR_STATUS_EVERY: u64 = 30;
pub const DEFAULT_MONITOR_STATUS_WINDOW_MS: i64 = 60_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
