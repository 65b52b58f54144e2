/// Configuration schemas - all config structures defined once with defaults
///
/// Each struct is defined using the config_struct! macro which provides:
/// - Single-source definition (no repetition)
/// - Embedded defaults
/// - Serde support
use crate::config_struct;

// ============================================================================
// VIEWPORT CONFIGURATION
// ============================================================================

config_struct! {
    /// Row sizing and windowing for the virtualized list
    pub struct ViewportConfig {
        /// Fallback height for a collapsed row without a measurement
        collapsed_row_px: f64 = 40.0,

        /// Fallback height for an expanded row (full chart) without a measurement
        expanded_row_px: f64 = 760.0,

        /// Extra rows rendered beyond each viewport edge
        overscan_rows: usize = 5,
    }
}

// ============================================================================
// HISTORY CONFIGURATION
// ============================================================================

config_struct! {
    /// History cache behavior
    pub struct HistoryConfig {
        /// Persisted history blob is discarded at load when older than this
        cache_ttl_secs: i64 = 300,
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration - one section per subsystem
    pub struct Config {
        viewport: ViewportConfig = ViewportConfig::default(),
        history: HistoryConfig = HistoryConfig::default(),
    }
}
