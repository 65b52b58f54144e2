/// Logger configuration and environment-driven initialization
///
/// The configuration lives in a global cell so the free-function logging
/// API stays allocation-free on the hot path. Defaults apply until
/// `logger::init()` is called.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::levels::LogLevel;
use super::tags::LogTag;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum level that is emitted (errors always pass).
    pub min_level: LogLevel,
    /// Lowercase tag keys with debug output unlocked.
    pub debug_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Read the active logger configuration.
pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

/// Replace the active logger configuration.
pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

/// Initialize from TOKENDECK_LOG / TOKENDECK_DEBUG environment variables.
///
/// `TOKENDECK_LOG=debug` raises the minimum level; `TOKENDECK_DEBUG=a,b`
/// unlocks debug output for the named tags without raising the level for
/// everything else.
pub fn init_from_env() {
    let mut config = LoggerConfig::default();

    if let Ok(value) = std::env::var("TOKENDECK_LOG") {
        if let Some(level) = LogLevel::parse(value.trim()) {
            config.min_level = level;
        }
    }

    if let Ok(value) = std::env::var("TOKENDECK_DEBUG") {
        config.debug_tags = value
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
    }

    set_logger_config(config);
}

/// Check whether debug output is unlocked for a tag.
pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    let config = LOGGER_CONFIG.read();
    config.min_level >= LogLevel::Debug || config.debug_tags.contains(&tag.to_debug_key())
}
