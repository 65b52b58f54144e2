//! Structured logging for tokendeck
//!
//! This module provides a clean, ergonomic logging API with:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-module debug control via the TOKENDECK_DEBUG env var
//! - Colored console output
//!
//! ## Usage
//!
//! ```rust
//! use tokendeck::logger::{self, LogTag};
//!
//! logger::info(LogTag::Filtering, "view rederived");
//! logger::warning(LogTag::Storage, "filters blob malformed, using defaults");
//! logger::debug(LogTag::Viewport, "range=3..28"); // only with TOKENDECK_DEBUG=viewport
//! ```
//!
//! ## Initialization
//!
//! Call once at startup (optional — defaults apply otherwise):
//! ```rust
//! tokendeck::logger::init();
//! ```

mod config;
mod core;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system from environment variables.
///
/// Reads `TOKENDECK_LOG` (minimum level) and `TOKENDECK_DEBUG`
/// (comma-separated tag names that unlock debug output).
pub fn init() {
    config::init_from_env();
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (detailed diagnostics)
///
/// Debug logs are ONLY shown when the tag is listed in TOKENDECK_DEBUG.
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (very detailed tracing)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}
