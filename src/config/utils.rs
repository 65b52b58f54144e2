/// Configuration utilities - loading, reloading, and access helpers
///
/// The global config is seeded with defaults so library consumers that
/// never call `load_config()` still get working values.
use std::path::Path;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::logger::{self, LogTag};
use crate::paths;

use super::schemas::Config;

/// Global configuration instance - the single source of truth.
static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Load configuration from the default location (`data/config.toml`).
///
/// Call once at startup. Missing file means defaults; a malformed file is
/// logged and replaced by defaults rather than propagated.
pub fn load_config() {
    load_config_from_path(&paths::config_file_path());
}

/// Load configuration from a specific TOML file path.
pub fn load_config_from_path(path: &Path) {
    let config = read_config_file(path);
    *CONFIG.write() = config;
}

/// Reload configuration from the default location.
pub fn reload_config() {
    load_config();
}

fn read_config_file(path: &Path) -> Config {
    if !path.exists() {
        logger::info(
            LogTag::Config,
            &format!("config file '{}' not found, using defaults", path.display()),
        );
        return Config::default();
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            logger::warning(
                LogTag::Config,
                &format!("failed to read '{}': {} - using defaults", path.display(), e),
            );
            return Config::default();
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => config,
        Err(e) => {
            logger::warning(
                LogTag::Config,
                &format!("failed to parse '{}': {} - using defaults", path.display(), e),
            );
            Config::default()
        }
    }
}

/// Execute a function with read access to the configuration.
///
/// This is the recommended way to read configuration values.
///
/// # Example
/// ```
/// use tokendeck::config::with_config;
///
/// let overscan = with_config(|cfg| cfg.viewport.overscan_rows);
/// assert!(overscan > 0);
/// ```
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    let config = CONFIG.read();
    f(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_a_file() {
        let collapsed = with_config(|cfg| cfg.viewport.collapsed_row_px);
        assert!(collapsed > 0.0);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[viewport]\noverscan_rows = 8").unwrap();

        let config = read_config_file(file.path());
        assert_eq!(config.viewport.overscan_rows, 8);
        assert_eq!(config.history.cache_ttl_secs, 300);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "viewport = not valid toml [").unwrap();

        let config = read_config_file(file.path());
        assert_eq!(config.viewport.overscan_rows, 5);
    }
}
