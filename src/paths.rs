//! Centralized path resolution for tokendeck
//!
//! All file and directory paths are resolved through this module to ensure
//! consistent behavior across platforms.
//!
//! ## Path Strategy
//!
//! Platform-standard application data locations:
//! - **macOS**: `~/Library/Application Support/TokenDeck/`
//! - **Windows**: `%LOCALAPPDATA%\TokenDeck\`
//! - **Linux**: `$XDG_DATA_HOME/TokenDeck/` (fallback `~/.local/share/TokenDeck/`)
//!
//! ## Directory Structure
//!
//! ```text
//! TokenDeck/
//! └── data/
//!     ├── config.toml
//!     └── *.json (persisted blobs)
//! ```

use std::path::PathBuf;

use once_cell::sync::Lazy;

use crate::logger::{self, LogTag};

const APP_DIR: &str = "TokenDeck";

/// Lazy-initialized base directory (thread-safe)
static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

/// Resolves the base directory for all tokendeck data
///
/// Uses platform-specific application data locations, falling back to the
/// working directory when no home is resolvable (containers, CI).
fn resolve_base_directory() -> PathBuf {
    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(dir) = dirs::data_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(APP_DIR);
    }

    PathBuf::from(".").join(APP_DIR)
}

/// Base directory for all application files.
pub fn base_dir() -> PathBuf {
    BASE_DIRECTORY.clone()
}

/// Directory holding config.toml and persisted JSON blobs.
pub fn data_dir() -> PathBuf {
    base_dir().join("data")
}

/// Path of the TOML configuration file.
pub fn config_file_path() -> PathBuf {
    data_dir().join("config.toml")
}

/// Create the data directory if it does not exist yet.
pub fn ensure_data_dir() -> std::io::Result<PathBuf> {
    let dir = data_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        logger::info(
            LogTag::System,
            &format!("created data directory at {}", dir.display()),
        );
    }
    Ok(dir)
}
