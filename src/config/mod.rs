//! Configuration system
//!
//! All tunables are defined once with embedded defaults via the
//! `config_struct!` macro and loaded from `data/config.toml`. A missing or
//! malformed file falls back to defaults with a logged warning.

mod macros;
mod schemas;
mod utils;

pub use schemas::{Config, HistoryConfig, ViewportConfig};
pub use utils::{load_config, load_config_from_path, reload_config, with_config};
