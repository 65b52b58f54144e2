//! Persisted key→blob storage
//!
//! Every externally persisted piece of state (filter configuration, history
//! cache, scaling preference) is one JSON blob under a fixed key, stored as
//! `<key>.json` in the data directory. Loads happen synchronously at
//! initialization; saves serialize eagerly and write from a spawned task
//! when a tokio runtime is present so callers never block on disk.
//!
//! Corrupt or missing blobs are never an error for callers: `load` returns
//! `None` and logs, and the caller falls back to defaults/empty.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::logger::{self, LogTag};
use crate::paths;

/// Fixed key for the persisted filter configuration.
pub const FILTERS_KEY: &str = "filters";
/// Fixed key for the persisted history cache blob.
pub const HISTORY_CACHE_KEY: &str = "history_cache";
/// Fixed key for the persisted dynamic-scaling preference.
pub const DYNAMIC_SCALING_KEY: &str = "dynamic_scaling";

#[derive(Debug, Clone)]
pub struct Storage {
    base: PathBuf,
}

impl Storage {
    /// Storage rooted at the platform data directory.
    pub fn open_default() -> Self {
        let base = paths::ensure_data_dir().unwrap_or_else(|e| {
            logger::warning(
                LogTag::Storage,
                &format!("failed to create data dir: {} - using working directory", e),
            );
            PathBuf::from(".")
        });
        Self { base }
    }

    /// Storage rooted at an explicit directory (tests, embedded hosts).
    pub fn open_at(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{}.json", key))
    }

    /// Load a blob. Missing or malformed blobs yield `None` (malformed is
    /// logged so silent data loss stays visible).
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        if !path.exists() {
            return None;
        }

        match read_blob(&path) {
            Ok(value) => Some(value),
            Err(e) => {
                logger::warning(
                    LogTag::Storage,
                    &format!("discarding blob '{}': {:#}", key, e),
                );
                None
            }
        }
    }

    /// Persist a blob. Serialization happens on the caller's thread so the
    /// snapshot is consistent; the disk write is spawned when a runtime is
    /// available and inlined otherwise.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        let data = match serde_json::to_vec_pretty(value) {
            Ok(data) => data,
            Err(e) => {
                logger::error(
                    LogTag::Storage,
                    &format!("failed to serialize blob '{}': {}", key, e),
                );
                return;
            }
        };

        let path = self.path_for(key);
        let key = key.to_string();

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                if let Err(e) = tokio::fs::write(&path, data).await {
                    logger::warning(
                        LogTag::Storage,
                        &format!("failed to write blob '{}': {}", key, e),
                    );
                }
            });
        } else if let Err(e) = std::fs::write(&path, data) {
            logger::warning(
                LogTag::Storage,
                &format!("failed to write blob '{}': {}", key, e),
            );
        }
    }
}

fn read_blob<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Blob {
        count: u32,
        label: String,
    }

    #[test]
    fn round_trips_a_blob_without_a_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open_at(dir.path());

        let blob = Blob {
            count: 7,
            label: "seven".into(),
        };
        storage.save("sample", &blob);

        assert_eq!(storage.load::<Blob>("sample"), Some(blob));
    }

    #[test]
    fn missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open_at(dir.path());
        assert_eq!(storage.load::<Blob>("nope"), None);
    }

    #[test]
    fn corrupt_blob_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open_at(dir.path());
        std::fs::write(dir.path().join("bad.json"), b"{not json").unwrap();

        assert_eq!(storage.load::<Blob>("bad"), None);
    }

    #[tokio::test]
    async fn save_inside_a_runtime_lands_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open_at(dir.path());

        let blob = Blob {
            count: 1,
            label: "one".into(),
        };
        storage.save("async_sample", &blob);

        // The write is spawned; give the runtime a tick to flush it.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(storage.load::<Blob>("async_sample"), Some(blob));
    }
}
