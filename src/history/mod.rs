//! History cache for per-token liquidity/holder time series
//!
//! One record per token address, seeded from a single persisted blob at
//! initialization and written back (non-blocking) after each insert. The
//! persisted blob carries one retrieval timestamp for the whole cache and
//! is discarded wholesale when older than the configured TTL.
//!
//! Staleness is checked ONLY at load time: within a running session an
//! entry, once present, is never considered stale again. That asymmetry is
//! deliberate (see DESIGN.md) — do not add per-read expiry here.

pub mod fetch;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::logger::{self, LogTag};
use crate::storage::{Storage, HISTORY_CACHE_KEY};
use crate::trends::TrendStore;

pub use fetch::{FetchError, HistoryFetchController, HistoryFetcher};

/// One time-stamped observation of a token's aggregate state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    pub timestamp: DateTime<Utc>,
    pub total_liquidity: f64,
    pub holder_count: u64,
}

/// Samples for one token plus the moment they were retrieved.
#[derive(Debug, Clone)]
pub struct HistoryRecord {
    pub samples: Vec<HistorySample>,
    pub fetched_at: DateTime<Utc>,
}

/// On-disk shape: one timestamp for the whole cache.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedHistory {
    timestamp: DateTime<Utc>,
    data: HashMap<String, Vec<HistorySample>>,
}

#[derive(Clone)]
pub struct HistoryCache {
    inner: Arc<RwLock<HashMap<String, HistoryRecord>>>,
    trends: TrendStore,
    storage: Storage,
}

impl HistoryCache {
    /// Load the cache from its persisted blob.
    ///
    /// A blob older than the configured TTL (or malformed — `Storage`
    /// already swallows that) yields an empty cache. Seeded entries
    /// recompute their trends immediately so the store is render-ready.
    pub fn load(storage: Storage, trends: TrendStore) -> Self {
        let cache = Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            trends,
            storage,
        };

        if let Some(blob) = cache.storage.load::<PersistedHistory>(HISTORY_CACHE_KEY) {
            let ttl_secs = config::with_config(|cfg| cfg.history.cache_ttl_secs);
            let age = Utc::now().signed_duration_since(blob.timestamp);

            if age < Duration::seconds(ttl_secs) {
                let mut inner = cache.inner.write();
                for (address, samples) in blob.data {
                    cache.trends.recompute(&address, &samples);
                    inner.insert(
                        address,
                        HistoryRecord {
                            samples,
                            fetched_at: blob.timestamp,
                        },
                    );
                }
                logger::info(
                    LogTag::History,
                    &format!("loaded {} cached histories", inner.len()),
                );
            } else {
                logger::info(
                    LogTag::History,
                    &format!(
                        "persisted history is {}s old (ttl {}s) - starting empty",
                        age.num_seconds(),
                        ttl_secs
                    ),
                );
            }
        }

        cache
    }

    /// Empty cache that still persists through the given storage.
    pub fn empty(storage: Storage, trends: TrendStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            trends,
            storage,
        }
    }

    /// Whether an entry exists. No staleness check by design.
    pub fn contains(&self, address: &str) -> bool {
        self.inner.read().contains_key(address)
    }

    /// Samples for a token. No staleness check by design.
    pub fn get(&self, address: &str) -> Option<Vec<HistorySample>> {
        self.inner.read().get(address).map(|r| r.samples.clone())
    }

    /// Store freshly fetched samples, recompute the token's trends and
    /// schedule a persistence write.
    pub fn insert(&self, address: &str, samples: Vec<HistorySample>) {
        self.trends.recompute(address, &samples);
        self.inner.write().insert(
            address.to_string(),
            HistoryRecord {
                samples,
                fetched_at: Utc::now(),
            },
        );
        self.schedule_save();
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    fn schedule_save(&self) {
        let data: HashMap<String, Vec<HistorySample>> = self
            .inner
            .read()
            .iter()
            .map(|(address, record)| (address.clone(), record.samples.clone()))
            .collect();

        let blob = PersistedHistory {
            timestamp: Utc::now(),
            data,
        };
        self.storage.save(HISTORY_CACHE_KEY, &blob);
    }
}
