/// Visibility-driven history fetching
///
/// One independent, abortable tokio task per uncached visible address.
/// Requests coalesce: a second request for an address already in flight is
/// suppressed. Tasks are fire-and-forget with respect to visibility (a row
/// scrolling away does not cancel its fetch; the result is cached for
/// later), but every task is owned and released at shutdown.
///
/// A failed fetch logs and leaves the address absent; other tokens are
/// unaffected and no retry is scheduled here — the next visibility pass
/// over a still-uncached address issues a fresh request.
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::logger::{self, LogTag};

use super::{HistoryCache, HistorySample};

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Contract for the single external history-fetch dependency: one request
/// per token address, returning samples in arrival order.
#[async_trait]
pub trait HistoryFetcher: Send + Sync + 'static {
    async fn fetch_history(&self, address: &str) -> Result<Vec<HistorySample>, FetchError>;
}

pub struct HistoryFetchController {
    fetcher: Arc<dyn HistoryFetcher>,
    cache: HistoryCache,
    in_flight: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

impl HistoryFetchController {
    pub fn new(fetcher: Arc<dyn HistoryFetcher>, cache: HistoryCache) -> Self {
        Self {
            fetcher,
            cache,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Issue fetches for every visible address that is neither cached nor
    /// already in flight. Requires a tokio runtime; without one the
    /// request is dropped (trends simply stay at their default).
    pub fn request_visible<'a>(&self, addresses: impl IntoIterator<Item = &'a str>) {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                logger::debug(
                    LogTag::History,
                    "no async runtime available, skipping history fetches",
                );
                return;
            }
        };

        for address in addresses {
            if self.cache.contains(address) {
                continue;
            }

            // The lock is held across the spawn so the task's self-removal
            // cannot run before its handle is registered.
            let mut in_flight = self.in_flight.lock();
            if in_flight.contains_key(address) {
                continue;
            }

            let fetcher = Arc::clone(&self.fetcher);
            let cache = self.cache.clone();
            let registry = Arc::clone(&self.in_flight);
            let owned = address.to_string();

            let handle = runtime.spawn(async move {
                match fetcher.fetch_history(&owned).await {
                    Ok(samples) => {
                        logger::debug(
                            LogTag::History,
                            &format!("fetched {} samples for {}", samples.len(), owned),
                        );
                        cache.insert(&owned, samples);
                    }
                    Err(e) => {
                        logger::warning(
                            LogTag::History,
                            &format!("history fetch failed for {}: {}", owned, e),
                        );
                    }
                }
                registry.lock().remove(&owned);
            });

            in_flight.insert(address.to_string(), handle);
        }
    }

    /// Number of fetches currently in flight.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.lock().len()
    }

    /// Await every in-flight fetch. Test and teardown helper; normal
    /// operation never waits on fetches.
    pub async fn flush(&self) {
        let handles: Vec<JoinHandle<()>> = {
            let mut in_flight = self.in_flight.lock();
            in_flight.drain().map(|(_, handle)| handle).collect()
        };
        futures::future::join_all(handles).await;
    }

    /// Abort every in-flight fetch. Called at list teardown so no task
    /// outlives the view that spawned it.
    pub fn shutdown(&self) {
        let mut in_flight = self.in_flight.lock();
        for (_, handle) in in_flight.drain() {
            handle.abort();
        }
    }
}

impl Drop for HistoryFetchController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
