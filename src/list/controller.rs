use std::collections::VecDeque;
use std::ops::Range;
use std::sync::Arc;

use crate::config;
use crate::filtering::{self, FilterState};
use crate::history::{HistoryCache, HistoryFetchController, HistoryFetcher};
use crate::logger::{self, LogTag};
use crate::storage::{Storage, DYNAMIC_SCALING_KEY, FILTERS_KEY};
use crate::tokens::types::Token;
use crate::trends::TrendStore;
use crate::viewport::{
    ExpansionState, RowHeightModel, ScrollAlign, ScrollBehavior, ScrollCommand, Virtualizer,
};

use super::types::RowView;

/// Owner of the token-list state machine.
///
/// All mutation happens through `&mut self` on the host's thread; the only
/// concurrency is the per-token history fetches, which the controller owns
/// and aborts at shutdown. Scroll effects are never applied inline: they
/// queue as `ScrollCommand`s for the host to run after its layout pass, so
/// height recalculation cannot cause a visible jump.
pub struct TokenListController {
    tokens: Vec<Token>,
    filters: FilterState,
    view: Vec<Token>,

    expansion: ExpansionState,
    heights: RowHeightModel,
    virtualizer: Virtualizer,

    trends: TrendStore,
    cache: HistoryCache,
    fetches: HistoryFetchController,
    storage: Storage,

    dynamic_scaling: bool,
    pending_scrolls: VecDeque<ScrollCommand>,
}

impl TokenListController {
    /// Build a controller over explicit storage (tests, embedded hosts).
    ///
    /// Restores the persisted filter configuration, scaling preference and
    /// history cache; malformed blobs fall back to defaults.
    pub fn new(storage: Storage, fetcher: Arc<dyn HistoryFetcher>) -> Self {
        let filters = storage.load::<FilterState>(FILTERS_KEY).unwrap_or_default();
        let dynamic_scaling = storage.load::<bool>(DYNAMIC_SCALING_KEY).unwrap_or(false);

        let trends = TrendStore::new();
        let cache = HistoryCache::load(storage.clone(), trends.clone());
        let fetches = HistoryFetchController::new(fetcher, cache.clone());

        let (collapsed_px, expanded_px, overscan) = config::with_config(|cfg| {
            (
                cfg.viewport.collapsed_row_px,
                cfg.viewport.expanded_row_px,
                cfg.viewport.overscan_rows,
            )
        });

        Self {
            tokens: Vec::new(),
            filters,
            view: Vec::new(),
            expansion: ExpansionState::new(),
            heights: RowHeightModel::new(collapsed_px, expanded_px),
            virtualizer: Virtualizer::new(overscan),
            trends,
            cache,
            fetches,
            storage,
            dynamic_scaling,
            pending_scrolls: VecDeque::new(),
        }
    }

    /// Controller over the platform data directory.
    pub fn open_default(fetcher: Arc<dyn HistoryFetcher>) -> Self {
        Self::new(Storage::open_default(), fetcher)
    }

    // ========================================================================
    // Inputs from the data source and the host
    // ========================================================================

    /// Replace the raw collection wholesale (every refresh cycle).
    ///
    /// Arbitrary insertion/removal/reordering between refreshes is fine:
    /// the view is rederived from scratch and positional caches reset.
    pub fn set_tokens(&mut self, tokens: Vec<Token>) {
        self.tokens = tokens;
        self.rederive();
    }

    /// The single entry point for filter mutation.
    ///
    /// Persists the new configuration, rederives the view and resets the
    /// derived state that depends on it (measured heights, scroll).
    pub fn update_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.storage.save(FILTERS_KEY, &self.filters);
        self.rederive();
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Host scroll feedback (the scroll-position source).
    pub fn set_scroll_offset(&mut self, offset_px: f64) {
        self.virtualizer.set_scroll_offset(offset_px);
    }

    /// Viewport resize. Measured heights are positional AND
    /// width-dependent, so the model resets; the scroll offset is restored
    /// through a deferred command once the host has re-laid-out.
    pub fn set_viewport_height(&mut self, height_px: f64) {
        if (height_px - self.virtualizer.viewport_height()).abs() < f64::EPSILON {
            return;
        }
        self.virtualizer.set_viewport_height(height_px);
        self.heights.invalidate_all();
        self.remeasure_preserving_scroll();
    }

    /// Record an observed rendered height for a visible row.
    pub fn record_row_height(&mut self, index: usize, height_px: f64) {
        if index >= self.view.len() {
            return;
        }
        self.heights.record(index, height_px);
        self.sync_virtualizer();
    }

    // ========================================================================
    // Expansion
    // ========================================================================

    /// Flip one token's detail view.
    ///
    /// Invalidates that row's measured height only, re-measures, and queues
    /// a smooth scroll anchoring the toggled row near the viewport top.
    pub fn toggle_expansion(&mut self, address: &str) {
        let now_expanded = self.expansion.toggle(address);

        if let Some(index) = self.view.iter().position(|t| t.address == address) {
            self.heights.invalidate(index);
            self.sync_virtualizer();
            let command =
                self.virtualizer
                    .scroll_to(index, ScrollAlign::Start, ScrollBehavior::Smooth);
            self.pending_scrolls.push_back(command);
        }

        logger::debug(
            LogTag::Viewport,
            &format!(
                "expansion toggled address={} expanded={}",
                address, now_expanded
            ),
        );
    }

    /// Bulk toggle over the filtered set. Asymmetric: any expanded row in
    /// the current view collapses everything; none expands every filtered
    /// token.
    pub fn toggle_expand_all(&mut self) {
        let addresses: Vec<String> = self.view.iter().map(|t| t.address.clone()).collect();
        let expanded = self
            .expansion
            .toggle_all(addresses.iter().map(|a| a.as_str()));

        self.heights.invalidate_all();
        self.remeasure_preserving_scroll();

        logger::debug(
            LogTag::Viewport,
            &format!(
                "bulk expansion expanded={} rows={}",
                expanded,
                addresses.len()
            ),
        );
    }

    pub fn is_expanded(&self, address: &str) -> bool {
        self.expansion.is_expanded(address)
    }

    pub fn expanded_count(&self) -> usize {
        self.expansion.len()
    }

    // ========================================================================
    // Outputs to the renderer
    // ========================================================================

    /// Render-ready rows for the current visible window (overscan
    /// included). Also drives the history fetch controller for every
    /// visible, uncached token.
    pub fn visible_rows(&mut self) -> Vec<RowView> {
        let range = self.virtualizer.visible_range();

        self.fetches
            .request_visible(self.view[range.clone()].iter().map(|t| t.address.as_str()));

        self.view[range.clone()]
            .iter()
            .enumerate()
            .map(|(offset, token)| RowView {
                index: range.start + offset,
                token: token.clone(),
                expanded: self.expansion.is_expanded(&token.address),
                trends: self.trends.get_or_default(&token.address),
                dynamic_scaling: self.dynamic_scaling,
            })
            .collect()
    }

    pub fn visible_range(&self) -> Range<usize> {
        self.virtualizer.visible_range()
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    pub fn view(&self) -> &[Token] {
        &self.view
    }

    pub fn total_extent(&self) -> f64 {
        self.virtualizer.total_extent()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.virtualizer.scroll_offset()
    }

    pub fn has_measured_height(&self, index: usize) -> bool {
        self.heights.has_measurement(index)
    }

    /// Scroll commands queued by height-affecting mutations. The host
    /// drains these AFTER its layout pass so the restored offsets land on
    /// the recalculated extent.
    pub fn drain_scroll_commands(&mut self) -> Vec<ScrollCommand> {
        self.pending_scrolls.drain(..).collect()
    }

    // ========================================================================
    // Preferences & shared stores
    // ========================================================================

    pub fn dynamic_scaling(&self) -> bool {
        self.dynamic_scaling
    }

    pub fn set_dynamic_scaling(&mut self, enabled: bool) {
        self.dynamic_scaling = enabled;
        self.storage.save(DYNAMIC_SCALING_KEY, &enabled);
    }

    pub fn trend_store(&self) -> TrendStore {
        self.trends.clone()
    }

    pub fn history_cache(&self) -> HistoryCache {
        self.cache.clone()
    }

    pub fn fetches(&self) -> &HistoryFetchController {
        &self.fetches
    }

    /// Release owned process-wide resources (in-flight fetch tasks). Also
    /// runs on Drop via the fetch controller.
    pub fn shutdown(&mut self) {
        self.fetches.shutdown();
    }

    // ========================================================================
    // Derivation
    // ========================================================================

    fn rederive(&mut self) {
        self.view = filtering::derive_view(&self.tokens, &self.filters);
        self.heights.invalidate_all();
        self.sync_virtualizer();

        // Result identity/length may have changed: back to the top.
        self.virtualizer.set_scroll_offset(0.0);
        self.pending_scrolls.push_back(ScrollCommand {
            offset: 0.0,
            behavior: ScrollBehavior::Instant,
        });

        logger::debug(
            LogTag::Filtering,
            &format!(
                "view rederived rows={} of {} tokens",
                self.view.len(),
                self.tokens.len()
            ),
        );
    }

    fn sync_virtualizer(&mut self) {
        let row_heights: Vec<f64> = self
            .view
            .iter()
            .enumerate()
            .map(|(index, token)| {
                self.heights
                    .estimate(index, self.expansion.is_expanded(&token.address))
            })
            .collect();
        self.virtualizer.remeasure(&row_heights);
    }

    /// Re-measurement protocol: the offset captured before the mutation is
    /// re-applied through a deferred command (clamped to the new extent).
    fn remeasure_preserving_scroll(&mut self) {
        let captured = self.virtualizer.scroll_offset();
        self.sync_virtualizer();
        self.virtualizer.set_scroll_offset(captured);
        self.pending_scrolls.push_back(ScrollCommand {
            offset: self.virtualizer.scroll_offset(),
            behavior: ScrollBehavior::Instant,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{FetchError, HistorySample};
    use crate::tokens::types::{RiskLevel, ZERO_ADDRESS};
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubFetcher {
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl HistoryFetcher for StubFetcher {
        async fn fetch_history(&self, _address: &str) -> Result<Vec<HistorySample>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![
                HistorySample {
                    timestamp: Utc::now() - Duration::seconds(60),
                    total_liquidity: 10.0,
                    holder_count: 5,
                },
                HistorySample {
                    timestamp: Utc::now(),
                    total_liquidity: 20.0,
                    holder_count: 10,
                },
            ])
        }
    }

    fn token(address: &str, age_hours: f64) -> Token {
        Token {
            address: address.to_string(),
            name: format!("Token {}", address),
            symbol: address.to_uppercase(),
            age_hours,
            holder_count: 100,
            liquidity: 10_000.0,
            buy_tax_percent: 1.0,
            sell_tax_percent: 1.0,
            is_honeypot: false,
            risk: RiskLevel::Safe,
            owner: ZERO_ADDRESS.to_string(),
            liquidity_lock: None,
        }
    }

    fn harness() -> (TokenListController, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let controller = TokenListController::new(Storage::open_at(dir.path()), StubFetcher::new());
        (controller, dir)
    }

    fn seeded(count: usize) -> (TokenListController, tempfile::TempDir) {
        let (mut controller, dir) = harness();
        let tokens: Vec<Token> = (0..count)
            .map(|i| token(&format!("0x{:03}", i), (count - i) as f64))
            .collect();
        controller.set_tokens(tokens);
        controller.set_viewport_height(400.0);
        controller.drain_scroll_commands();
        (controller, dir)
    }

    #[test]
    fn missing_filters_blob_means_defaults() {
        let (controller, _dir) = harness();
        assert_eq!(controller.filters(), &FilterState::default());
    }

    #[test]
    fn corrupt_filters_blob_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("filters.json"), b"{broken").unwrap();
        let controller = TokenListController::new(Storage::open_at(dir.path()), StubFetcher::new());
        assert_eq!(controller.filters(), &FilterState::default());
    }

    #[test]
    fn persisted_filters_are_restored() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open_at(dir.path());
        let saved = FilterState {
            min_holders: 42,
            sort_by: "liquidity".into(),
            ..FilterState::default()
        };
        storage.save(FILTERS_KEY, &saved);

        let controller = TokenListController::new(storage, StubFetcher::new());
        assert_eq!(controller.filters().min_holders, 42);
    }

    #[test]
    fn filter_update_resets_heights_and_scrolls_to_top() {
        let (mut controller, _dir) = seeded(30);
        controller.record_row_height(2, 90.0);
        controller.set_scroll_offset(300.0);
        assert!(controller.has_measured_height(2));

        controller.update_filters(FilterState {
            sort_by: "holders".into(),
            ..FilterState::default()
        });

        assert!(!controller.has_measured_height(2));
        assert_eq!(controller.scroll_offset(), 0.0);
        let commands = controller.drain_scroll_commands();
        assert!(commands
            .iter()
            .any(|c| c.offset == 0.0 && c.behavior == ScrollBehavior::Instant));
    }

    #[test]
    fn wholesale_refresh_rederives_with_the_same_discipline() {
        let (mut controller, _dir) = seeded(10);
        controller.record_row_height(0, 55.0);

        controller.set_tokens((0..5).map(|i| token(&format!("0xn{:02}", i), 1.0)).collect());

        assert_eq!(controller.view_len(), 5);
        assert!(!controller.has_measured_height(0));
        assert!(!controller.drain_scroll_commands().is_empty());
    }

    #[test]
    fn toggle_expansion_invalidates_one_row_and_anchors_it() {
        let (mut controller, _dir) = seeded(30);
        controller.record_row_height(4, 44.0);
        controller.record_row_height(5, 46.0);

        let target = controller.view()[5].address.clone();
        controller.toggle_expansion(&target);

        // Only the toggled row's measurement is gone.
        assert!(controller.has_measured_height(4));
        assert!(!controller.has_measured_height(5));
        assert!(controller.is_expanded(&target));

        // Deferred smooth scroll targeting the toggled row's top.
        let commands = controller.drain_scroll_commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].behavior, ScrollBehavior::Smooth);
        let expected_top = 44.0 + 4.0 * 40.0; // row 4 measured, rows 0-3 estimated
        assert!((commands[0].offset - expected_top).abs() < 1e-9);
    }

    #[test]
    fn expanded_rows_grow_the_extent() {
        let (mut controller, _dir) = seeded(10);
        let flat_extent = controller.total_extent();
        assert_eq!(flat_extent, 400.0);

        let target = controller.view()[0].address.clone();
        controller.toggle_expansion(&target);
        assert_eq!(controller.total_extent(), 760.0 + 9.0 * 40.0);
    }

    #[test]
    fn expand_all_is_asymmetric_over_the_filtered_set() {
        let (mut controller, _dir) = seeded(3);
        let already = controller.view()[1].address.clone();
        controller.toggle_expansion(&already);
        controller.drain_scroll_commands();

        // One of three expanded → bulk operation collapses all three.
        controller.toggle_expand_all();
        assert_eq!(controller.expanded_count(), 0);

        // None expanded → expands every filtered token.
        controller.toggle_expand_all();
        assert_eq!(controller.expanded_count(), 3);
    }

    #[test]
    fn expand_all_touches_only_filtered_tokens() {
        let (mut controller, _dir) = seeded(20);
        controller.update_filters(FilterState {
            max_records: 5,
            ..FilterState::default()
        });
        controller.drain_scroll_commands();

        controller.toggle_expand_all();
        assert_eq!(controller.expanded_count(), 5);
    }

    #[test]
    fn resize_clears_measurements_and_restores_scroll() {
        let (mut controller, _dir) = seeded(50);
        controller.record_row_height(3, 80.0);
        controller.set_scroll_offset(600.0);

        controller.set_viewport_height(500.0);

        assert!(!controller.has_measured_height(3));
        let commands = controller.drain_scroll_commands();
        assert!(commands
            .iter()
            .any(|c| c.offset == 600.0 && c.behavior == ScrollBehavior::Instant));
        assert_eq!(controller.scroll_offset(), 600.0);
    }

    #[test]
    fn render_contract_defaults_to_stagnant_trends() {
        let (mut controller, _dir) = seeded(10);
        let rows = controller.visible_rows();
        assert!(!rows.is_empty());
        for row in &rows {
            assert_eq!(row.trends, crate::trends::TrendPair::default());
            assert!(!row.dynamic_scaling);
        }
    }

    #[tokio::test]
    async fn visible_rows_drive_history_fetches() {
        let (mut controller, _dir) = seeded(10);

        let rows = controller.visible_rows();
        assert!(!rows.is_empty());
        controller.fetches().flush().await;

        let first = controller.view()[0].address.clone();
        assert!(controller.history_cache().contains(&first));
        assert_eq!(
            controller.trend_store().get(&first).unwrap().liquidity,
            crate::trends::Trend::Up
        );
    }

    #[tokio::test]
    async fn expired_persisted_history_triggers_a_fresh_fetch() {
        use crate::storage::HISTORY_CACHE_KEY;
        use serde_json::json;

        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open_at(dir.path());

        // Blob aged past the 5 minute TTL, containing the token that will
        // be visible.
        let stale = json!({
            "timestamp": (Utc::now() - Duration::minutes(6)).to_rfc3339(),
            "data": {
                "0x000": [{
                    "timestamp": Utc::now().to_rfc3339(),
                    "total_liquidity": 5.0,
                    "holder_count": 1
                }]
            }
        });
        storage.save(HISTORY_CACHE_KEY, &stale);

        let fetcher = StubFetcher::new();
        let mut controller = TokenListController::new(storage, fetcher.clone());
        assert!(controller.history_cache().is_empty());

        controller.set_tokens(vec![token("0x000", 1.0)]);
        controller.set_viewport_height(400.0);
        let _ = controller.visible_rows();
        controller.fetches().flush().await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert!(controller.history_cache().contains("0x000"));
    }
}
