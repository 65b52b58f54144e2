use std::fmt;

use serde::{Deserialize, Serialize};

/// User-facing filter configuration for the token list.
///
/// Persisted across sessions as a single blob (`storage::FILTERS_KEY`);
/// mutated only through `TokenListController::update_filters`, which also
/// resets the derived state that depends on it.
///
/// The `hide_stagnant_*` / `stagnant_record_count` fields exist in the
/// persisted schema but are not consumed by the predicate (see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub min_holders: u64,
    pub min_liquidity: f64,

    pub hide_honeypots: bool,
    pub show_only_honeypots: bool,
    pub hide_danger: bool,
    pub hide_warning: bool,
    pub show_only_safe: bool,
    pub hide_not_renounced: bool,
    pub hide_unlocked_liquidity: bool,

    pub search_query: String,

    /// Sort field name, optionally suffixed `_asc` to flip the default
    /// descending order. Unrecognized values fall back to age/descending.
    pub sort_by: String,

    /// The derived view is truncated to this many rows after sorting.
    pub max_records: usize,

    pub hide_stagnant_holders: bool,
    pub hide_stagnant_liquidity: bool,
    pub stagnant_record_count: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            min_holders: 0,
            min_liquidity: 0.0,
            hide_honeypots: false,
            show_only_honeypots: false,
            hide_danger: false,
            hide_warning: false,
            show_only_safe: false,
            hide_not_renounced: false,
            hide_unlocked_liquidity: false,
            search_query: String::new(),
            sort_by: "age".to_string(),
            max_records: 50,
            hide_stagnant_holders: false,
            hide_stagnant_liquidity: false,
            stagnant_record_count: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Age,
    Holders,
    Liquidity,
    SafetyScore,
}

impl SortField {
    /// Parse a `sort_by` string into field and direction.
    ///
    /// The `_asc` suffix requests ascending order; everything else is
    /// descending. An unrecognized field name means age/descending.
    pub fn parse(sort_by: &str) -> (SortField, SortDirection) {
        let trimmed = sort_by.trim();
        let (name, direction) = match trimmed.strip_suffix("_asc") {
            Some(name) => (name, SortDirection::Asc),
            None => (trimmed, SortDirection::Desc),
        };

        let field = match name {
            "holders" => SortField::Holders,
            "liquidity" => SortField::Liquidity,
            "safety_score" => SortField::SafetyScore,
            _ => SortField::Age,
        };

        (field, direction)
    }
}

/// Why a token was rejected by the filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterRejectionReason {
    Honeypot,
    NotHoneypot,
    SearchMismatch,
    RiskDanger,
    RiskWarning,
    RiskNotSafe,
    OwnerNotRenounced,
    LiquidityUnlocked,
    HolderCountBelowMinimum,
    LiquidityBelowMinimum,
}

impl FilterRejectionReason {
    /// Describe the rejection reason using a machine friendly label.
    pub fn label(&self) -> &'static str {
        match self {
            FilterRejectionReason::Honeypot => "honeypot",
            FilterRejectionReason::NotHoneypot => "not_honeypot",
            FilterRejectionReason::SearchMismatch => "search_mismatch",
            FilterRejectionReason::RiskDanger => "risk_danger",
            FilterRejectionReason::RiskWarning => "risk_warning",
            FilterRejectionReason::RiskNotSafe => "risk_not_safe",
            FilterRejectionReason::OwnerNotRenounced => "owner_not_renounced",
            FilterRejectionReason::LiquidityUnlocked => "liquidity_unlocked",
            FilterRejectionReason::HolderCountBelowMinimum => "min_holders",
            FilterRejectionReason::LiquidityBelowMinimum => "min_liquidity",
        }
    }
}

impl fmt::Display for FilterRejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
