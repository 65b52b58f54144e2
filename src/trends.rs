//! Trend estimation over historical token samples
//!
//! The estimator regresses a metric against the sample index (not
//! wall-clock time: unevenly spaced samples are treated as equally spaced)
//! and classifies the slope. The `TrendStore` caches the result per token
//! so trend computation happens once per history update, not once per
//! render.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::history::HistorySample;

/// Slopes inside this dead-band classify as stagnant.
const STAGNANT_SLOPE_EPSILON: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stagnant,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stagnant => "stagnant",
        }
    }
}

/// Which metric of a sample the estimator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendMetric {
    Liquidity,
    Holders,
}

/// Liquidity and holder trends for one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPair {
    pub liquidity: Trend,
    pub holders: Trend,
}

impl Default for TrendPair {
    fn default() -> Self {
        Self {
            liquidity: Trend::Stagnant,
            holders: Trend::Stagnant,
        }
    }
}

/// Classify the trend of one metric across a token's history samples.
///
/// Input arrival order is untrusted; samples are re-sorted by timestamp
/// before the regression, so the result is invariant under permutation
/// when timestamps are distinct.
pub fn estimate(samples: &[HistorySample], metric: TrendMetric) -> Trend {
    if samples.len() < 2 {
        return Trend::Stagnant;
    }

    let mut ordered: Vec<&HistorySample> = samples.iter().collect();
    ordered.sort_by_key(|s| s.timestamp);

    let n = ordered.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = ordered.iter().map(|s| metric_value(s, metric)).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (index, sample) in ordered.iter().enumerate() {
        let dx = index as f64 - mean_x;
        numerator += dx * (metric_value(sample, metric) - mean_y);
        denominator += dx * dx;
    }

    // Cannot happen with ≥2 distinct indices, but guards the division.
    if denominator == 0.0 {
        return Trend::Stagnant;
    }

    let slope = numerator / denominator;
    if slope.abs() < STAGNANT_SLOPE_EPSILON {
        Trend::Stagnant
    } else if slope > 0.0 {
        Trend::Up
    } else {
        Trend::Down
    }
}

fn metric_value(sample: &HistorySample, metric: TrendMetric) -> f64 {
    match metric {
        TrendMetric::Liquidity => sample.total_liquidity,
        TrendMetric::Holders => sample.holder_count as f64,
    }
}

/// Derived trend mapping, recomputed when the history cache changes.
///
/// Consumers read this store; only the history cache writes it.
#[derive(Debug, Clone, Default)]
pub struct TrendStore {
    inner: Arc<RwLock<HashMap<String, TrendPair>>>,
}

impl TrendStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute both trend dimensions for a token from fresh samples.
    pub fn recompute(&self, address: &str, samples: &[HistorySample]) {
        let pair = TrendPair {
            liquidity: estimate(samples, TrendMetric::Liquidity),
            holders: estimate(samples, TrendMetric::Holders),
        };
        self.inner.write().insert(address.to_string(), pair);
    }

    pub fn get(&self, address: &str) -> Option<TrendPair> {
        self.inner.read().get(address).copied()
    }

    /// Trend pair for rendering: stagnant/stagnant when nothing is known.
    pub fn get_or_default(&self, address: &str) -> TrendPair {
        self.get(address).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }
}
