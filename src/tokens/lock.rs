/// Liquidity-lock descriptor parsing
///
/// The data source delivers liquidity-lock information as a serialized list
/// of per-holder lock records. A pool counts as locked when the summed
/// locked share reaches `LOCKED_PERCENT_THRESHOLD`; anything that fails to
/// parse counts as unlocked rather than as an error, so one bad descriptor
/// never halts a filter pass.
use serde::{Deserialize, Serialize};

/// Minimum summed locked share for a pool to count as locked.
pub const LOCKED_PERCENT_THRESHOLD: f64 = 90.0;

/// One holder's declared lock on pool liquidity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolderLock {
    #[serde(default)]
    pub holder: Option<String>,
    /// Share of pool liquidity this holder has locked, in percent.
    pub percent: f64,
    /// Unix seconds until which the share stays locked, when declared.
    #[serde(default)]
    pub unlock_time: Option<i64>,
}

/// Sum of locked percentages declared by the descriptor.
///
/// `None` when the descriptor is absent or unparsable.
pub fn locked_percent(descriptor: Option<&str>) -> Option<f64> {
    let raw = descriptor?.trim();
    if raw.is_empty() {
        return None;
    }

    let locks: Vec<HolderLock> = serde_json::from_str(raw).ok()?;
    Some(locks.iter().map(|lock| lock.percent.max(0.0)).sum())
}

/// Lock test used by the filter predicate: parsed sum ≥ threshold.
pub fn is_liquidity_locked(descriptor: Option<&str>) -> bool {
    locked_percent(descriptor)
        .map(|pct| pct >= LOCKED_PERCENT_THRESHOLD)
        .unwrap_or(false)
}
