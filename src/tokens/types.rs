/// Core types for the token listing data model
use serde::{Deserialize, Serialize};

/// Ownership renounced ⇔ owner equals this address.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Screener risk classification for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Warning => "warning",
            RiskLevel::Danger => "danger",
        }
    }

    /// Ordinal used by the safety-score sort: higher is safer.
    pub fn safety_score(&self) -> u8 {
        match self {
            RiskLevel::Danger => 0,
            RiskLevel::Warning => 1,
            RiskLevel::Safe => 2,
        }
    }
}

// ============================================================================
// MAIN TOKEN STRUCTURE - supplied wholesale by the external data source
// ============================================================================

/// Complete token listing record.
///
/// The external data source replaces the whole collection on every refresh
/// cycle; the core never mutates token fields. `address` is the unique key
/// used by the history cache, trend store and expansion state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    // ========================================================================
    // Core Identity & Metadata
    // ========================================================================
    pub address: String,
    pub name: String,
    pub symbol: String,

    // ========================================================================
    // Listing Metrics
    // ========================================================================
    /// Age of the pair in hours
    pub age_hours: f64,
    pub holder_count: u64,
    pub liquidity: f64,

    // ========================================================================
    // Tax & Safety
    // ========================================================================
    pub buy_tax_percent: f64,
    pub sell_tax_percent: f64,
    pub is_honeypot: bool,
    pub risk: RiskLevel,

    // ========================================================================
    // Ownership & Liquidity Lock
    // ========================================================================
    pub owner: String,
    /// Serialized holder-lock records; may be empty or unparsable, in which
    /// case the token counts as unlocked (see `tokens::lock`).
    #[serde(default)]
    pub liquidity_lock: Option<String>,
}

impl Token {
    /// Ownership renounced: no privileged control remains.
    pub fn is_renounced(&self) -> bool {
        self.owner == ZERO_ADDRESS
    }
}
