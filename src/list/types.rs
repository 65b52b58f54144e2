use crate::tokens::types::Token;
use crate::trends::TrendPair;

/// Render contract for one visible row.
///
/// Everything the downstream renderer needs: the token, its expansion
/// flag, its trend pair (stagnant/stagnant until history arrives) and the
/// dynamic-scaling preference. Producing these is the core's last step;
/// the visual rendering belongs to the host.
#[derive(Debug, Clone)]
pub struct RowView {
    /// Position in the derived view (the height model's key space).
    pub index: usize,
    pub token: Token,
    pub expanded: bool,
    pub trends: TrendPair,
    pub dynamic_scaling: bool,
}
