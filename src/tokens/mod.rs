pub mod lock;
pub mod types;

pub use lock::{is_liquidity_locked, locked_percent};
pub use types::{RiskLevel, Token, ZERO_ADDRESS};
