pub mod config;
pub mod filtering;
pub mod history;
pub mod list;
pub mod logger;
pub mod paths;
pub mod storage;
pub mod tokens;
pub mod trends;
pub mod viewport;

pub use filtering::types::FilterState;
pub use list::{RowView, TokenListController};
pub use tokens::types::{RiskLevel, Token};
pub use trends::{Trend, TrendPair};
pub use viewport::virtualizer::{ScrollAlign, ScrollBehavior, ScrollCommand};
