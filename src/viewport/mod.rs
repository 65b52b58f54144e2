//! Virtualized viewport: row heights, visible-window math, expansion state
//!
//! Everything here is pure, synchronous state — the list controller owns
//! these pieces and keeps them consistent with the derived token view.

pub mod expansion;
pub mod heights;
pub mod virtualizer;

pub use expansion::ExpansionState;
pub use heights::RowHeightModel;
pub use virtualizer::{ScrollAlign, ScrollBehavior, ScrollCommand, Virtualizer};
