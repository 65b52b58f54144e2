pub mod engine;
pub mod types;

pub use engine::{derive_view, evaluate};
pub use types::{FilterRejectionReason, FilterState, SortDirection, SortField};
