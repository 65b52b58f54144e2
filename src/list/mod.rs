//! List coordination: derived view, expansion, heights, scroll and fetches
//!
//! `TokenListController` is the single owner of the mutable dashboard
//! state. The host feeds it raw tokens, scroll offsets, measured heights
//! and user intent; it answers with render-ready rows and deferred scroll
//! commands to run after the next layout pass.

mod controller;
mod types;

pub use controller::TokenListController;
pub use types::RowView;
