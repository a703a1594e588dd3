//! # expense-splitter
//!
//! Even-split shared expense tracking for a small group.
//!
//! Participants are registered by name; each recorded expense is divided
//! equally across everyone currently in the group and folded into a running
//! per-participant `paid` / `owes` balance.
//!
//! ## Architecture
//!
//! - **core**: Participants, balances, the expense journal, currency formatting
//! - **split**: The balance calculator and the session summary
//! - **session**: Input validation, immutable session snapshots, the store, scripts
//! - **render**: Plain-text lines for participants, balances and history
//! - **simulation**: Random action scripts for benchmarks and demos

pub mod config;
pub mod core;
pub mod render;
pub mod session;
pub mod simulation;
pub mod split;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::SplitterConfig;
    pub use crate::core::balance::{Balance, BalanceSheet};
    pub use crate::core::participant::{ParticipantName, ParticipantRegistry};
    pub use crate::session::state::{Action, SessionState};
    pub use crate::session::store::{Alert, SessionStore};
    pub use crate::split::calculator::{BalanceCalculator, SplitPolicy};
}
