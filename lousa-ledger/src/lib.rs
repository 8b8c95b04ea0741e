//! Lousa stats ledger
//!
//! In-memory tally of names submitted to the call board: total count,
//! per-name frequency, and a short ring of the most recent names.
//! Nothing here is persisted; the ledger lives as long as its owner.

pub mod ledger;
pub mod models;

// Re-export main types
pub use ledger::{StatsLedger, RECENT_CAPACITY, TOP_LIMIT};
pub use models::{NameCount, StatsSnapshot};
