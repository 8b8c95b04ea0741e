//! Data models for the call board stats
//!
//! Field names follow the wire format consumed by the display page
//! (`nome`, `qtd`), so these types serialize as-is into `stats_update`.

use serde::{Deserialize, Serialize};

/// One entry of the top-names ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCount {
    pub nome: String,
    pub qtd: u64,
}

impl NameCount {
    pub fn new(nome: impl Into<String>, qtd: u64) -> Self {
        Self {
            nome: nome.into(),
            qtd,
        }
    }
}

/// Point-in-time view of the ledger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Accepted submissions since start or last reset
    pub total: u64,

    /// At most five names, highest count first
    pub top: Vec<NameCount>,

    /// Most recent names, newest first
    pub recent: Vec<String>,
}

impl StatsSnapshot {
    /// Snapshot of an empty ledger
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0 && self.top.is_empty() && self.recent.is_empty()
    }
}
