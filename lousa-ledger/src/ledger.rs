//! In-memory tally of submitted names

use std::collections::{HashMap, VecDeque};
use tracing::debug;

use crate::models::{NameCount, StatsSnapshot};

/// Number of names kept in the recent ring
pub const RECENT_CAPACITY: usize = 8;

/// Number of names reported in the ranking
pub const TOP_LIMIT: usize = 5;

/// Totals, per-name counts and recent names since start or last reset.
///
/// Counts are stored in first-seen order so that names with equal counts
/// rank in the order they first appeared.
#[derive(Debug, Default)]
pub struct StatsLedger {
    total: u64,
    counts: Vec<NameCount>,
    index: HashMap<String, usize>,
    recent: VecDeque<String>,
}

impl StatsLedger {
    pub fn new() -> Self {
        Self {
            total: 0,
            counts: Vec::new(),
            index: HashMap::new(),
            recent: VecDeque::with_capacity(RECENT_CAPACITY + 1),
        }
    }

    /// Record a submission.
    ///
    /// Returns the trimmed name when accepted, or `None` when the name is
    /// blank, in which case the ledger is left untouched.
    pub fn accept_submission(&mut self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        self.total += 1;

        match self.index.get(name) {
            Some(&slot) => self.counts[slot].qtd += 1,
            None => {
                self.index.insert(name.to_string(), self.counts.len());
                self.counts.push(NameCount::new(name, 1));
            }
        }

        self.recent.push_front(name.to_string());
        self.recent.truncate(RECENT_CAPACITY);

        debug!("Accepted '{}' (total: {})", name, self.total);
        Some(name.to_string())
    }

    /// Current totals, top five and recent names
    pub fn snapshot(&self) -> StatsSnapshot {
        let mut ranked: Vec<&NameCount> = self.counts.iter().collect();
        // stable sort keeps first-seen order among equal counts
        ranked.sort_by(|a, b| b.qtd.cmp(&a.qtd));

        StatsSnapshot {
            total: self.total,
            top: ranked.into_iter().take(TOP_LIMIT).cloned().collect(),
            recent: self.recent.iter().cloned().collect(),
        }
    }

    /// Zero the ledger
    pub fn reset(&mut self) {
        self.total = 0;
        self.counts.clear();
        self.index.clear();
        self.recent.clear();
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Count for a single name (0 if never seen)
    pub fn count_of(&self, name: &str) -> u64 {
        self.index
            .get(name)
            .map(|&slot| self.counts[slot].qtd)
            .unwrap_or(0)
    }

    pub fn distinct_names(&self) -> usize {
        self.counts.len()
    }

    pub fn recent(&self) -> impl Iterator<Item = &str> {
        self.recent.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
