//! Simulation statistics and instruction history.
//!
//! This module tracks what the simulated cache has done. It provides:
//! 1. **Outcomes:** The three-way classification of every load.
//! 2. **Counters:** Hits, eviction misses and compulsory misses, plus the derived miss rate.
//! 3. **History:** An append-only log of `(address, outcome)` pairs in execution order.
//!
//! Counters and history are cleared together and only together.

use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::common::addr::Addr;

/// Classification of a single word load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The word was already cached.
    Hit,
    /// The word was absent and a valid block was evicted to make room.
    Miss,
    /// The word was absent and an empty way was filled.
    CompulsoryMiss,
}

impl Outcome {
    /// Short label used in history listings.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::CompulsoryMiss => "comp miss",
        }
    }

    /// True for both kinds of miss.
    pub const fn is_miss(self) -> bool {
        !matches!(self, Self::Hit)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Running hit and miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Loads that found their word cached.
    pub hits: u64,
    /// Loads that evicted a block.
    pub misses: u64,
    /// Loads that filled an empty way.
    pub compulsory_misses: u64,
}

impl SimStats {
    /// Counts one outcome.
    pub const fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Hit => self.hits += 1,
            Outcome::Miss => self.misses += 1,
            Outcome::CompulsoryMiss => self.compulsory_misses += 1,
        }
    }

    /// Total number of loads counted.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses + self.compulsory_misses
    }

    /// Fraction of loads that missed.
    ///
    /// With `count_compulsory_as_miss` the rate is
    /// `(misses + compulsory) / (misses + compulsory + hits)`; otherwise
    /// compulsory misses are left out entirely: `misses / (misses + hits)`.
    ///
    /// Returns `None` when the denominator is zero.
    pub fn miss_rate(&self, count_compulsory_as_miss: bool) -> Option<f64> {
        let (missed, total) = if count_compulsory_as_miss {
            let missed = self.misses + self.compulsory_misses;
            (missed, missed + self.hits)
        } else {
            (self.misses, self.misses + self.hits)
        };
        (total > 0).then(|| missed as f64 / total as f64)
    }

    /// Miss rate as a percentage rounded to two decimal places.
    pub fn miss_percentage(&self, count_compulsory_as_miss: bool) -> Option<f64> {
        self.miss_rate(count_compulsory_as_miss)
            .map(|rate| (rate * 10_000.0).round() / 100.0)
    }

    /// Renders a plain-text statistics block.
    pub fn summary(&self, count_compulsory_as_miss: bool) -> String {
        let mut out = String::new();
        let rate = self
            .miss_percentage(count_compulsory_as_miss)
            .map_or_else(|| "n/a".to_string(), |p| format!("{p}%"));
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "CACHE STATISTICS");
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "  loads                  {}", self.accesses());
        let _ = writeln!(out, "  hits                   {}", self.hits);
        let _ = writeln!(out, "  misses                 {}", self.misses);
        let _ = writeln!(out, "  compulsory_misses      {}", self.compulsory_misses);
        let _ = writeln!(
            out,
            "  miss_percentage        {rate}{}",
            if count_compulsory_as_miss {
                " (compulsory counted)"
            } else {
                ""
            }
        );
        let _ = writeln!(out, "----------------------------------------------------------");
        out
    }
}

/// One executed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Address the load was issued for.
    pub address: Addr,
    /// How the load was classified.
    pub outcome: Outcome,
}

/// Ordered log of executed loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Appends a load to the log.
    pub fn push(&mut self, address: Addr, outcome: Outcome) {
        self.entries.push(HistoryEntry { address, outcome });
    }

    /// Entries in execution order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of logged loads.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over the entries in execution order.
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
