//! Text and JSON rendering of simulator state.
//!
//! Everything here is read-only: it formats what the core library reports
//! and never drives the simulator itself.

use std::fmt::Write as _;

use serde::Serialize;

use lwcache_core::Geometry;
use lwcache_core::cache::{CacheStore, RandomSource};
use lwcache_core::common::{Radix, format_address, format_index};
use lwcache_core::sim::{InvalidEntry, Simulator};
use lwcache_core::stats::{History, SimStats};

/// Shown in place of the history table before the first load.
pub const EMPTY_HISTORY: &str = "No Instructions Yet!";

/// Renders the `tag | index | block | offset` split of an address.
///
/// The tag is abbreviated to its width in bits; index and block are drawn as
/// one zero per bit, and the byte offset is always two bits.
pub fn fields_graphic(geometry: &Geometry) -> String {
    let tag = format!("00... [{}] ...00", geometry.tag_bits);
    let index = "0".repeat(geometry.index_bits as usize);
    let block = "0".repeat(geometry.block_bits as usize);
    let offset = "00";

    let tw = tag.len().max("tag".len());
    let iw = index.len().max("index".len());
    let bw = block.len().max("block".len());
    let ow = "offset".len();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "| {:<tw$} | {:<iw$} | {:<bw$} | {:<ow$} |",
        "tag", "index", "block", "offset"
    );
    let _ = writeln!(out, "| {tag:<tw$} | {index:<iw$} | {block:<bw$} | {offset:<ow$} |");
    out
}

/// Renders one table per way: a row per set and a column per block word.
///
/// Empty slots are left blank.
pub fn cache_tables(store: &CacheStore, address_radix: Radix, index_radix: Radix) -> String {
    let index_width = (0..store.sets())
        .map(|set| format_index(set, index_radix).len())
        .max()
        .unwrap_or(0)
        .max("index".len());
    let word_labels: Vec<String> = (0..store.block_size()).map(|w| format!("word {w}")).collect();
    let cell = word_labels
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max(address_radix.address_digits().unwrap_or(10));

    let mut out = String::new();
    for way in 0..store.ways() {
        let _ = writeln!(out, "Way {way}");

        let mut header = format!("| {:<index_width$} |", "index");
        for label in &word_labels {
            let _ = write!(header, " {label:<cell$} |");
        }
        let _ = writeln!(out, "{header}");
        let _ = writeln!(out, "{}", "-".repeat(header.len()));

        for (set, words) in store.way_blocks(way).enumerate() {
            let _ = write!(out, "| {:<index_width$} |", format_index(set, index_radix));
            for slot in words {
                let text = slot.map_or_else(String::new, |a| format_address(a, address_radix));
                let _ = write!(out, " {text:<cell$} |");
            }
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Renders the executed loads as `lw $r 0(<address>)` rows with their outcome.
pub fn history_table(history: &History, radix: Radix) -> String {
    if history.is_empty() {
        return format!("{EMPTY_HISTORY}\n");
    }
    let rows: Vec<(String, String)> = history
        .iter()
        .map(|e| {
            (
                format!("lw $r 0({})", format_address(e.address, radix)),
                e.outcome.to_string(),
            )
        })
        .collect();
    let width = rows.iter().map(|(i, _)| i.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (instruction, outcome) in rows {
        let _ = writeln!(out, "{instruction:<width$}  {outcome}");
    }
    out
}

/// Machine-readable summary of a run.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Effective cache shape.
    pub geometry: &'a Geometry,
    /// Raw counters.
    pub stats: &'a SimStats,
    /// Whether compulsory misses are part of the rate.
    pub count_compulsory_as_miss: bool,
    /// Miss rate as a fraction; `null` before any countable load.
    pub miss_rate: Option<f64>,
    /// Miss rate as a percentage rounded to two places.
    pub miss_percentage: Option<f64>,
    /// Pseudo-LRU bit of every set.
    pub lru_bits: &'a [u8],
    /// Executed loads in order.
    pub history: &'a History,
    /// The trace line that stopped ingestion, if any.
    pub stopped_at: Option<String>,
}

impl<'a> Report<'a> {
    /// Collects the report for `sim`.
    pub fn new<R: RandomSource>(
        sim: &'a Simulator<R>,
        count_compulsory_as_miss: bool,
        stopped_at: Option<&InvalidEntry>,
    ) -> Self {
        let stats = sim.stats();
        Self {
            geometry: sim.geometry(),
            stats,
            count_compulsory_as_miss,
            miss_rate: stats.miss_rate(count_compulsory_as_miss),
            miss_percentage: stats.miss_percentage(count_compulsory_as_miss),
            lru_bits: sim.lru_bits(),
            history: sim.history(),
            stopped_at: stopped_at.map(describe_invalid),
        }
    }
}

/// One-line description of a rejected trace entry.
pub fn describe_invalid(entry: &InvalidEntry) -> String {
    format!("line {}: {:?}: {}", entry.line, entry.text, entry.error)
}
