//! Set-associative cache simulator library.
//!
//! This crate models how a configurable cache responds to a stream of word
//! loads (`lw`), with the following:
//! 1. **Configuration:** Capacity, block size and associativity, clamped into a
//!    consistent geometry with derived tag/index/block widths.
//! 2. **Cache:** Way x set x block storage, address field decoding, and a
//!    single-bit pseudo-LRU replacement policy with an injectable random source.
//! 3. **Simulation:** Per-load hit / miss / compulsory-miss classification and
//!    trace ingestion.
//! 4. **Statistics:** Running counters, miss rate, and an ordered load history.
//!
//! ```
//! use lwcache_core::{Addr, CacheConfig, Simulator};
//! use lwcache_core::stats::Outcome;
//!
//! let mut sim = Simulator::new(&CacheConfig::default());
//! assert_eq!(sim.execute_load(Addr(0x0)).outcome, Outcome::CompulsoryMiss);
//! assert_eq!(sim.execute_load(Addr(0x4)).outcome, Outcome::CompulsoryMiss);
//! assert_eq!(sim.execute_load(Addr(0x0)).outcome, Outcome::Hit);
//! ```

/// Cache storage, field decoding, replacement policy and random sources.
pub mod cache;
/// Common types (addresses, constants, radix helpers, errors).
pub mod common;
/// Simulator configuration (defaults, knobs, geometry).
pub mod config;
/// Simulator and trace loader.
pub mod sim;
/// Statistics and instruction history.
pub mod stats;

/// Byte address type.
pub use crate::common::Addr;
/// Cache knobs and root configuration.
pub use crate::config::{CacheConfig, Config, Geometry};
/// Main simulator type; construct with `Simulator::new`.
pub use crate::sim::Simulator;
