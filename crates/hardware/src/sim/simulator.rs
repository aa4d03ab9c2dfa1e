//! Simulator: owns the cache, its replacement state, and the statistics.
//!
//! All mutable simulation state lives in one [`Simulator`] value, so several
//! independent caches can be simulated side by side. Each load runs to
//! completion before the next is accepted, and reconfiguration rebuilds every
//! piece of state in one step.

use tracing::debug;

use crate::cache::{
    AddressFields, CacheStore, PlruPolicy, RandomSource, XorShiftRandom, decode_fields,
};
use crate::common::addr::Addr;
use crate::config::{CacheConfig, Config, Geometry};
use crate::stats::{History, Outcome, SimStats};

/// What a single load did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Address the load was issued for.
    pub address: Addr,
    /// Classification of the load.
    pub outcome: Outcome,
    /// Decoded tag, index and block fields.
    pub fields: AddressFields,
    /// Way that hit or was filled.
    pub way: usize,
}

/// Top-level cache simulator.
///
/// Generic over the random source used to pick eviction victims; the default
/// is a seeded xorshift generator.
#[derive(Debug, Clone)]
pub struct Simulator<R = XorShiftRandom> {
    geometry: Geometry,
    store: CacheStore,
    policy: PlruPolicy,
    stats: SimStats,
    history: History,
    rng: R,
}

impl Simulator<XorShiftRandom> {
    /// Creates a simulator for the given cache knobs with the default random source.
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_random(config, XorShiftRandom::default())
    }

    /// Creates a simulator from a full configuration, honouring its seed.
    pub fn from_config(config: &Config) -> Self {
        let rng = config
            .seed
            .map_or_else(XorShiftRandom::default, XorShiftRandom::new);
        Self::with_random(&config.cache, rng)
    }
}

impl Default for Simulator<XorShiftRandom> {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

impl<R: RandomSource> Simulator<R> {
    /// Creates a simulator that draws eviction offsets from `rng`.
    pub fn with_random(config: &CacheConfig, rng: R) -> Self {
        let geometry = Geometry::from_config(config);
        Self {
            store: CacheStore::new(&geometry),
            policy: PlruPolicy::new(geometry.num_sets, geometry.associativity),
            stats: SimStats::default(),
            history: History::default(),
            geometry,
            rng,
        }
    }

    /// Changes the cache shape and clears all state.
    ///
    /// The knobs are clamped (block size first, then associativity) before use.
    /// The store is emptied, every PLRU bit is cleared, and the counters and
    /// history are reset. Returns the effective geometry.
    pub fn reconfigure(
        &mut self,
        capacity: usize,
        block_size: usize,
        associativity: usize,
    ) -> Geometry {
        self.apply_config(&CacheConfig {
            capacity,
            block_size,
            associativity,
        })
    }

    /// Like [`reconfigure`](Self::reconfigure), taking the knobs as a [`CacheConfig`].
    pub fn apply_config(&mut self, config: &CacheConfig) -> Geometry {
        let geometry = Geometry::from_config(config);
        debug!(
            capacity = geometry.capacity,
            block_size = geometry.block_size,
            associativity = geometry.associativity,
            sets = geometry.num_sets,
            tag_bits = geometry.tag_bits,
            index_bits = geometry.index_bits,
            block_bits = geometry.block_bits,
            "reconfigured cache"
        );
        self.geometry = geometry;
        self.store = CacheStore::new(&geometry);
        self.policy = PlruPolicy::new(geometry.num_sets, geometry.associativity);
        self.reset_history_and_stats();
        geometry
    }

    /// Simulates one word load.
    ///
    /// The load is classified in order:
    /// 1. **Hit:** some way holds the word at `(index, block)`.
    /// 2. **Compulsory miss:** otherwise, some way's slot there is still empty;
    ///    the first such way receives the block.
    /// 3. **Miss:** otherwise, a victim way chosen by the PLRU bit and the
    ///    random source receives the block.
    ///
    /// Hits and compulsory misses set the set's PLRU bit from the way used;
    /// every load then flips that bit.
    pub fn execute_load(&mut self, address: Addr) -> LoadReport {
        let fields = decode_fields(address, &self.geometry);
        let AddressFields { index, block, .. } = fields;

        let (outcome, way) = if let Some(way) = self.store.find_word(index, block, address) {
            self.policy.touch(index, way);
            (Outcome::Hit, way)
        } else if let Some(way) = self.store.find_empty(index, block) {
            self.store.fill_block(address, way, index, self.geometry.block_bits);
            self.policy.touch(index, way);
            (Outcome::CompulsoryMiss, way)
        } else {
            let way = self.policy.victim(index, &mut self.rng);
            self.store.fill_block(address, way, index, self.geometry.block_bits);
            (Outcome::Miss, way)
        };

        self.policy.flip(index);
        self.stats.record(outcome);
        self.history.push(address, outcome);

        debug!(
            address = %address,
            index,
            block,
            way,
            outcome = outcome.label(),
            lru = self.policy.bit(index),
            "lw"
        );

        LoadReport {
            address,
            outcome,
            fields,
            way,
        }
    }

    /// Executes a sequence of loads in order.
    pub fn execute_all<I>(&mut self, addresses: I) -> Vec<LoadReport>
    where
        I: IntoIterator<Item = Addr>,
    {
        addresses
            .into_iter()
            .map(|addr| self.execute_load(addr))
            .collect()
    }

    /// Clears the counters and history, leaving the cache contents and shape untouched.
    pub fn reset_history_and_stats(&mut self) {
        self.stats = SimStats::default();
        self.history.clear();
    }

    /// Current effective geometry.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Current cache contents.
    pub const fn store(&self) -> &CacheStore {
        &self.store
    }

    /// PLRU bit of every set, indexed by set.
    pub fn lru_bits(&self) -> &[u8] {
        self.policy.bits()
    }

    /// Hit and miss counters.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Loads executed since the last reset, in order.
    pub const fn history(&self) -> &History {
        &self.history
    }
}
