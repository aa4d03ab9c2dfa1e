use lwcache_core::cache::{RandomSource, XorShiftRandom};
use lwcache_core::sim::{LoadReport, Simulator};
use lwcache_core::stats::Outcome;
use lwcache_core::{Addr, CacheConfig};

/// Owns a simulator and offers terse load helpers.
pub struct TestContext<R = XorShiftRandom> {
    pub sim: Simulator<R>,
}

impl TestContext<XorShiftRandom> {
    /// Builds a context for the given knobs with the default random source.
    pub fn new(capacity: usize, block_size: usize, associativity: usize) -> Self {
        Self::with_random(capacity, block_size, associativity, XorShiftRandom::default())
    }
}

impl<R: RandomSource> TestContext<R> {
    /// Builds a context that draws eviction offsets from `rng`.
    pub fn with_random(capacity: usize, block_size: usize, associativity: usize, rng: R) -> Self {
        let config = CacheConfig {
            capacity,
            block_size,
            associativity,
        };
        Self {
            sim: Simulator::with_random(&config, rng),
        }
    }

    /// Executes one load and returns the full report.
    pub fn load(&mut self, addr: u32) -> LoadReport {
        self.sim.execute_load(Addr(addr))
    }

    /// Executes one load and returns only its classification.
    pub fn outcome(&mut self, addr: u32) -> Outcome {
        self.load(addr).outcome
    }

    /// Executes a sequence of loads and returns their classifications.
    pub fn run(&mut self, addrs: &[u32]) -> Vec<Outcome> {
        addrs.iter().map(|&a| self.outcome(a)).collect()
    }

    /// Cached address at `(way, set, block)` as a raw value.
    pub fn slot(&self, way: usize, set: usize, block: usize) -> Option<u32> {
        self.sim.store().slot(way, set, block).map(Addr::val)
    }
}
