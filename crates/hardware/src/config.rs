//! Configuration system for the cache simulator.
//!
//! This module defines the structures used to parameterize a simulation. It provides:
//! 1. **Defaults:** The initial cache shape and display preferences.
//! 2. **Structures:** The three cache knobs, display preferences, and the root `Config`.
//! 3. **Geometry:** Derivation of set count and field widths, including the
//!    clamping applied whenever the knobs are changed.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]) or built with
//! `Config::default()`.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::constants::WORD_ADDRESS_BITS;
use crate::common::error::ConfigError;
use crate::common::radix::Radix;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default capacity in words.
    pub const CAPACITY: usize = 16;

    /// Default block size in words (single-word blocks).
    pub const BLOCK_SIZE: usize = 1;

    /// Default associativity (1 way = direct-mapped).
    pub const ASSOCIATIVITY: usize = 1;
}

/// Largest capacity, in words, that [`CacheConfig::validate`] accepts.
pub const MAX_CAPACITY: usize = 1 << 20;

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use lwcache_core::config::Config;
/// use lwcache_core::common::Radix;
///
/// let json = r#"{
///     "cache": { "capacity": 64, "block_size": 4, "associativity": 2 },
///     "display": { "address_radix": "binary", "count_compulsory_as_miss": true },
///     "seed": 7
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cache.capacity, 64);
/// assert_eq!(config.display.address_radix, Radix::Binary);
/// assert_eq!(config.display.input_radix, Radix::Hex);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Cache shape.
    pub cache: CacheConfig,
    /// Number formats and miss-rate preferences.
    pub display: DisplayConfig,
    /// Seed for the eviction random source; `None` picks the built-in seed.
    pub seed: Option<u64>,
}

impl Config {
    /// Deserializes a configuration from a JSON document.
    ///
    /// Missing sections and fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is not valid JSON or a
    /// field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The three knobs that define a cache.
///
/// All sizes are counted in 4-byte words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Total capacity in words.
    #[serde(default = "CacheConfig::default_capacity")]
    pub capacity: usize,

    /// Words per block.
    #[serde(default = "CacheConfig::default_block_size")]
    pub block_size: usize,

    /// Number of ways.
    #[serde(default = "CacheConfig::default_associativity")]
    pub associativity: usize,
}

impl CacheConfig {
    const fn default_capacity() -> usize {
        defaults::CAPACITY
    }

    const fn default_block_size() -> usize {
        defaults::BLOCK_SIZE
    }

    const fn default_associativity() -> usize {
        defaults::ASSOCIATIVITY
    }

    /// Checks that every knob is a non-zero power of two, that at least one
    /// set fits once the clamping rules have been applied, and that the
    /// resulting cache can be addressed and allocated.
    ///
    /// The simulator never rejects a configuration on its own; callers that
    /// accept knobs from users run this first.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotPowerOfTwo`] for a zero or non-power-of-two knob.
    /// - [`ConfigError::NoSets`] when the knobs cannot describe a cache.
    /// - [`ConfigError::AddressSpaceExceeded`] when index and block fields
    ///   would not fit in the 30 word-address bits.
    /// - [`ConfigError::CapacityTooLarge`] above [`MAX_CAPACITY`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (knob, value) in [
            ("capacity", self.capacity),
            ("block_size", self.block_size),
            ("associativity", self.associativity),
        ] {
            if !value.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo { knob, value });
            }
        }
        if self.associativity > self.capacity {
            return Err(ConfigError::NoSets {
                capacity: self.capacity,
                block_size: self.block_size,
                associativity: self.associativity,
            });
        }
        let geometry = Geometry::clamped(self.capacity, self.block_size, self.associativity);
        let bits = geometry.index_bits + geometry.block_bits;
        if bits > WORD_ADDRESS_BITS {
            return Err(ConfigError::AddressSpaceExceeded {
                capacity: self.capacity,
                associativity: self.associativity,
                bits,
                available: WORD_ADDRESS_BITS,
            });
        }
        if self.capacity > MAX_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                capacity: self.capacity,
                max: MAX_CAPACITY,
            });
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::CAPACITY,
            block_size: defaults::BLOCK_SIZE,
            associativity: defaults::ASSOCIATIVITY,
        }
    }
}

/// How addresses and indices are read and displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Radix for addresses in cache tables and history.
    pub address_radix: Radix,
    /// Radix for set indices in cache tables.
    pub index_radix: Radix,
    /// Radix expected for addresses typed or read from a trace.
    pub input_radix: Radix,
    /// When true, compulsory misses count towards the miss rate.
    pub count_compulsory_as_miss: bool,
}

/// Effective cache shape after clamping, with derived field widths.
///
/// A 32-bit address splits as `tag | index | block | byte offset`, with the
/// byte offset fixed at 2 bits and the other three sharing the top 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    /// Total capacity in words.
    pub capacity: usize,
    /// Words per block.
    pub block_size: usize,
    /// Number of ways.
    pub associativity: usize,
    /// `capacity / (associativity * block_size)`.
    pub num_sets: usize,
    /// log2 of `num_sets`; 0 for a single set.
    pub index_bits: u32,
    /// log2 of `block_size`; 0 for single-word blocks.
    pub block_bits: u32,
    /// `30 - index_bits - block_bits`.
    pub tag_bits: u32,
}

impl Geometry {
    /// Derives the effective geometry for the requested knobs.
    ///
    /// The block size is clamped to `capacity / associativity` first. Only
    /// then is associativity clamped to `capacity / block_size`, using the
    /// already-clamped block size. The order matters: an oversized request on
    /// both knobs keeps the requested associativity where it can.
    ///
    /// Zero knobs are treated as one so that no division by zero can occur;
    /// other non-power-of-two inputs produce an unspecified but well-formed shape.
    pub fn clamped(capacity: usize, block_size: usize, associativity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut block_size = block_size.max(1);
        let mut associativity = associativity.max(1);

        let max_block_size = (capacity / associativity).max(1);
        if block_size > max_block_size {
            block_size = max_block_size;
        }

        let max_associativity = (capacity / block_size).max(1);
        if associativity > max_associativity {
            associativity = max_associativity;
        }

        let num_sets = (capacity / (associativity * block_size)).max(1);
        let index_bits = num_sets.ilog2();
        let block_bits = block_size.ilog2();
        let tag_bits = WORD_ADDRESS_BITS.saturating_sub(index_bits + block_bits);

        Self {
            capacity,
            block_size,
            associativity,
            num_sets,
            index_bits,
            block_bits,
            tag_bits,
        }
    }

    /// Derives the geometry for a configuration, logging when a knob was clamped.
    pub fn from_config(config: &CacheConfig) -> Self {
        let geometry = Self::clamped(config.capacity, config.block_size, config.associativity);
        if geometry.block_size != config.block_size
            || geometry.associativity != config.associativity
        {
            info!(
                requested_block_size = config.block_size,
                requested_associativity = config.associativity,
                block_size = geometry.block_size,
                associativity = geometry.associativity,
                "cache knobs clamped to fit capacity"
            );
        }
        geometry
    }

    /// Returns the knobs this geometry was built from.
    pub const fn config(&self) -> CacheConfig {
        CacheConfig {
            capacity: self.capacity,
            block_size: self.block_size,
            associativity: self.associativity,
        }
    }

    /// Block sizes selectable at the current capacity and associativity,
    /// from largest to smallest.
    pub fn legal_block_sizes(&self) -> Vec<usize> {
        halving_from(self.capacity / self.associativity)
    }

    /// Associativities selectable at the current capacity and block size,
    /// from largest to smallest.
    pub fn legal_associativities(&self) -> Vec<usize> {
        halving_from(self.capacity / self.block_size)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::clamped(
            defaults::CAPACITY,
            defaults::BLOCK_SIZE,
            defaults::ASSOCIATIVITY,
        )
    }
}

fn halving_from(start: usize) -> Vec<usize> {
    std::iter::successors(Some(start), |v| Some(v / 2))
        .take_while(|&v| v >= 1)
        .collect()
}
