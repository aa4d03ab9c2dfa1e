//! Error definitions.
//!
//! The simulation engine itself is total: every load is classified and no
//! operation on a configured cache fails. Errors only arise at the edges:
//! 1. **Address Parsing:** Textual addresses that are malformed for the chosen radix.
//! 2. **Configuration:** Cache knobs that do not describe a valid geometry.
//! 3. **Trace Ingestion:** I/O failures while reading an address trace.

use thiserror::Error;

use super::radix::Radix;

/// Reasons a textual address was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAddressError {
    /// The input was empty after trimming.
    #[error("address is empty")]
    Empty,

    /// The input had the wrong number of digits for a fixed-width radix.
    #[error("expected {expected} {radix} digits, found {found}")]
    WrongLength {
        /// Radix the input was parsed in.
        radix: Radix,
        /// Required digit count.
        expected: usize,
        /// Digit count actually supplied.
        found: usize,
    },

    /// The input contained a character that is not a digit of the radix.
    #[error("invalid {radix} digit {digit:?}")]
    InvalidDigit {
        /// Radix the input was parsed in.
        radix: Radix,
        /// First offending character.
        digit: char,
    },

    /// A decimal input fell outside `0..=4294967295`.
    #[error("decimal address {0} is outside 0..=4294967295")]
    OutOfRange(String),
}

/// Reasons a cache configuration was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A knob was zero or not a power of two.
    #[error("{knob} must be a non-zero power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending knob.
        knob: &'static str,
        /// Value supplied.
        value: usize,
    },

    /// The knobs multiply out to more than the capacity (no sets left).
    #[error(
        "associativity {associativity} x block size {block_size} exceeds capacity {capacity}"
    )]
    NoSets {
        /// Total capacity in words.
        capacity: usize,
        /// Words per block.
        block_size: usize,
        /// Number of ways.
        associativity: usize,
    },

    /// A way holds more words than the 30 word-address bits can index.
    #[error(
        "capacity {capacity} / associativity {associativity} needs {bits} index and block bits, \
         but a word address has only {available}"
    )]
    AddressSpaceExceeded {
        /// Total capacity in words.
        capacity: usize,
        /// Number of ways.
        associativity: usize,
        /// Index plus block bits the geometry requires.
        bits: u32,
        /// Word-address bits available.
        available: u32,
    },

    /// The capacity is above the largest cache the simulator will allocate.
    #[error("capacity {capacity} exceeds the maximum of {max} words")]
    CapacityTooLarge {
        /// Requested capacity in words.
        capacity: usize,
        /// Largest accepted capacity in words.
        max: usize,
    },

    /// The configuration document could not be deserialized.
    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures while reading an address trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
}
