//! Common types shared across the cache simulator.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Address Type:** A strong type for 32-bit byte addresses.
//! 2. **Constants:** Address, word and byte-offset widths.
//! 3. **Radix Conversion:** Parsing and rendering addresses in hex, binary or decimal.
//! 4. **Error Handling:** Error enums for address parsing, configuration and traces.

/// Byte address type.
pub mod addr;

/// Address-width constants.
pub mod constants;

/// Error types.
pub mod error;

/// Radix parsing and formatting helpers.
pub mod radix;

pub use addr::Addr;
pub use constants::{BYTE_OFFSET_BITS, WORD_ADDRESS_BITS, WORD_BYTES};
pub use error::{ConfigError, ParseAddressError, TraceError};
pub use radix::{Radix, format_address, format_index, parse_address};
