//! Address radix conversion.
//!
//! Addresses reach the simulator as text typed by a user or read from a trace
//! file, in one of three number systems. This module validates such text and
//! renders addresses and set indices back in any of them:
//! 1. **Hex:** exactly 8 digits, optional `0x` prefix.
//! 2. **Binary:** exactly 32 digits, optional `0b` prefix.
//! 3. **Decimal:** any digit string whose value fits in 32 bits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::addr::Addr;
use super::error::ParseAddressError;

/// Number system used to read or display an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Radix {
    /// Base 2.
    #[serde(alias = "bin", alias = "2")]
    Binary,
    /// Base 10.
    #[serde(alias = "dec", alias = "10")]
    Decimal,
    /// Base 16.
    #[default]
    #[serde(alias = "hexadecimal", alias = "16")]
    Hex,
}

impl Radix {
    /// Numeric base of this radix.
    pub const fn base(self) -> u32 {
        match self {
            Self::Binary => 2,
            Self::Decimal => 10,
            Self::Hex => 16,
        }
    }

    /// Number of digits a full 32-bit address occupies, if the width is fixed.
    pub const fn address_digits(self) -> Option<usize> {
        match self {
            Self::Binary => Some(32),
            Self::Decimal => None,
            Self::Hex => Some(8),
        }
    }

    const fn prefix(self) -> Option<&'static str> {
        match self {
            Self::Binary => Some("0b"),
            Self::Decimal => None,
            Self::Hex => Some("0x"),
        }
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Binary => "binary",
            Self::Decimal => "decimal",
            Self::Hex => "hex",
        };
        f.write_str(name)
    }
}

impl FromStr for Radix {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2" | "bin" | "binary" => Ok(Self::Binary),
            "10" | "dec" | "decimal" => Ok(Self::Decimal),
            "16" | "hex" | "hexadecimal" => Ok(Self::Hex),
            other => Err(format!("unknown radix '{other}' (expected hex, binary or decimal)")),
        }
    }
}

/// Parses a textual address in the given radix.
///
/// Leading and trailing whitespace is ignored and digits are case-insensitive.
///
/// # Errors
///
/// Returns a [`ParseAddressError`] when the text is empty, has the wrong
/// number of digits for a fixed-width radix, contains a non-digit, or (for
/// decimal) exceeds `u32::MAX`.
pub fn parse_address(input: &str, radix: Radix) -> Result<Addr, ParseAddressError> {
    let trimmed = input.trim();
    let digits = radix
        .prefix()
        .and_then(|p| {
            trimmed
                .get(..p.len())
                .filter(|head| head.eq_ignore_ascii_case(p))
                .map(|_| &trimmed[p.len()..])
        })
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(ParseAddressError::Empty);
    }

    if let Some(digit) = digits.chars().find(|c| !c.is_digit(radix.base())) {
        return Err(ParseAddressError::InvalidDigit { radix, digit });
    }

    if let Some(expected) = radix.address_digits() {
        let found = digits.chars().count();
        if found != expected {
            return Err(ParseAddressError::WrongLength {
                radix,
                expected,
                found,
            });
        }
    }

    u32::from_str_radix(digits, radix.base())
        .map(Addr::new)
        .map_err(|_| ParseAddressError::OutOfRange(digits.to_string()))
}

/// Renders an address in the given radix.
///
/// Hex is zero-padded to 8 lower-case digits and binary to 32 digits;
/// decimal carries no padding.
pub fn format_address(addr: Addr, radix: Radix) -> String {
    match radix {
        Radix::Binary => addr.to_binary_string(),
        Radix::Decimal => addr.val().to_string(),
        Radix::Hex => format!("{:08x}", addr.val()),
    }
}

/// Renders a set index in the given radix, without padding.
pub fn format_index(index: usize, radix: Radix) -> String {
    match radix {
        Radix::Binary => format!("{index:b}"),
        Radix::Decimal => index.to_string(),
        Radix::Hex => format!("{index:x}"),
    }
}
