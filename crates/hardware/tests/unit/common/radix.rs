//! Radix Conversion Tests.
//!
//! Covers the three input formats accepted for addresses and the matching
//! display helpers.

use lwcache_core::Addr;
use lwcache_core::common::{ParseAddressError, Radix, format_address, format_index, parse_address};
use rstest::rstest;

#[rstest]
#[case("0000001c", Radix::Hex, 0x1c)]
#[case("DEADBEEF", Radix::Hex, 0xdead_beef)]
#[case("  ffffffff\r", Radix::Hex, 0xffff_ffff)]
#[case("00000000000000000000000000011100", Radix::Binary, 0x1c)]
#[case("0b10000000000000000000000000000000", Radix::Binary, 0x8000_0000)]
#[case("28", Radix::Decimal, 28)]
#[case("4294967295", Radix::Decimal, u32::MAX)]
#[case("0", Radix::Decimal, 0)]
fn parses_valid_addresses(#[case] input: &str, #[case] radix: Radix, #[case] expected: u32) {
    assert_eq!(parse_address(input, radix), Ok(Addr(expected)));
}

#[test]
fn hex_requires_eight_digits() {
    assert_eq!(
        parse_address("1c", Radix::Hex),
        Err(ParseAddressError::WrongLength {
            radix: Radix::Hex,
            expected: 8,
            found: 2,
        })
    );
}

#[test]
fn binary_rejects_non_binary_digits() {
    let input = "0000000000000000000000000001112";
    assert_eq!(
        parse_address(input, Radix::Binary),
        Err(ParseAddressError::InvalidDigit {
            radix: Radix::Binary,
            digit: '2',
        })
    );
}

#[test]
fn hex_rejects_stray_characters() {
    assert!(matches!(
        parse_address("0000001g", Radix::Hex),
        Err(ParseAddressError::InvalidDigit { digit: 'g', .. })
    ));
}

#[test]
fn decimal_rejects_negative_and_overflow() {
    assert!(matches!(
        parse_address("-1", Radix::Decimal),
        Err(ParseAddressError::InvalidDigit { digit: '-', .. })
    ));
    assert!(matches!(
        parse_address("99999999999", Radix::Decimal),
        Err(ParseAddressError::OutOfRange(_))
    ));
}

#[test]
fn blank_input_is_empty() {
    assert_eq!(parse_address("   ", Radix::Hex), Err(ParseAddressError::Empty));
    assert_eq!(parse_address("0x", Radix::Hex), Err(ParseAddressError::Empty));
}

#[test]
fn formats_addresses_per_radix() {
    let a = Addr(0x1c);
    assert_eq!(format_address(a, Radix::Hex), "0000001c");
    assert_eq!(format_address(a, Radix::Decimal), "28");
    assert_eq!(
        format_address(a, Radix::Binary),
        "00000000000000000000000000011100"
    );
}

#[test]
fn formats_indices_without_padding() {
    assert_eq!(format_index(10, Radix::Hex), "a");
    assert_eq!(format_index(5, Radix::Binary), "101");
    assert_eq!(format_index(0, Radix::Binary), "0");
    assert_eq!(format_index(12, Radix::Decimal), "12");
}

#[rstest]
#[case("hex", Radix::Hex)]
#[case("16", Radix::Hex)]
#[case("Binary", Radix::Binary)]
#[case("2", Radix::Binary)]
#[case("dec", Radix::Decimal)]
fn radix_from_str(#[case] input: &str, #[case] expected: Radix) {
    assert_eq!(input.parse::<Radix>(), Ok(expected));
}

#[test]
fn radix_from_str_rejects_unknown() {
    assert!("octal".parse::<Radix>().is_err());
}
