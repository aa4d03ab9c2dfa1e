//! Trace Loader Tests.
//!
//! Verifies line-oriented ingestion: in-order execution, blank-line skipping,
//! stopping at the first malformed address, and I/O error propagation.

use std::io::{self, BufReader, Cursor, Read, Write};

use lwcache_core::common::{ParseAddressError, Radix, TraceError};
use lwcache_core::sim::{InvalidEntry, run_trace, run_trace_file};
use lwcache_core::stats::Outcome;
use lwcache_core::{Addr, CacheConfig, Simulator};
use pretty_assertions::assert_eq;

fn sim() -> Simulator {
    Simulator::new(&CacheConfig::default())
}

#[test]
fn executes_every_line_in_order() {
    let mut sim = sim();
    let trace = "00000000\n00000004\r\n00000000\n";
    let summary = run_trace(&mut sim, Cursor::new(trace), Radix::Hex).unwrap();

    assert!(summary.is_complete());
    assert_eq!(summary.executed, 3);
    let outcomes: Vec<_> = sim.history().iter().map(|e| e.outcome).collect();
    assert_eq!(
        outcomes,
        vec![Outcome::CompulsoryMiss, Outcome::CompulsoryMiss, Outcome::Hit]
    );
}

#[test]
fn skips_empty_lines() {
    let mut sim = sim();
    let trace = "\n0\n\n\r\n4\n";
    let summary = run_trace(&mut sim, Cursor::new(trace), Radix::Decimal).unwrap();
    assert!(summary.is_complete());
    assert_eq!(summary.executed, 2);
    assert_eq!(sim.history().entries()[1].address, Addr(4));
}

/// Only truly empty lines are skipped; whitespace alone is not an address.
#[test]
fn whitespace_only_line_stops_trace() {
    let mut sim = sim();
    let trace = "00000000\n   \n00000004\n";
    let summary = run_trace(&mut sim, Cursor::new(trace), Radix::Hex).unwrap();

    assert_eq!(summary.executed, 1);
    assert_eq!(
        summary.stopped_at,
        Some(InvalidEntry {
            line: 2,
            text: "   ".to_string(),
            error: ParseAddressError::Empty,
        })
    );
    assert_eq!(sim.history().len(), 1);
}

#[test]
fn stops_at_first_invalid_entry() {
    let mut sim = sim();
    let trace = "00000000\n0000004\n00000008\n";
    let summary = run_trace(&mut sim, Cursor::new(trace), Radix::Hex).unwrap();

    assert_eq!(summary.executed, 1);
    assert_eq!(
        summary.stopped_at,
        Some(InvalidEntry {
            line: 2,
            text: "0000004".to_string(),
            error: ParseAddressError::WrongLength {
                radix: Radix::Hex,
                expected: 8,
                found: 7,
            },
        })
    );
    // Loads before the bad line stay applied; nothing after it runs.
    assert_eq!(sim.history().len(), 1);
    assert_eq!(sim.store().occupied(), 1);
}

#[test]
fn reads_trace_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "00000000000000000000000000000000").unwrap();
    writeln!(file, "00000000000000000000000001000000").unwrap();
    file.flush().unwrap();

    let mut sim = sim();
    let summary = run_trace_file(&mut sim, file.path(), Radix::Binary).unwrap();
    assert_eq!(summary.executed, 2);
    assert_eq!(sim.stats().compulsory_misses, 1);
    assert_eq!(sim.stats().misses, 1);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut sim = sim();
    let err = run_trace_file(&mut sim, dir.path().join("absent.txt"), Radix::Hex).unwrap_err();
    assert!(matches!(err, TraceError::Io(_)));
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("device unplugged"))
    }
}

#[test]
fn read_failure_propagates() {
    let mut sim = sim();
    let err = run_trace(&mut sim, BufReader::new(FailingReader), Radix::Hex).unwrap_err();
    assert!(matches!(err, TraceError::Io(_)));
    assert!(sim.history().is_empty());
}
