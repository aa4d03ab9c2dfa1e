//! Address Trace Loader.
//!
//! This module feeds externally supplied address lists into a simulator. It performs:
//! 1. **Line parsing:** One address per line in the configured input radix. Empty lines
//!    are skipped; a line holding only whitespace is an invalid entry like any other.
//! 2. **In-order execution:** Each valid address is executed as soon as it is read.
//! 3. **Early stop:** The first malformed entry ends ingestion. Loads already executed
//!    stay applied, and the offending line is reported back to the caller.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::cache::RandomSource;
use crate::common::error::{ParseAddressError, TraceError};
use crate::common::radix::{Radix, parse_address};
use crate::sim::simulator::Simulator;

/// A trace line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEntry {
    /// 1-based line number.
    pub line: usize,
    /// The line as read, without its terminator.
    pub text: String,
    /// Why it was rejected.
    pub error: ParseAddressError,
}

/// Result of feeding a trace into a simulator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceSummary {
    /// Number of loads executed.
    pub executed: usize,
    /// The entry that stopped ingestion, if any.
    pub stopped_at: Option<InvalidEntry>,
}

impl TraceSummary {
    /// True if every non-empty line was executed.
    pub const fn is_complete(&self) -> bool {
        self.stopped_at.is_none()
    }
}

/// Executes every address in `reader` against `sim`, in order.
///
/// # Arguments
///
/// * `sim` - Simulator to drive.
/// * `reader` - Source of newline-separated addresses.
/// * `radix` - Number system the addresses are written in.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if reading fails. A malformed address is not
/// an error: ingestion stops and the entry is reported in the summary.
pub fn run_trace<R, B>(
    sim: &mut Simulator<R>,
    reader: B,
    radix: Radix,
) -> Result<TraceSummary, TraceError>
where
    R: RandomSource,
    B: BufRead,
{
    let mut summary = TraceSummary::default();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        match parse_address(&line, radix) {
            Ok(addr) => {
                let _ = sim.execute_load(addr);
                summary.executed += 1;
            }
            Err(error) => {
                warn!(line = number + 1, text = %line, %error, "stopping trace at invalid address");
                summary.stopped_at = Some(InvalidEntry {
                    line: number + 1,
                    text: line,
                    error,
                });
                break;
            }
        }
    }

    Ok(summary)
}

/// Opens `path` and runs it as a trace; see [`run_trace`].
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be opened or read.
pub fn run_trace_file<R, P>(
    sim: &mut Simulator<R>,
    path: P,
    radix: Radix,
) -> Result<TraceSummary, TraceError>
where
    R: RandomSource,
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    run_trace(sim, BufReader::new(file), radix)
}
