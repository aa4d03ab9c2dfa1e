//! Simulation driver and trace ingestion.
//!
//! Provides the simulator that owns all cache state, and utilities for
//! feeding it address traces.

/// Line-oriented address trace ingestion.
pub mod loader;

/// The simulator and its per-load report.
pub mod simulator;

pub use loader::{InvalidEntry, TraceSummary, run_trace, run_trace_file};
pub use simulator::{LoadReport, Simulator};
