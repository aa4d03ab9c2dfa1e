//! LW cache simulator CLI.
//!
//! This binary drives the `lwcache_core` simulator from the command line. It provides:
//! 1. **Run:** Execute word loads given as arguments or read from a trace file, then print
//!    the cache, history and statistics (or a JSON report).
//! 2. **Geometry:** Show how an address splits into tag, index, block and offset for a cache
//!    shape, and which knob values fit.
//! 3. **Convert:** Re-render an address in another radix.

mod render;

use std::path::{Path, PathBuf};
use std::{fs, io, process};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use lwcache_core::common::{
    ConfigError, ParseAddressError, Radix, TraceError, format_address, parse_address,
};
use lwcache_core::config::DisplayConfig;
use lwcache_core::sim::{InvalidEntry, run_trace_file};
use lwcache_core::{Addr, Config, Geometry, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "lwsim",
    author,
    version,
    about = "Set-associative cache simulator for LW address streams",
    long_about = "Simulate word loads against a set-associative cache with single-bit pseudo-LRU replacement.\n\nExamples:\n  lwsim run -c 16 -b 2 -a 2 00000000 00000004 00000040\n  lwsim run --config cache.json --file trace.txt --json\n  lwsim geometry -c 64 -b 4 -a 2\n  lwsim convert 0000001c --to binary"
)]
struct Cli {
    /// Log filter such as `debug` or `lwcache_core=trace` (overrides `RUST_LOG`).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute loads and print the resulting cache state.
    Run(RunArgs),

    /// Show the address field split and selectable knob values.
    Geometry(CacheArgs),

    /// Convert an address between hex, binary and decimal.
    Convert {
        /// Address to convert.
        address: String,

        /// Radix the address is written in.
        #[arg(long, default_value_t = Radix::Hex)]
        from: Radix,

        /// Radix to print it in.
        #[arg(long, default_value_t = Radix::Binary)]
        to: Radix,
    },
}

/// Cache shape, from a JSON file and/or individual flags.
#[derive(Args, Debug)]
struct CacheArgs {
    /// JSON configuration file; the flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Capacity in words (power of two).
    #[arg(short, long)]
    capacity: Option<usize>,

    /// Words per block (power of two).
    #[arg(short, long)]
    block_size: Option<usize>,

    /// Number of ways (power of two).
    #[arg(short, long)]
    associativity: Option<usize>,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    cache: CacheArgs,

    /// Seed for the victim-selection random source.
    #[arg(long)]
    seed: Option<u64>,

    /// Radix of the addresses given as arguments or in the trace.
    #[arg(long)]
    input_radix: Option<Radix>,

    /// Radix used to print addresses.
    #[arg(long)]
    address_radix: Option<Radix>,

    /// Radix used to print set indices.
    #[arg(long)]
    index_radix: Option<Radix>,

    /// Count compulsory misses towards the miss rate.
    #[arg(long)]
    count_compulsory: bool,

    /// Trace file with one address per line, run after any addresses given as arguments.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print a JSON report instead of tables.
    #[arg(long)]
    json: bool,

    /// Addresses to load, in order.
    addresses: Vec<String>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read config {}: {source}", path.display())]
    ReadConfig { path: PathBuf, source: io::Error },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid address {text:?}: {source}")]
    Address {
        text: String,
        source: ParseAddressError,
    },

    #[error("trace: {0}")]
    Trace(#[from] TraceError),

    #[error("report: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let result = match &cli.command {
        Commands::Run(args) => cmd_run(args),
        Commands::Geometry(args) => cmd_geometry(args),
        Commands::Convert { address, from, to } => cmd_convert(address, *from, *to),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Installs the stderr subscriber so stdout carries only the report.
fn init_tracing(level: Option<&str>) {
    let filter = level.map_or_else(
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        EnvFilter::new,
    );
    fmt::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

impl CacheArgs {
    /// Loads the JSON file if given, applies flag overrides, and validates the cache knobs.
    fn load(&self) -> Result<Config, CliError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => Config::default(),
        };
        if let Some(capacity) = self.capacity {
            config.cache.capacity = capacity;
        }
        if let Some(block_size) = self.block_size {
            config.cache.block_size = block_size;
        }
        if let Some(associativity) = self.associativity {
            config.cache.associativity = associativity;
        }
        config.cache.validate()?;
        Ok(config)
    }
}

fn read_config(path: &Path) -> Result<Config, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Config::from_json(&text)?)
}

fn parse_all(texts: &[String], radix: Radix) -> Result<Vec<Addr>, CliError> {
    texts
        .iter()
        .map(|text| {
            parse_address(text, radix).map_err(|source| CliError::Address {
                text: text.clone(),
                source,
            })
        })
        .collect()
}

/// State left behind by a `run`: the simulator plus what the report needs.
#[derive(Debug)]
struct RunOutcome {
    sim: Simulator,
    display: DisplayConfig,
    stopped_at: Option<InvalidEntry>,
}

impl RunArgs {
    /// Merges the config file, cache flags, seed and display flags, in that order.
    fn load(&self) -> Result<Config, CliError> {
        let mut config = self.cache.load()?;
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(radix) = self.input_radix {
            config.display.input_radix = radix;
        }
        if let Some(radix) = self.address_radix {
            config.display.address_radix = radix;
        }
        if let Some(radix) = self.index_radix {
            config.display.index_radix = radix;
        }
        if self.count_compulsory {
            config.display.count_compulsory_as_miss = true;
        }
        Ok(config)
    }

    /// Executes the argument addresses, then the trace file.
    ///
    /// Every argument address is validated before any of them executes. Trace
    /// ingestion, in contrast, keeps the loads before a malformed line.
    fn execute(&self) -> Result<RunOutcome, CliError> {
        let config = self.load()?;
        let display = config.display;

        let addresses = parse_all(&self.addresses, display.input_radix)?;
        let mut sim = Simulator::from_config(&config);
        debug!(geometry = ?sim.geometry(), loads = addresses.len(), "starting run");
        let _ = sim.execute_all(addresses);

        let stopped_at = match &self.file {
            Some(path) => run_trace_file(&mut sim, path, display.input_radix)?.stopped_at,
            None => None,
        };

        Ok(RunOutcome {
            sim,
            display,
            stopped_at,
        })
    }
}

/// Runs the loads and prints either the text report or the JSON report.
fn cmd_run(args: &RunArgs) -> Result<(), CliError> {
    let RunOutcome {
        sim,
        display,
        stopped_at,
    } = args.execute()?;

    if args.json {
        let report =
            render::Report::new(&sim, display.count_compulsory_as_miss, stopped_at.as_ref());
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", render::fields_graphic(sim.geometry()));
    print!(
        "{}",
        render::cache_tables(sim.store(), display.address_radix, display.index_radix)
    );
    println!("LRU bits: {:?}", sim.lru_bits());
    println!();
    println!("HISTORY");
    print!("{}", render::history_table(sim.history(), display.address_radix));
    println!();
    print!("{}", sim.stats().summary(display.count_compulsory_as_miss));

    if let Some(entry) = &stopped_at {
        eprintln!("trace stopped at {}", render::describe_invalid(entry));
    }
    Ok(())
}

fn cmd_geometry(args: &CacheArgs) -> Result<(), CliError> {
    let config = args.load()?;
    let geometry = Geometry::from_config(&config.cache);

    println!(
        "capacity {} words, block size {} words, {} ways, {} sets",
        geometry.capacity, geometry.block_size, geometry.associativity, geometry.num_sets
    );
    println!(
        "tag {} bits, index {} bits, block {} bits, offset 2 bits",
        geometry.tag_bits, geometry.index_bits, geometry.block_bits
    );
    println!();
    print!("{}", render::fields_graphic(&geometry));
    println!();
    println!("legal block sizes:     {:?}", geometry.legal_block_sizes());
    println!("legal associativities: {:?}", geometry.legal_associativities());
    Ok(())
}

fn cmd_convert(address: &str, from: Radix, to: Radix) -> Result<(), CliError> {
    let addr = parse_address(address, from).map_err(|source| CliError::Address {
        text: address.to_string(),
        source,
    })?;
    println!("{}", format_address(addr, to));
    Ok(())
}
