//! Trace-replay CLI for the SRRIP-HP tag store.
//!
//! This binary replays a memory trace through a tag store and reports what
//! happened. It performs:
//! 1. **Configuration:** Optional JSON config file, then command-line overrides.
//! 2. **Replay:** Every trace event through a `CacheController`.
//! 3. **Reporting:** Statistics as text or JSON, optionally with final set contents.

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rrip_core::common::ConfigError;
use rrip_core::config::{PolicyKind, TagStoreConfig};
use rrip_core::sim::{CacheController, load_trace};

#[derive(Parser, Debug)]
#[command(
    name = "rripsim",
    author,
    version,
    about = "Replay a memory trace through an SRRIP-HP tag store",
    long_about = "Replay a memory trace through a set-associative tag store and print hit/miss statistics.\n\nTrace lines are `<R|W|A|I> <address> [s|ns]`; `#` starts a comment.\n\nExamples:\n  rripsim traces/stream.trace\n  rripsim --ways 8 --alloc-ways 6 --json traces/mix.trace\n  rripsim --config l2.json --policy lru -v traces/mix.trace"
)]
struct Cli {
    /// Memory trace to replay.
    trace: PathBuf,

    /// JSON tag store configuration; flags below override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of sets (power of two).
    #[arg(long)]
    sets: Option<usize>,

    /// Ways per set.
    #[arg(long)]
    ways: Option<usize>,

    /// Leading ways eligible for allocation.
    #[arg(long)]
    alloc_ways: Option<usize>,

    /// Block size in bytes (power of two, at least 4).
    #[arg(long)]
    block_size: Option<usize>,

    /// Replacement policy.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Print statistics as JSON.
    #[arg(long)]
    json: bool,

    /// Print every set's final contents after the statistics.
    #[arg(long)]
    dump: bool,

    /// Log verbosity: -v for replacement decisions, -vv for aging passes. `RUST_LOG` wins.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Srrip,
    Lru,
}

impl From<PolicyArg> for PolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Srrip => Self::Srrip,
            PolicyArg::Lru => Self::Lru,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config file (or defaults) and applies command-line overrides.
fn build_config(cli: &Cli) -> Result<TagStoreConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => TagStoreConfig::load(path)?,
        None => TagStoreConfig::default(),
    };

    if let Some(sets) = cli.sets {
        config.num_sets = sets;
    }
    if let Some(ways) = cli.ways {
        config.associativity = ways;
    }
    if let Some(alloc) = cli.alloc_ways {
        config.alloc_assoc = Some(alloc);
    }
    if let Some(block_size) = cli.block_size {
        config.block_size = block_size;
    }
    if let Some(policy) = cli.policy {
        config.policy = policy.into();
    }

    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = build_config(cli)?;
    let mut controller = CacheController::from_config(&config)?;
    let ops = load_trace(&cli.trace)?;

    info!(
        ops = ops.len(),
        sets = config.num_sets,
        ways = config.associativity,
        alloc_ways = config.alloc_ways(),
        policy = controller.tags().policy_name(),
        "replaying trace"
    );

    let stats = controller.run(ops);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        println!("{stats}");
    }

    if cli.dump {
        for set in controller.tags().sets() {
            println!("{set}");
        }
    }
    Ok(())
}
