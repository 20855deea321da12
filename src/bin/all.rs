//! CLI for running the dot product scaling benchmarks.
//!
//! Usage:
//!   dot-scaling                     # Run every registered kernel
//!   dot-scaling --list              # List registered kernels
//!   dot-scaling --verify            # Check kernels against the reference
//!   dot-scaling --filter sse2       # Run kernels whose name contains "sse2"
//!   dot-scaling --format json       # Machine-readable report on stdout

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use dot_scaling::math::dot_product::{verify, WorkloadGenerator};
use dot_scaling::registry::{build_registry, SizeRange};
use dot_scaling::report::write_json;
use dot_scaling::utils::runner::export_csv;
use dot_scaling::utils::timer::{PinStrategy, TimingConfig};
use dot_scaling::{run_suite, tui, RunOptions};

/// Report format on stdout
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Human,
    Json,
}

/// When the measuring thread is pinned to its core
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Pin {
    /// Once for the whole run
    Global,
    /// Around each timed repetition
    PerRepetition,
    Off,
}

impl From<Pin> for PinStrategy {
    fn from(pin: Pin) -> Self {
        match pin {
            Pin::Global => PinStrategy::Global,
            Pin::PerRepetition => PinStrategy::PerRepetition,
            Pin::Off => PinStrategy::Off,
        }
    }
}

/// Dot product scaling benchmarks
#[derive(Parser, Debug)]
#[command(name = "dot-scaling")]
#[command(author, version, about = "Time dot product kernels across input sizes")]
struct Cli {
    /// List registered kernels and exit
    #[arg(short, long)]
    list: bool,

    /// Check every kernel against the reference and exit
    #[arg(long)]
    verify: bool,

    /// Only run kernels whose name contains this substring
    #[arg(short, long)]
    filter: Option<String>,

    /// Repetitions per size, for every kernel
    #[arg(short, long)]
    repetitions: Option<usize>,

    /// Smallest input size
    #[arg(long)]
    min_size: Option<usize>,

    /// Largest input size
    #[arg(long)]
    max_size: Option<usize>,

    /// Growth factor between sizes
    #[arg(long)]
    multiplier: Option<usize>,

    /// Minimum duration of one timed batch, in milliseconds
    #[arg(long, default_value = "25")]
    min_time_ms: u64,

    /// Upper bound on kernel calls per batch
    #[arg(long, default_value = "1000000000")]
    max_iterations: u64,

    /// Untimed kernel calls before calibration
    #[arg(long, default_value = "10")]
    warmup: u64,

    /// CPU pinning
    #[arg(long, value_enum, default_value = "global")]
    pin: Pin,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    format: Format,

    /// Write raw samples to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Seed the input generator for reproducible inputs
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Size range override, present when any bound was given
    fn range(&self) -> Option<SizeRange> {
        if self.min_size.is_none() && self.max_size.is_none() && self.multiplier.is_none() {
            return None;
        }
        let reference = SizeRange::REFERENCE;
        // Left unvalidated so a bad range shows up as skipped registrations
        Some(SizeRange {
            start: self.min_size.unwrap_or(reference.start),
            end: self.max_size.unwrap_or(reference.end),
            multiplier: self.multiplier.unwrap_or(reference.multiplier),
        })
    }

    fn run_options(&self) -> RunOptions {
        RunOptions {
            filter: self.filter.clone(),
            seed: self.seed,
            repetitions: self.repetitions,
            range: self.range(),
            timing: TimingConfig {
                min_time: Duration::from_millis(self.min_time_ms),
                max_iterations: self.max_iterations,
                warmup_iterations: self.warmup,
                pin_strategy: self.pin.into(),
            },
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "dot_scaling=debug"
    } else {
        "dot_scaling=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = build_registry();

    if cli.list {
        tui::print_available_kernels(&registry);
        return Ok(());
    }

    if cli.verify {
        let mut generator = WorkloadGenerator::new(cli.seed);
        match verify(&mut generator) {
            Ok(()) => {
                println!("✅ All {} kernels match the reference", registry.all().len());
                return Ok(());
            }
            Err(e) => bail!("verification failed: {}", e),
        }
    }

    let options = cli.run_options();
    if registry.matching(options.filter.as_deref()).is_empty() {
        bail!(
            "no kernel matches '{}'. Available: {:?}",
            options.filter.as_deref().unwrap_or(""),
            registry.list_names()
        );
    }

    if cli.format == Format::Human {
        tui::print_header();
    }

    let report = run_suite(&registry, &options);

    match cli.format {
        Format::Human => tui::print_suite(&report),
        Format::Json => write_json(std::io::stdout().lock(), &report)?,
    }

    if let Some(path) = &cli.csv {
        export_csv(path, &report)
            .with_context(|| format!("writing CSV to {}", path.display()))?;
        if cli.format == Format::Human {
            println!("Raw samples written to {}", path.display());
        }
    }

    Ok(())
}
