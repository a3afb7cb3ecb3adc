//! isohash - Hash ISO images with many digests and write TOML sidecars.
//!
//! Usage:
//!   isohash [DIR]                     Hash every *.iso under DIR
//!   isohash --workers 8 /srv/isos     Use eight hashing workers
//!   isohash --no-skip-existing DIR    Rehash files that already have a sidecar
//!   isohash --format json DIR         Print the run summary as JSON
//!   isohash --help                    Show help

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use humansize::{BINARY, format_size};
use tracing::error;
use tracing_subscriber::EnvFilter;

use isohash_core::{Algorithm, HashConfig, RunSummary};
use isohash_pipeline::HashPipeline;

#[derive(Parser)]
#[command(
    name = "isohash",
    version,
    about = "Compute multiple digests of ISO images and store them in TOML sidecars",
    long_about = "isohash walks a directory tree, hashes every file ending in .iso with \
                  SHA-256, SHA-512, Whirlpool, RIPEMD-160, KangarooTwelve, SHA3-256, \
                  BLAKE2b and BLAKE3 in a single pass, and writes the results to a \
                  `<file>.toml` sidecar next to each image."
)]
struct Cli {
    /// Directory to scan (defaults to the current directory)
    dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Rehash files even if a sidecar already exists
    #[arg(long)]
    no_skip_existing: bool,

    /// Disable per-file progress reporting
    #[arg(long)]
    no_progress: bool,

    /// Number of hashing workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// File name suffix to match, case-insensitive
    #[arg(short, long)]
    suffix: Option<String>,

    /// Digests to compute, comma separated (e.g. "sha256,blake3")
    #[arg(short, long, value_delimiter = ',')]
    algorithms: Option<Vec<Algorithm>>,

    /// Read settings from a TOML file; command line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format for the run summary
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = build_config(&cli)?;
    let pipeline = HashPipeline::new(config);
    let summary = pipeline.run().context("Hashing run failed")?;

    match cli.format {
        OutputFormat::Text => print_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    if summary.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("isohash=debug,warn")
        } else {
            EnvFilter::new("isohash=info,warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(verbose)
        .init();
}

/// Merge the optional config file with command line overrides.
fn build_config(cli: &Cli) -> Result<HashConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => HashConfig::default(),
    };

    if let Some(dir) = &cli.dir {
        config.root = dir.clone();
    }
    if cli.no_skip_existing {
        config.skip_existing = false;
    }
    if cli.no_progress {
        config.show_progress = false;
    }
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    if let Some(suffix) = &cli.suffix {
        config.suffix = suffix.clone();
    }
    if let Some(algorithms) = &cli.algorithms {
        config.algorithms = algorithms.clone();
    }

    config.validate()?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<HashConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config file {}", path.display()))?;
    let config: HashConfig = toml::from_str(&text)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("{}", "─".repeat(60));
    println!(" {}", summary.root.display());
    println!(" {}", summary.summary());
    println!(
        " Hashed {} with {} workers in {:.2}s",
        format_size(summary.bytes_hashed, BINARY),
        summary.workers,
        summary.elapsed.as_secs_f64()
    );
    println!("{}", "─".repeat(60));

    if !summary.failures.is_empty() {
        println!();
        println!(" {} failure(s):", summary.failures.len());
        for failure in &summary.failures {
            error!("{}: {}", failure.path.display(), failure.message);
            println!("   {}: {}", failure.path.display(), failure.message);
        }
    }
}
