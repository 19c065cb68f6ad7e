//! ## parsemark-cli
//! **The runner binaries**
//!
//! Three executables with one shape:
//!
//! ```text
//! arena_runner <path-to-input-file> <iteration-count>
//! reuse_runner <path-to-input-file> <iteration-count>
//! scan_runner  <path-to-input-file> <iteration-count>
//! ```
//!
//! Exit code 2: wrong arguments. Exit code 1: the input could not be
//! read or a repetition failed. Exit code 0: success, and stdout holds
//! exactly one line: the elapsed nanoseconds for the full loop.
//! Logging goes to stderr so the measurement channel stays clean.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use parsemark_core::error::BenchError;
use parsemark_core::input::Fixture;
use parsemark_harness::Harness;

/// Arguments common to every runner.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct RunnerArgs {
    /// HTML file parsed on every repetition.
    pub input: PathBuf,

    /// Repetition count. Unsigned-parse-on-failure semantics: a
    /// non-numeric value measures zero repetitions.
    #[arg(value_parser = parse_iterations, allow_hyphen_values = true)]
    pub iterations: u64,
}

fn parse_iterations(raw: &str) -> Result<u64, std::convert::Infallible> {
    Ok(raw.parse().unwrap_or(0))
}

/// Stderr logging with `RUST_LOG` override, defaulting to `info`.
pub fn init_logging() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init()
}

/// Loads the fixture and runs one measurement kind over it.
pub fn run(
    args: &RunnerArgs,
    measure: fn(&Harness, u64) -> Result<u64, BenchError>,
) -> Result<u64> {
    let fixture = Fixture::load(&args.input)
        .with_context(|| format!("failed to read input file: {}", args.input.display()))?;
    let harness = Harness::new(fixture);
    let elapsed_ns =
        measure(&harness, args.iterations).context("benchmark loop failed")?;
    Ok(elapsed_ns)
}

/// Reports the result and exits. Stdout carries exactly one line on
/// success and nothing on failure.
pub fn finish(result: Result<u64>) -> ! {
    match result {
        Ok(elapsed_ns) => {
            println!("{elapsed_ns}");
            std::process::exit(0);
        }
        Err(err) => {
            tracing::error!("run failed: {err:#}");
            std::process::exit(1);
        }
    }
}
