//! lowpass - Streaming fixed-point RK4 filter
//!
//! Reads little-endian `i32` samples from standard input, runs every adjacent
//! pair through the oscillator filter and writes one `i32` per pair to
//! standard output. The state after each step goes to standard error as a
//! `position<TAB>velocity` line.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::io;

use lowpass::filter::{
    LowpassFilter, NoTrace, OscillatorState, Sample, StepTrace, WriterTrace,
    DEFAULT_DAMPING_DENOMINATOR, DEFAULT_DAMPING_NUMERATOR, DEFAULT_INVERSE_FREQUENCY_SQUARED,
    DEFAULT_POSITION, DEFAULT_VELOCITY,
};
use lowpass::stream::{self, DEFAULT_BLOCK_SAMPLES};

/// Command line arguments for lowpass
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Initial position
    #[arg(value_name = "Y0", default_value_t = DEFAULT_POSITION, allow_negative_numbers = true)]
    position: Sample,

    /// Initial velocity
    #[arg(value_name = "Y1", default_value_t = DEFAULT_VELOCITY, allow_negative_numbers = true)]
    velocity: Sample,

    /// Inverse of the squared natural frequency (non-zero)
    #[arg(value_name = "F2INV", default_value_t = DEFAULT_INVERSE_FREQUENCY_SQUARED, allow_negative_numbers = true)]
    inverse_frequency_squared: Sample,

    /// Damping ratio numerator
    #[arg(value_name = "RP", default_value_t = DEFAULT_DAMPING_NUMERATOR, allow_negative_numbers = true)]
    damping_numerator: Sample,

    /// Damping ratio denominator (non-zero)
    #[arg(value_name = "RQ", default_value_t = DEFAULT_DAMPING_DENOMINATOR, allow_negative_numbers = true)]
    damping_denominator: Sample,

    /// Do not print the per-step state to stderr
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Samples per read block
    #[arg(long, default_value_t = DEFAULT_BLOCK_SAMPLES, value_parser = parse_block_samples)]
    block_samples: usize,
}

fn parse_block_samples(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("block size must be at least one sample".to_string()),
        Ok(n) => Ok(n),
        Err(err) => Err(err.to_string()),
    }
}

fn filter_stdio<T: StepTrace>(filter: &mut LowpassFilter<T>, block_samples: usize) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let summary = stream::run(stdin.lock(), stdout.lock(), filter, block_samples)
        .context("Filtering stopped")?;

    if summary.downstream_closed {
        info!("Output closed after {} samples", summary.samples_out);
    }
    debug!("{:?}", summary);
    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging; warnings only by default so stderr carries the step trace
    let level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let state = OscillatorState::initialize(
        args.position,
        args.velocity,
        args.inverse_frequency_squared,
        args.damping_numerator,
        args.damping_denominator,
    )
    .context("Invalid filter parameters")?;

    info!("lowpass starting: {}", state);

    if args.quiet {
        filter_stdio(&mut LowpassFilter::new(state, NoTrace), args.block_samples)
    } else {
        filter_stdio(&mut LowpassFilter::new(state, WriterTrace::stderr()), args.block_samples)
    }
}
