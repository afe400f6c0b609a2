//! lp-fm - Fixed-point FM tone generator
//!
//! Renders a two-operator FM voice as little-endian `i32` samples on standard
//! output until the consumer closes it.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io;

use lowpass::osc::{self, semitone_up, Fm, Oscillator};
use lowpass::Sample;

/// Command line arguments for lp-fm
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base angular frequency of the carrier
    #[arg(long, default_value_t = 3775, allow_negative_numbers = true)]
    carrier: Sample,

    /// Semitones to transpose the carrier by
    #[arg(long, default_value_t = 12)]
    semitones: u32,

    /// Carrier damping
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    zeta: Sample,

    /// Angular frequency of the modulator
    #[arg(long, default_value_t = 3000, allow_negative_numbers = true)]
    modulator: Sample,

    /// Modulation index
    #[arg(long, default_value_t = 1024, allow_negative_numbers = true)]
    index: Sample,

    /// Stop after this many samples instead of running until stdout closes
    #[arg(short = 'n', long)]
    count: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let omega = (0..args.semitones).fold(args.carrier, |omega, _| semitone_up(omega));
    let voice = Fm {
        carrier: Oscillator { omega, zeta: args.zeta },
        modulator: Oscillator::from_omega(args.modulator),
        index: args.index,
    };
    info!("FM voice: {:?}", voice);

    let stdout = io::stdout();
    let written = osc::render(&voice, io::BufWriter::new(stdout.lock()), args.count)
        .context("Failed to write samples")?;
    info!("Wrote {} samples", written);

    Ok(())
}
