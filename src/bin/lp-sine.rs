//! lp-sine - Fixed-point sine generator
//!
//! Writes the position and velocity of an undamped oscillator to standard
//! output, interleaved as little-endian `i32` pairs, starting with the
//! initial state.

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use std::io::{self, Write};

use lowpass::osc::Oscillator;
use lowpass::Sample;

/// Command line arguments for lp-sine
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Angular frequency (Q16 radians per sample)
    #[arg(value_name = "OMEGA", allow_negative_numbers = true)]
    omega: Sample,

    /// Stop after this many steps instead of running until stdout closes
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

    let osc = Oscillator::from_omega(args.omega);
    let mut phase = osc.initial_state();
    debug!("Sine oscillator {:?} starting at {:?}", osc, phase);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut steps: u64 = 0;

    while args.count.map_or(true, |count| steps < count) {
        let mut frame = [0u8; 8];
        frame[..4].copy_from_slice(&phase.y0.to_le_bytes());
        frame[4..].copy_from_slice(&phase.y1.to_le_bytes());

        match out.write_all(&frame) {
            Ok(()) => (),
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                debug!("Output closed after {} steps", steps);
                return Ok(());
            }
            Err(err) => return Err(err).context("Failed to write samples"),
        }

        phase = osc.step(phase, 0);
        steps += 1;
    }

    match out.flush() {
        Err(err) if err.kind() != io::ErrorKind::BrokenPipe => Err(err).context("Failed to write samples"),
        _ => Ok(()),
    }
}
