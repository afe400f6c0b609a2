//! Fixed-point waveform generators
//!
//! Free-running oscillators built on the same integer RK4 scheme as the
//! filter, plus shapes derived from them and a two-operator FM voice.

mod fixed;
mod fm;
mod oscillator;
mod shapes;

pub use fixed::*;
pub use fm::*;
pub use oscillator::*;
pub use shapes::*;

use log::debug;
use std::io::{self, Write};

use crate::filter::{Sample, SAMPLE_BYTES};

/// Samples rendered per write
const RENDER_BLOCK: usize = 1024;

/// A sound source stepped one sample at a time
pub trait Generator {
    /// State carried between steps
    type State: Copy;

    /// State before the first step
    fn initial_state(&self) -> Self::State;

    /// Advance by one step with driving input `x0`
    fn step(&self, state: Self::State, x0: Sample) -> Self::State;

    /// Sample emitted for `state`
    fn output(state: &Self::State) -> Sample;
}

/// Raise `omega` by one equal-tempered semitone
#[inline]
pub fn semitone_up(omega: Sample) -> Sample {
    mult_div(omega, 34716, 32768)
}

/// Write the undriven output of `generator` to `out` as little-endian
/// samples, stopping after `limit` samples if given
///
/// A consumer closing the output ends rendering normally. Returns the
/// number of samples written.
pub fn render<G, W>(generator: &G, mut out: W, limit: Option<u64>) -> io::Result<u64>
where
    G: Generator,
    W: Write,
{
    let mut state = generator.initial_state();
    let mut written: u64 = 0;
    let mut buf: Vec<u8> = Vec::with_capacity(RENDER_BLOCK * SAMPLE_BYTES);

    loop {
        let remaining = limit.map_or(RENDER_BLOCK as u64, |limit| limit - written);
        let count = remaining.min(RENDER_BLOCK as u64) as usize;
        if count == 0 {
            break;
        }

        buf.clear();
        for _ in 0..count {
            state = generator.step(state, 0);
            buf.extend_from_slice(&G::output(&state).to_le_bytes());
        }

        match out.write_all(&buf) {
            Ok(()) => written += count as u64,
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                debug!("Output closed after {} samples", written);
                return Ok(written);
            }
            Err(err) => return Err(err),
        }
    }

    match out.flush() {
        Ok(()) => Ok(written),
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(written),
        Err(err) => Err(err),
    }
}
