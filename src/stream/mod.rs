//! Streaming driver
//!
//! This module moves samples from an input byte stream through a
//! [`LowpassFilter`] to an output byte stream, one step per adjacent input
//! pair, block by block.

mod overlap;
mod reader;

pub use overlap::*;
pub use reader::*;

use log::{debug, trace};
use std::io::{self, Read, Write};
use thiserror::Error;

use crate::filter::{LowpassFilter, Sample, StepTrace, SAMPLE_BYTES};

/// Default number of samples per read block
pub const DEFAULT_BLOCK_SAMPLES: usize = 1023;

/// Errors that stop the stream
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("failed to read input samples")]
    Read(#[source] io::Error),

    #[error("failed to write output samples")]
    Write(#[source] io::Error),
}

/// Counters for one run of the driver
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StreamSummary {
    /// Whole samples read
    pub samples_in: u64,

    /// Samples produced by the filter
    pub samples_out: u64,

    /// Bytes of an incomplete trailing sample that were ignored
    pub dropped_bytes: usize,

    /// The output was closed by the consumer before input ended
    pub downstream_closed: bool,
}

/// Filter `input` into `output` until the input ends or the output closes
///
/// Every adjacent pair of input samples produces one output sample, in
/// order, regardless of how reads split the input.
pub fn run<R, W, T>(
    input: R,
    mut output: W,
    filter: &mut LowpassFilter<T>,
    block_samples: usize,
) -> Result<StreamSummary, StreamError>
where
    R: Read,
    W: Write,
    T: StepTrace,
{
    let mut reader = SampleReader::new(input, block_samples);
    let mut overlap = Overlap::new();
    let mut summary = StreamSummary::default();

    let mut block: Vec<Sample> = Vec::with_capacity(reader.block_samples());
    let mut encoded: Vec<u8> = Vec::with_capacity(reader.block_samples() * SAMPLE_BYTES);

    debug!("Stream started: {}, {} samples per block", filter.state(), reader.block_samples());

    while reader.read_block(&mut block).map_err(StreamError::Read)? {
        summary.samples_in += block.len() as u64;

        encoded.clear();
        let produced = overlap.pairs(&block, |x, x_next| {
            let y = filter.process(x, x_next);
            encoded.extend_from_slice(&y.to_le_bytes());
        });
        filter.flush_trace();

        if produced == 0 {
            continue;
        }

        match output.write_all(&encoded) {
            Ok(()) => summary.samples_out += produced as u64,
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                debug!("Output closed by consumer, stopping");
                summary.downstream_closed = true;
                break;
            }
            Err(err) => return Err(StreamError::Write(err)),
        }
        trace!("Wrote {} samples", produced);
    }

    if !summary.downstream_closed {
        match output.flush() {
            Ok(()) => (),
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => summary.downstream_closed = true,
            Err(err) => return Err(StreamError::Write(err)),
        }
    }

    summary.dropped_bytes = reader.dropped_bytes();
    debug!(
        "Stream finished: {} samples in, {} samples out, {} bytes dropped",
        summary.samples_in, summary.samples_out, summary.dropped_bytes
    );

    Ok(summary)
}
