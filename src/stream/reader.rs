//! Sample decoding from a byte stream
//!
//! Reads arrive in arbitrary byte counts. A sample split across two reads is
//! reassembled; a partial sample left when the stream ends is dropped.

use log::{debug, trace};
use std::io::{self, Read};

use crate::filter::{Sample, SAMPLE_BYTES};

/// Block reader of little-endian samples
pub struct SampleReader<R: Read> {
    /// Byte source
    inner: R,

    /// Read buffer, one block of samples long
    buf: Vec<u8>,

    /// Bytes of an incomplete sample held at the front of `buf`
    pending: usize,

    /// Bytes discarded at end of stream
    dropped: usize,

    /// Set once the source has reported end of stream
    eof: bool,
}

impl<R: Read> SampleReader<R> {
    /// Create a new reader delivering at most `block_samples` samples per block
    pub fn new(inner: R, block_samples: usize) -> Self {
        SampleReader {
            inner,
            buf: vec![0; block_samples.max(1) * SAMPLE_BYTES],
            pending: 0,
            dropped: 0,
            eof: false,
        }
    }

    /// Number of samples that fit in one block
    pub fn block_samples(&self) -> usize {
        self.buf.len() / SAMPLE_BYTES
    }

    /// Bytes of a trailing partial sample that were dropped at end of stream
    pub fn dropped_bytes(&self) -> usize {
        self.dropped
    }

    /// Replace the contents of `block` with the next run of whole samples
    ///
    /// Returns `Ok(false)` once the stream has ended; `block` is then empty.
    pub fn read_block(&mut self, block: &mut Vec<Sample>) -> io::Result<bool> {
        block.clear();

        while !self.eof {
            let n = match self.inner.read(&mut self.buf[self.pending..]) {
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };

            if n == 0 {
                self.eof = true;
                if self.pending > 0 {
                    debug!("Dropping {} trailing bytes of an incomplete sample", self.pending);
                    self.dropped = self.pending;
                    self.pending = 0;
                }
                break;
            }

            let filled = self.pending + n;
            let whole = filled - filled % SAMPLE_BYTES;
            block.extend(
                self.buf[..whole]
                    .chunks_exact(SAMPLE_BYTES)
                    .map(|b| Sample::from_le_bytes([b[0], b[1], b[2], b[3]])),
            );
            self.buf.copy_within(whole..filled, 0);
            self.pending = filled - whole;

            if !block.is_empty() {
                trace!("Read block of {} samples ({} bytes pending)", block.len(), self.pending);
                return Ok(true);
            }
        }

        Ok(false)
    }
}
