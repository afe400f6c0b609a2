//! Per-step diagnostics
//!
//! After every step the filter reports its new position and velocity to a
//! [`StepTrace`]. The stock sink writes them as `position<TAB>velocity`
//! lines; tests collect them into a `Vec`.

use log::warn;
use std::io::{self, Write};

use super::Sample;

/// Receiver of the state after each step
pub trait StepTrace {
    /// Record the state after one step
    fn record(&mut self, position: Sample, velocity: Sample);

    /// Push out anything buffered
    fn flush(&mut self) {}
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl StepTrace for NoTrace {
    #[inline]
    fn record(&mut self, _position: Sample, _velocity: Sample) {}
}

impl StepTrace for Vec<(Sample, Sample)> {
    fn record(&mut self, position: Sample, velocity: Sample) {
        self.push((position, velocity));
    }
}

/// Sink that writes one tab-separated line per step
///
/// The first write error is logged and silences the sink; filtering goes on
/// without diagnostics.
pub struct WriterTrace<W: Write> {
    /// Buffered destination
    out: io::BufWriter<W>,

    /// Set after a failed write
    failed: bool,
}

impl<W: Write> WriterTrace<W> {
    /// Create a new trace sink writing to `out`
    pub fn new(out: W) -> Self {
        WriterTrace {
            out: io::BufWriter::new(out),
            failed: false,
        }
    }

    /// Whether a write error has silenced this sink
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> W {
        StepTrace::flush(&mut self);
        match self.out.into_inner() {
            Ok(out) => out,
            Err(err) => err.into_inner().into_parts().0,
        }
    }

    fn fail(&mut self, err: io::Error) {
        warn!("Diagnostic output failed, disabling step trace: {}", err);
        self.failed = true;
    }
}

impl WriterTrace<io::Stderr> {
    /// Trace sink on standard error
    pub fn stderr() -> Self {
        WriterTrace::new(io::stderr())
    }
}

impl<W: Write> StepTrace for WriterTrace<W> {
    fn record(&mut self, position: Sample, velocity: Sample) {
        if self.failed {
            return;
        }
        if let Err(err) = writeln!(self.out, "{}\t{}", position, velocity) {
            self.fail(err);
        }
    }

    fn flush(&mut self) {
        if self.failed {
            return;
        }
        if let Err(err) = self.out.flush() {
            self.fail(err);
        }
    }
}

impl<T: StepTrace + ?Sized> StepTrace for &mut T {
    fn record(&mut self, position: Sample, velocity: Sample) {
        (**self).record(position, velocity);
    }

    fn flush(&mut self) {
        (**self).flush();
    }
}

impl<T: StepTrace + ?Sized> StepTrace for Box<T> {
    fn record(&mut self, position: Sample, velocity: Sample) {
        (**self).record(position, velocity);
    }

    fn flush(&mut self) {
        (**self).flush();
    }
}
