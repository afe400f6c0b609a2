//! Fixed-point damped oscillator filter
//!
//! This module holds the persistent oscillator state, the fourth-order
//! Runge-Kutta step that advances it by one sample, and the diagnostic sink
//! that records every step. All arithmetic is done on [`Sample`] with
//! truncating division and two's-complement wraparound.

mod rk4;
mod state;
mod trace;

pub use rk4::*;
pub use state::*;
pub use trace::*;

/// Fixed-width sample and state word (32-bit signed)
pub type Sample = i32;

/// Size of one sample on the wire, in bytes
pub const SAMPLE_BYTES: usize = std::mem::size_of::<Sample>();

/// Oscillator state paired with the sink that receives its per-step trace
pub struct LowpassFilter<T: StepTrace> {
    /// Simulation state
    state: OscillatorState,

    /// Diagnostic sink
    trace: T,
}

impl<T: StepTrace> LowpassFilter<T> {
    /// Create a new filter from an initialized state and a trace sink
    pub fn new(state: OscillatorState, trace: T) -> Self {
        LowpassFilter { state, trace }
    }

    /// Advance by one step driven by `x` at the start and `x_next` at the end
    /// of the interval, returning the new position
    #[inline]
    pub fn process(&mut self, x: Sample, x_next: Sample) -> Sample {
        let y = step(&mut self.state, x, x_next);
        self.trace.record(self.state.position(), self.state.velocity());
        y
    }

    /// Current state
    pub fn state(&self) -> &OscillatorState {
        &self.state
    }

    /// Flush any buffered diagnostics
    pub fn flush_trace(&mut self) {
        self.trace.flush();
    }

    /// Tear down the filter, handing back the state and the sink
    pub fn into_parts(self) -> (OscillatorState, T) {
        (self.state, self.trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_records_each_step() {
        let state = OscillatorState::initialize(0, 10, 301, 0, 1).unwrap();
        let mut filter = LowpassFilter::new(state, Vec::<(Sample, Sample)>::new());

        assert_eq!(filter.process(0, 0), 10);
        assert_eq!(filter.process(0, 0), 20);

        let (state, trace) = filter.into_parts();
        assert_eq!(trace, vec![(10, 10), (20, 10)]);
        assert_eq!(state.position(), 20);
    }

    #[test]
    fn process_writes_tab_separated_lines() {
        let state = OscillatorState::initialize(0, 10, 301, 0, 1).unwrap();
        let mut filter = LowpassFilter::new(state, WriterTrace::new(Vec::new()));

        filter.process(0, 0);
        filter.process(0, 0);
        filter.flush_trace();

        let (_, trace) = filter.into_parts();
        let text = String::from_utf8(trace.into_inner()).unwrap();
        assert_eq!(text, "10\t10\n20\t10\n");
    }
}
