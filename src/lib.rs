//! lowpass - Fixed-point damped oscillator filter
//!
//! Filters a stream of 32-bit integer samples by driving a damped harmonic
//! oscillator with them and integrating it with fourth-order Runge-Kutta in
//! pure integer arithmetic. The same scheme also powers a small family of
//! waveform generators.

pub mod filter;
pub mod osc;
pub mod stream;

pub use filter::{ConfigError, LowpassFilter, OscillatorState, Sample};
pub use stream::{run, StreamError, StreamSummary};
