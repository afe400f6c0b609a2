//! Oscillator state
//!
//! The state vector carried from one step to the next: position and velocity
//! of the simulated mass, plus the parameters that stay fixed for the life
//! of the stream.

use std::fmt;
use thiserror::Error;

use super::Sample;

/// Default position
pub const DEFAULT_POSITION: Sample = 0;
/// Default velocity
pub const DEFAULT_VELOCITY: Sample = 0;
/// Default inverse of the squared natural frequency
pub const DEFAULT_INVERSE_FREQUENCY_SQUARED: Sample = 301;
/// Default damping numerator (no damping)
pub const DEFAULT_DAMPING_NUMERATOR: Sample = 0;
/// Default damping denominator
pub const DEFAULT_DAMPING_DENOMINATOR: Sample = 1;

/// Errors that make a parameter set unusable
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("inverse frequency squared must be non-zero")]
    ZeroInverseFrequencySquared,

    #[error("damping denominator must be non-zero")]
    ZeroDampingDenominator,
}

/// Persistent filter state
///
/// Only [`OscillatorState::initialize`] constructs one, and only the step
/// function mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OscillatorState {
    /// Simulated position, the filter output
    pub(super) position: Sample,

    /// Rate of change of position
    pub(super) velocity: Sample,

    /// Reciprocal of the squared natural frequency (restoring force divisor)
    inverse_frequency_squared: Sample,

    /// Damping ratio numerator
    damping_numerator: Sample,

    /// Damping ratio denominator
    damping_denominator: Sample,
}

impl OscillatorState {
    /// Create a state from initial position and velocity and the three
    /// filter parameters
    ///
    /// Every value is accepted except a zero divisor.
    pub fn initialize(
        position: Sample,
        velocity: Sample,
        inverse_frequency_squared: Sample,
        damping_numerator: Sample,
        damping_denominator: Sample,
    ) -> Result<Self, ConfigError> {
        if inverse_frequency_squared == 0 {
            return Err(ConfigError::ZeroInverseFrequencySquared);
        }
        if damping_denominator == 0 {
            return Err(ConfigError::ZeroDampingDenominator);
        }

        Ok(OscillatorState {
            position,
            velocity,
            inverse_frequency_squared,
            damping_numerator,
            damping_denominator,
        })
    }

    /// Current position
    #[inline]
    pub fn position(&self) -> Sample {
        self.position
    }

    /// Current velocity
    #[inline]
    pub fn velocity(&self) -> Sample {
        self.velocity
    }

    #[inline]
    pub fn inverse_frequency_squared(&self) -> Sample {
        self.inverse_frequency_squared
    }

    #[inline]
    pub fn damping_numerator(&self) -> Sample {
        self.damping_numerator
    }

    #[inline]
    pub fn damping_denominator(&self) -> Sample {
        self.damping_denominator
    }

    /// Velocity derivative at a perturbed point
    ///
    /// `force - position / f2inv - (velocity / rq) * rp`, dividing before
    /// multiplying in the damping term.
    #[inline]
    pub(super) fn acceleration(
        &self,
        force: Sample,
        position: Sample,
        velocity: Sample,
    ) -> Sample {
        let restoring = position.wrapping_div(self.inverse_frequency_squared);
        let damping = velocity
            .wrapping_div(self.damping_denominator)
            .wrapping_mul(self.damping_numerator);
        force.wrapping_sub(restoring).wrapping_sub(damping)
    }
}

impl Default for OscillatorState {
    fn default() -> Self {
        OscillatorState {
            position: DEFAULT_POSITION,
            velocity: DEFAULT_VELOCITY,
            inverse_frequency_squared: DEFAULT_INVERSE_FREQUENCY_SQUARED,
            damping_numerator: DEFAULT_DAMPING_NUMERATOR,
            damping_denominator: DEFAULT_DAMPING_DENOMINATOR,
        }
    }
}

impl fmt::Display for OscillatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "y0={} y1={} f2inv={} damping={}/{}",
            self.position,
            self.velocity,
            self.inverse_frequency_squared,
            self.damping_numerator,
            self.damping_denominator
        )
    }
}
