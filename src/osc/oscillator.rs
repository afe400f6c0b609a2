//! Sine oscillator
//!
//! A damped harmonic oscillator parameterized by angular frequency `omega`
//! (Q16 radians per step) and damping `zeta`, integrated with fixed-point
//! RK4:
//!
//! ```text
//!   y0' = y1
//!   y1' = x - omega*zeta*y1 - omega^2*y0
//! ```

use super::fixed::{add_div, mult_div, mult_div2};
use super::Generator;
use crate::filter::Sample;

/// Oscillator position and velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Phase {
    /// Position, the generated waveform
    pub y0: Sample,

    /// Velocity
    pub y1: Sample,
}

/// Oscillator parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Oscillator {
    /// Damping
    pub zeta: Sample,

    /// Angular frequency
    pub omega: Sample,
}

impl Oscillator {
    /// Create an undamped oscillator
    pub fn from_omega(omega: Sample) -> Self {
        Oscillator { omega, zeta: 0 }
    }

    /// Full-scale sine at zero phase
    pub fn initial_state(&self) -> Phase {
        Phase {
            y0: 0,
            y1: self.omega.wrapping_mul(32768),
        }
    }

    /// Advance `state` by one step with driving input `x0`
    pub fn step(&self, state: Phase, x0: Sample) -> Phase {
        let omega2 = mult_div2(self.omega, self.omega, 256);
        let omegazeta = mult_div2(self.omega, self.zeta, 256);
        let restore = |y: Sample| mult_div(y, omega2, 65536);
        let damp = |y: Sample| mult_div(y, omegazeta, 65536);

        let k1_0 = state.y1;
        let k1_1 = x0.wrapping_sub(damp(state.y1)).wrapping_sub(restore(state.y0));

        let k2_0 = k1_0.wrapping_add(k1_1 / 2);
        let k2_1 = x0
            .wrapping_sub(damp(state.y1.wrapping_add(k1_1 / 2)))
            .wrapping_sub(restore(state.y0))
            .wrapping_sub(restore(k1_0 / 2));

        let k3_0 = k1_0.wrapping_add(k2_1 / 2);
        let k3_1 = x0
            .wrapping_sub(damp(state.y1.wrapping_add(k2_1 / 2)))
            .wrapping_sub(restore(state.y0))
            .wrapping_sub(restore(k2_0 / 2));

        let k4_0 = k1_0.wrapping_add(k3_1);
        let k4_1 = x0
            .wrapping_sub(damp(state.y1.wrapping_add(k3_1)))
            .wrapping_sub(restore(state.y0))
            .wrapping_sub(restore(k3_0));

        Phase {
            y0: state
                .y0
                .saturating_add(add_div(k1_0, k4_0, 3))
                .saturating_add(add_div(k2_0, k3_0, 6)),
            y1: state
                .y1
                .wrapping_add(add_div(k1_1, k4_1, 3))
                .wrapping_add(add_div(k2_1, k3_1, 6)),
        }
    }

    /// Step once per input, returning every resulting state
    pub fn run(&self, mut state: Phase, inputs: &[Sample]) -> Vec<Phase> {
        let mut states = Vec::with_capacity(inputs.len());
        for &x0 in inputs {
            state = self.step(state, x0);
            states.push(state);
        }
        states
    }
}

impl Generator for Oscillator {
    type State = Phase;

    fn initial_state(&self) -> Phase {
        Oscillator::initial_state(self)
    }

    fn step(&self, state: Phase, x0: Sample) -> Phase {
        Oscillator::step(self, state, x0)
    }

    fn output(state: &Phase) -> Sample {
        state.y0
    }
}
