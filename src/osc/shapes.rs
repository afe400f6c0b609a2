//! Waveforms derived from the sine oscillator
//!
//! Each shape steps an inner [`Oscillator`] and reshapes its sign.

use super::{Generator, Oscillator, Phase};
use crate::filter::Sample;

/// Square wave following the sign of the sine
#[derive(Debug, Clone, Copy)]
pub struct Rectangle(pub Oscillator);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectangleState {
    pub y0: Sample,
    pub osc: Phase,
}

impl Rectangle {
    pub fn from_omega(omega: Sample) -> Self {
        Rectangle(Oscillator::from_omega(omega))
    }
}

impl Generator for Rectangle {
    type State = RectangleState;

    fn initial_state(&self) -> RectangleState {
        RectangleState {
            y0: 0,
            osc: self.0.initial_state(),
        }
    }

    fn step(&self, state: RectangleState, x0: Sample) -> RectangleState {
        let osc = self.0.step(state.osc, x0);
        RectangleState {
            y0: osc.y0.signum().wrapping_mul(Sample::MAX),
            osc,
        }
    }

    fn output(state: &RectangleState) -> Sample {
        state.y0
    }
}

/// Triangle wave: integral of the square wave
#[derive(Debug, Clone, Copy)]
pub struct Triangle(pub Oscillator);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleState {
    pub y0: Sample,
    pub osc: Phase,
}

impl Triangle {
    pub fn from_omega(omega: Sample) -> Self {
        Triangle(Oscillator::from_omega(omega))
    }

    /// Slope per step, scaled so the ramp spans the sine's range
    fn amplitude(&self) -> Sample {
        self.0.omega.wrapping_mul(10430)
    }
}

impl Generator for Triangle {
    type State = TriangleState;

    fn initial_state(&self) -> TriangleState {
        TriangleState {
            y0: 0,
            osc: self.0.initial_state(),
        }
    }

    fn step(&self, state: TriangleState, x0: Sample) -> TriangleState {
        let osc = self.0.step(state.osc, x0);
        TriangleState {
            y0: state
                .y0
                .saturating_add(osc.y0.signum().wrapping_mul(self.amplitude())),
            osc,
        }
    }

    fn output(state: &TriangleState) -> Sample {
        state.y0
    }
}

/// Sawtooth wave: triangle folded by the sign of the sine
#[derive(Debug, Clone, Copy)]
pub struct Sawtooth(pub Triangle);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SawtoothState {
    pub y0: Sample,
    pub triangle: TriangleState,
}

impl Sawtooth {
    pub fn from_omega(omega: Sample) -> Self {
        Sawtooth(Triangle::from_omega(omega))
    }
}

impl Generator for Sawtooth {
    type State = SawtoothState;

    fn initial_state(&self) -> SawtoothState {
        SawtoothState {
            y0: 0,
            triangle: self.0.initial_state(),
        }
    }

    fn step(&self, state: SawtoothState, x0: Sample) -> SawtoothState {
        let triangle = self.0.step(state.triangle, x0);
        SawtoothState {
            y0: triangle.y0.wrapping_mul(triangle.osc.y0.signum()),
            triangle,
        }
    }

    fn output(state: &SawtoothState) -> Sample {
        state.y0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outputs<G: Generator>(generator: &G, steps: usize) -> Vec<Sample> {
        let mut state = generator.initial_state();
        (0..steps)
            .map(|_| {
                state = generator.step(state, 0);
                G::output(&state)
            })
            .collect()
    }

    #[test]
    fn rectangle_is_full_scale() {
        let out = outputs(&Rectangle::from_omega(3000), 500);
        assert_eq!(out[0], Sample::MAX);
        assert!(out.iter().all(|&y| y == Sample::MAX || y == -Sample::MAX || y == 0));
        assert!(out.contains(&-Sample::MAX));
    }

    #[test]
    fn triangle_ramps_by_amplitude() {
        let out = outputs(&Triangle::from_omega(3000), 3);
        assert_eq!(out, vec![31_290_000, 62_580_000, 93_870_000]);
    }

    #[test]
    fn sawtooth_follows_triangle_while_positive() {
        let saw = outputs(&Sawtooth::from_omega(3000), 3);
        let tri = outputs(&Triangle::from_omega(3000), 3);
        assert_eq!(saw, tri);
    }

    #[test]
    fn shapes_share_the_sine_phase() {
        let osc = Oscillator::from_omega(2500);
        let sine = osc.run(osc.initial_state(), &[0; 20]);

        let rect = Rectangle(osc);
        let mut state = rect.initial_state();
        for expected in &sine {
            state = rect.step(state, 0);
            assert_eq!(state.osc, *expected);
        }
    }
}
