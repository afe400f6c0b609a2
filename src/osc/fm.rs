//! Frequency modulation
//!
//! A modulator oscillator bends the carrier's angular frequency on every
//! step by `modulator.y0 / 32768 * index / 65536`.

use super::fixed::mult_div;
use super::{Generator, Oscillator, Phase};
use crate::filter::Sample;

/// Two-operator FM voice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fm {
    /// Audible oscillator
    pub carrier: Oscillator,

    /// Oscillator driving the carrier's frequency
    pub modulator: Oscillator,

    /// Modulation depth
    pub index: Sample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmState {
    /// Carrier position
    pub y0: Sample,
    pub carrier: Phase,
    pub modulator: Phase,
}

impl Fm {
    /// Carrier parameters for the step following modulator state `modulator`
    fn bent_carrier(&self, modulator: &Phase) -> Oscillator {
        let deviation = mult_div(modulator.y0 / 32768, self.index, 65536);
        Oscillator {
            omega: self.carrier.omega.wrapping_add(deviation),
            zeta: self.carrier.zeta,
        }
    }
}

impl Generator for Fm {
    type State = FmState;

    fn initial_state(&self) -> FmState {
        FmState {
            y0: 0,
            carrier: self.carrier.initial_state(),
            modulator: self.modulator.initial_state(),
        }
    }

    fn step(&self, state: FmState, x0: Sample) -> FmState {
        let modulator = self.modulator.step(state.modulator, 0);
        let carrier = self.bent_carrier(&modulator).step(state.carrier, x0);
        FmState {
            y0: carrier.y0,
            carrier,
            modulator,
        }
    }

    fn output(state: &FmState) -> Sample {
        state.y0
    }
}
