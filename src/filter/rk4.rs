//! Fourth-order Runge-Kutta step
//!
//! Integrates
//!
//! ```text
//!   y0' = y1
//!   y1' = x(t) - y0 / f2inv - (y1 / rq) * rp
//! ```
//!
//! over one unit of time in integer arithmetic. Every division truncates
//! toward zero and every operation wraps on overflow, so the output is
//! reproducible bit for bit.

use super::{OscillatorState, Sample};

/// Slope estimate of one stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slope {
    /// Derivative of position
    position: Sample,

    /// Derivative of velocity
    velocity: Sample,
}

/// Driving force halfway through the interval
///
/// Both endpoints are halved separately, so `midpoint(3, 5)` is 3 rather
/// than 4.
#[inline]
pub fn midpoint(x: Sample, x_next: Sample) -> Sample {
    (x / 2).wrapping_add(x_next / 2)
}

/// Weighted RK4 combination `(a + 2b + 2c + d) / 6`
#[inline]
fn combine(a: Sample, b: Sample, c: Sample, d: Sample) -> Sample {
    a.wrapping_add(b.wrapping_mul(2))
        .wrapping_add(c.wrapping_mul(2))
        .wrapping_add(d)
        / 6
}

/// Advance `state` by one step and return the new position
///
/// `x` and `x_next` are the driving force at the start and end of the step.
pub fn step(state: &mut OscillatorState, x: Sample, x_next: Sample) -> Sample {
    let y0 = state.position;
    let y1 = state.velocity;
    let xi = midpoint(x, x_next);

    let k1 = Slope {
        position: y1,
        velocity: state.acceleration(x, y0, y1),
    };

    let k2 = Slope {
        position: y1.wrapping_add(k1.velocity / 2),
        velocity: state.acceleration(
            xi,
            y0.wrapping_add(k1.position / 2),
            y1.wrapping_add(k1.velocity / 2),
        ),
    };

    let k3 = Slope {
        position: y1.wrapping_add(k2.velocity / 2),
        velocity: state.acceleration(
            xi,
            y0.wrapping_add(k2.position / 2),
            y1.wrapping_add(k2.velocity / 2),
        ),
    };

    let k4 = Slope {
        position: y1.wrapping_add(k3.velocity),
        velocity: state.acceleration(
            x_next,
            y0.wrapping_add(k3.position),
            y1.wrapping_add(k3.velocity),
        ),
    };

    state.position = y0.wrapping_add(combine(k1.position, k2.position, k3.position, k4.position));
    state.velocity = y1.wrapping_add(combine(k1.velocity, k2.velocity, k3.velocity, k4.velocity));

    state.position
}
