//! Scaled multiply/divide helpers
//!
//! Products are computed in full when they fit and fall back to dividing
//! first when they would overflow, trading precision for range.

use crate::filter::Sample;

/// `a * b / c`, or `(a / c) * b` saturating when the product overflows
#[inline]
pub fn mult_div(a: Sample, b: Sample, c: Sample) -> Sample {
    match a.checked_mul(b) {
        Some(ab) => ab / c,
        None => (a / c).saturating_mul(b),
    }
}

/// `a * b / c²`, or `(a / c) * (b / c)` when the product overflows
#[inline]
pub fn mult_div2(a: Sample, b: Sample, c: Sample) -> Sample {
    match a.checked_mul(b) {
        Some(ab) => ab / c.wrapping_mul(c),
        None => (a / c).wrapping_mul(b / c),
    }
}

/// `(a + b) / c`, or `a / c + b / c` saturating when the sum overflows
#[inline]
pub fn add_div(a: Sample, b: Sample, c: Sample) -> Sample {
    match a.checked_add(b) {
        Some(ab) => ab / c,
        None => (a / c).saturating_add(b / c),
    }
}
