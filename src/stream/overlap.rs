//! One-sample overlap between blocks
//!
//! Each step consumes an adjacent input pair. The last sample of a block is
//! kept and paired with the first sample of the next block, so the pairs
//! seen across any block split are exactly the pairs of the whole stream.

use crate::filter::Sample;

/// Carry slot holding the trailing sample of the previous block
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    /// Trailing sample of the last non-empty block, absent before the first
    carried: Option<Sample>,
}

impl Overlap {
    /// Create a new, empty overlap
    pub fn new() -> Self {
        Overlap { carried: None }
    }

    /// Sample that will lead the next pair, if any
    pub fn carried(&self) -> Option<Sample> {
        self.carried
    }

    /// Call `f` on every adjacent pair of the carried sample followed by
    /// `block`, in order, then carry the block's last sample
    ///
    /// Returns the number of pairs visited. An empty block leaves the carry
    /// untouched.
    pub fn pairs<F>(&mut self, block: &[Sample], mut f: F) -> usize
    where
        F: FnMut(Sample, Sample),
    {
        let mut prev = self.carried;
        let mut count = 0;

        for &x in block {
            if let Some(p) = prev {
                f(p, x);
                count += 1;
            }
            prev = Some(x);
        }

        self.carried = prev;
        count
    }
}
