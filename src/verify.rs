//! Independent check of a run's total.

use rayon::prelude::*;

/// Expected total for `num_blocks` blocks: the sum of the covered prefix
/// `array[..num_blocks * (len / num_blocks)]`, computed with rayon.
///
/// Returns `None` when `num_blocks` is zero.
pub fn reference_sum(array: &[i32], num_blocks: usize) -> Option<i64> {
    if num_blocks == 0 {
        return None;
    }
    let covered = (array.len() / num_blocks) * num_blocks;
    Some(array[..covered].par_iter().map(|&x| i64::from(x)).sum())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Passed,
    Failed { expected: i64, actual: i64 },
}

impl Verification {
    pub fn check(array: &[i32], num_blocks: usize, actual: i64) -> Option<Self> {
        let expected = reference_sum(array, num_blocks)?;
        if expected == actual {
            Some(Verification::Passed)
        } else {
            Some(Verification::Failed { expected, actual })
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, Verification::Passed)
    }
}
