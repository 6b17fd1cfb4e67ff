//! Batch evaluation helpers: scoring many already-filled 7-card hands with
//! no per-iteration RNG or seeding concerns, so (unlike `pool`) these are
//! free to hand off to `rayon` when the `parallel` feature is enabled.
//!
//! Generation (building `Hand`s) stays separate from evaluation (scoring a
//! `&[Hand]` slice), and the sequential and parallel variants share the same
//! wrapping-sum reduction so a benchmark can't have the evaluations
//! optimized away.

use crate::hand::Hand;

/// Evaluate every hand in `hands` and return a wrapping sum of their scores.
#[inline]
pub fn eval_sum(hands: &[Hand]) -> u64 {
    let mut acc = 0u64;
    for h in hands {
        let mut h = *h;
        h.finalize();
        acc = acc.wrapping_add(h.score);
    }
    acc
}

/// Evaluate every hand in `hands`, writing each score into `out`, and return
/// the wrapping sum.
#[inline]
pub fn eval_sum_in_place(hands: &[Hand], out: &mut [u64]) -> u64 {
    assert_eq!(hands.len(), out.len());
    let mut acc = 0u64;
    for (i, h) in hands.iter().enumerate() {
        let mut h = *h;
        h.finalize();
        out[i] = h.score;
        acc = acc.wrapping_add(h.score);
    }
    acc
}

#[cfg(feature = "parallel")]
mod par {
    use super::*;
    use rayon::prelude::*;

    /// Parallel variant of [`eval_sum`]. Worthwhile once `hands` is large
    /// (overhead dominates for small slices).
    pub fn eval_sum_par(hands: &[Hand]) -> u64 {
        hands
            .par_iter()
            .map(|h| {
                let mut h = *h;
                h.finalize();
                h.score
            })
            .reduce(|| 0u64, |a, b| a.wrapping_add(b))
    }

    pub fn eval_sum_in_place_par(hands: &[Hand], out: &mut [u64]) -> u64 {
        assert_eq!(hands.len(), out.len());
        out.par_iter_mut().zip(hands.par_iter()).for_each(|(dst, h)| {
            let mut h = *h;
            h.finalize();
            *dst = h.score;
        });
        out.par_iter().copied().reduce(|| 0u64, |a, b| a.wrapping_add(b))
    }
}

#[cfg(feature = "parallel")]
pub use par::{eval_sum_in_place_par, eval_sum_par};
