//! Type I and Type II feedback on a [`BitPlaneBank`].
//!
//! | Type | Applied to | Effect |
//! |------|------------|--------|
//! | Type I | clauses whose polarity agrees with the target | reinforce matched literals, forget the rest |
//! | Type II | clauses whose polarity opposes the target | pull blocking literals toward Include |
//!
//! Every update touches whole words: the literal masks below are combined
//! with the input and handed to the ripple-carry counters.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use rand::Rng;

use crate::{
    bitplane::BitPlaneBank,
    clause::polarity,
    literals::{WORD_BITS, Word, remainder_mask}
};

/// Which feedback a selected clause receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    TypeI,
    TypeII
}

/// # Overview
///
/// Feedback type for `clause` under `target`: Type I when
/// `(2t - 1) * polarity == 1`, Type II when it is `-1`.
#[inline]
#[must_use]
pub fn feedback_kind(clause: usize, target: bool) -> FeedbackKind {
    let sign = if target { 1 } else { -1 };
    if sign * polarity(clause) == 1 {
        FeedbackKind::TypeI
    } else {
        FeedbackKind::TypeII
    }
}

/// # Overview
///
/// Probability that a clause is selected for feedback:
/// `(T + (1 - 2t) * votes) / 2T`.
///
/// With `votes` already clipped to `[-T, T]` the result lies in `[0, 1]`.
#[inline]
#[must_use]
pub fn feedback_probability(threshold: i32, votes: i32, target: bool) -> f32 {
    let t = threshold as f32;
    let signed = if target { -votes } else { votes };
    (t + signed as f32) / (2.0 * t)
}

/// # Overview
///
/// Draws one Bernoulli trial per clause and packs the winners into `selected`.
pub fn select_clauses<R: Rng>(n_clauses: usize, probability: f32, rng: &mut R, selected: &mut [Word]) {
    selected.fill(0);
    for clause in 0..n_clauses {
        if rng.random::<f32>() <= probability {
            selected[clause / WORD_BITS] |= 1 << (clause % WORD_BITS);
        }
    }
}

/// # Overview
///
/// Random literal mask used by Type I feedback.
///
/// Each draw marks exactly `active` distinct literals out of `n_literals`,
/// sampling uniformly and redrawing on duplicates.
#[derive(Debug, Clone)]
pub struct FeedbackStream {
    mask:       Vec<Word>,
    n_literals: usize,
    active:     usize
}

impl FeedbackStream {
    /// Creates an empty stream. `active` is capped at `n_literals`.
    #[must_use]
    pub fn new(n_literals: usize, active: usize) -> Self {
        Self {
            mask: vec![0; n_literals.div_ceil(WORD_BITS)],
            n_literals,
            active: active.min(n_literals)
        }
    }

    /// Literals marked per draw.
    #[inline]
    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Current mask words.
    #[inline]
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.mask
    }

    /// Clears the mask and marks a fresh set of literals.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) {
        self.mask.fill(0);
        for _ in 0..self.active {
            loop {
                let literal = rng.random_range(0..self.n_literals);
                let word = &mut self.mask[literal / WORD_BITS];
                let bit = 1 << (literal % WORD_BITS);
                if *word & bit == 0 {
                    *word |= bit;
                    break;
                }
            }
        }
    }
}

/// # Overview
///
/// Type I feedback for one clause.
///
/// - Clause fired: increment literals with input 1 outside the stream,
///   decrement literals with input 0 inside the stream.
/// - Clause silent: decrement every literal in the stream, whatever its input.
pub fn type_i(bank: &mut BitPlaneBank, clause: usize, x: &[Word], fires: bool, stream: &[Word]) {
    if fires {
        for (k, (&xk, &fk)) in x.iter().zip(stream).enumerate() {
            bank.increment_masked(clause, k, xk & !fk);
            bank.decrement_masked(clause, k, !xk & fk);
        }
    } else {
        for (k, &fk) in stream.iter().enumerate() {
            bank.decrement_masked(clause, k, fk);
        }
    }
}

/// # Overview
///
/// Type II feedback for one clause: when it fired, every Excluded literal
/// with input 0 is incremented. Silent clauses are left alone.
pub fn type_ii(bank: &mut BitPlaneBank, clause: usize, x: &[Word], fires: bool) {
    if !fires {
        return;
    }

    let last = bank.words_per_clause() - 1;
    let filter = remainder_mask(bank.n_literals());
    for (k, &xk) in x.iter().enumerate() {
        let mut active = !xk & !bank.include_word(clause, k);
        if k == last {
            active &= filter;
        }
        bank.increment_masked(clause, k, active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{literals::pack_features, utils::rng_from_seed};

    #[test]
    fn kind_from_target_and_polarity() {
        assert_eq!(feedback_kind(0, true), FeedbackKind::TypeI);
        assert_eq!(feedback_kind(1, true), FeedbackKind::TypeII);
        assert_eq!(feedback_kind(0, false), FeedbackKind::TypeII);
        assert_eq!(feedback_kind(1, false), FeedbackKind::TypeI);
    }

    #[test]
    fn probability_range() {
        assert!((feedback_probability(10, 0, true) - 0.5).abs() < 1e-6);
        assert!((feedback_probability(10, 10, true) - 0.0).abs() < 1e-6);
        assert!((feedback_probability(10, -10, true) - 1.0).abs() < 1e-6);
        assert!((feedback_probability(10, 10, false) - 1.0).abs() < 1e-6);
        assert!((feedback_probability(10, -10, false) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn stream_marks_exact_count() {
        let mut rng = rng_from_seed(42);
        let mut stream = FeedbackStream::new(100, 26);

        for _ in 0..20 {
            stream.draw(&mut rng);
            let ones: u32 = stream.words().iter().map(|w| w.count_ones()).sum();
            assert_eq!(ones, 26);
            // 100 literals: the last word only has 4 valid bits
            assert_eq!(stream.words()[3] & !0b1111, 0);
        }
    }

    #[test]
    fn stream_can_cover_everything() {
        let mut rng = rng_from_seed(7);
        let mut stream = FeedbackStream::new(6, 10);

        assert_eq!(stream.active(), 6);
        stream.draw(&mut rng);
        assert_eq!(stream.words(), [0b11_1111u32].as_slice());
    }

    #[test]
    fn select_clauses_extremes() {
        let mut rng = rng_from_seed(1);
        let mut selected = vec![0; 2];

        select_clauses(40, 1.0, &mut rng, &mut selected);
        assert_eq!(selected, vec![Word::MAX, 0xFF]);

        select_clauses(40, -0.1, &mut rng, &mut selected);
        assert_eq!(selected, vec![0, 0]);
    }

    #[test]
    fn type_i_firing_reinforces_and_forgets() {
        let mut bank = BitPlaneBank::new(1, 4, 8);
        let x = pack_features(&[1, 0]); // literals 0 and 3 are true
        let stream = [0b0110];

        type_i(&mut bank, 0, &x, true, &stream);

        assert_eq!(bank.get_state(0, 0), 128); // true, outside stream
        assert_eq!(bank.get_state(0, 1), 126); // false, inside stream
        assert_eq!(bank.get_state(0, 2), 126); // false, inside stream
        assert_eq!(bank.get_state(0, 3), 128); // true, outside stream
    }

    #[test]
    fn type_i_true_literal_in_stream_untouched() {
        let mut bank = BitPlaneBank::new(1, 4, 8);
        let x = pack_features(&[1, 0]);

        type_i(&mut bank, 0, &x, true, &[0b0001]);

        assert_eq!(bank.get_state(0, 0), 127);
        assert_eq!(bank.get_state(0, 3), 128);
    }

    #[test]
    fn type_i_silent_decrements_stream() {
        let mut bank = BitPlaneBank::new(1, 4, 8);
        let x = pack_features(&[1, 0]);

        type_i(&mut bank, 0, &x, false, &[0b1001]);

        assert_eq!(bank.get_state(0, 0), 126);
        assert_eq!(bank.get_state(0, 1), 127);
        assert_eq!(bank.get_state(0, 2), 127);
        assert_eq!(bank.get_state(0, 3), 126);
    }

    #[test]
    fn type_ii_blocks_zero_literals() {
        let mut bank = BitPlaneBank::new(1, 4, 8);
        let x = pack_features(&[1, 0]); // literals 1 and 2 are false

        type_ii(&mut bank, 0, &x, true);

        assert!(bank.action(0, 1));
        assert!(bank.action(0, 2));
        assert!(!bank.action(0, 0));
        assert!(!bank.action(0, 3));
        // padding beyond the 4 literals stays put
        assert_eq!(bank.get_state(0, 4), 127);
    }

    #[test]
    fn type_ii_skips_included_and_silent() {
        let mut bank = BitPlaneBank::new(1, 4, 8);
        let x = pack_features(&[1, 0]);

        type_ii(&mut bank, 0, &x, true);
        type_ii(&mut bank, 0, &x, true);
        // already Included: no further increment
        assert_eq!(bank.get_state(0, 1), 128);

        type_ii(&mut bank, 0, &x, false);
        assert_eq!(bank.get_state(0, 2), 128);
    }
}
