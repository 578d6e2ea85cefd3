//! Clause evaluation over a [`BitPlaneBank`].
//!
//! A clause is the conjunction of its Included literals. Outputs for all
//! clauses are packed one bit per clause, [`WORD_BITS`] clauses per word.

use crate::{
    bitplane::BitPlaneBank,
    literals::{WORD_BITS, Word, remainder_mask}
};

/// # Overview
///
/// How clauses without any Included literal are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalMode {
    /// Empty clauses fire (vacuous truth), so they still receive feedback.
    Training,
    /// Empty clauses are forced to 0 and cannot vote.
    Predict
}

/// # Overview
///
/// Vote polarity of a clause: `+1` for even indices, `-1` for odd.
#[inline(always)]
#[must_use]
pub const fn polarity(clause: usize) -> i32 {
    1 - 2 * (clause & 1) as i32
}

/// # Overview
///
/// Evaluates one clause on a packed literal vector.
///
/// `input` must hold exactly `bank.words_per_clause()` words; the caller
/// checks the length.
#[inline]
#[must_use]
pub fn clause_fires(bank: &BitPlaneBank, clause: usize, input: &[Word], mode: EvalMode) -> bool {
    debug_assert_eq!(input.len(), bank.words_per_clause());

    let last = bank.words_per_clause() - 1;
    let mut any_include = false;

    for (k, &x) in input.iter().enumerate().take(last) {
        let include = bank.include_word(clause, k);
        if include & x != include {
            return false;
        }
        any_include |= include != 0;
    }

    let filter = remainder_mask(bank.n_literals());
    let include = bank.include_word(clause, last) & filter;
    if include & input[last] != include {
        return false;
    }
    any_include |= include != 0;

    mode == EvalMode::Training || any_include
}

/// # Overview
///
/// Recomputes every clause output from scratch into `output`.
///
/// `output` must hold `ceil(n_clauses / WORD_BITS)` words.
pub fn evaluate_clauses(bank: &BitPlaneBank, input: &[Word], mode: EvalMode, output: &mut [Word]) {
    debug_assert_eq!(output.len(), bank.n_clauses().div_ceil(WORD_BITS));

    output.fill(0);
    for clause in 0..bank.n_clauses() {
        if clause_fires(bank, clause, input, mode) {
            output[clause / WORD_BITS] |= 1 << (clause % WORD_BITS);
        }
    }
}

/// Returns the packed output bit of `clause`.
#[inline(always)]
#[must_use]
pub fn output_bit(output: &[Word], clause: usize) -> bool {
    (output[clause / WORD_BITS] >> (clause % WORD_BITS)) & 1 == 1
}
