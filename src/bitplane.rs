//! Bit-plane storage for Tsetlin Automata states.
//!
//! This module provides [`BitPlaneBank`], a transposed bit-level representation
//! of automata states so that one word operation touches [`WORD_BITS`]
//! automata at once.
//!
//! # Memory Layout
//!
//! Each state of `B` bits is split across `B` planes. Plane `b`, word `k` of
//! clause `c` holds bit `b` of the state of every literal `k * WORD_BITS + p`:
//!
//! ```text
//! plane[0]:     [s0_b0, s1_b0, s2_b0, ...]  // LSB of all states
//! plane[1]:     [s0_b1, s1_b1, s2_b1, ...]
//! ...
//! plane[B - 1]: [s0_bB, s1_bB, s2_bB, ...]  // MSB = action bit
//! ```
//!
//! All planes live in one flat arena. The `B` planes of a word are adjacent so
//! a ripple-carry update walks contiguous memory:
//!
//! ```text
//! offset(clause, word, plane) = (clause * words_per_clause + word) * B + plane
//! ```
//!
//! The MSB plane directly encodes the automaton action:
//! - MSB = 1: Include
//! - MSB = 0: Exclude

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::{
    config::{MAX_STATE_BITS, MIN_STATE_BITS},
    literals::{WORD_BITS, Word}
};

/// Bit-plane storage for automata states.
///
/// Stores `n_clauses × n_literals` automata in transposed bit-plane format.
///
/// # Example
///
/// ```
/// use bitplane_tsetlin::BitPlaneBank;
///
/// // 10 clauses, 64 literals, 8-bit states
/// let bank = BitPlaneBank::new(10, 64, 8);
///
/// assert_eq!(bank.n_clauses(), 10);
/// assert_eq!(bank.get_state(0, 0), 127);
/// assert!(!bank.action(0, 0));
/// ```
#[derive(Debug, Clone)]
pub struct BitPlaneBank {
    /// Flat arena of `n_clauses * words_per_clause * state_bits` words.
    planes: Vec<Word>,

    /// Number of clauses.
    n_clauses: usize,

    /// Literals per clause (2 * n_features).
    n_literals: usize,

    /// Words per clause per plane (ceil(n_literals / WORD_BITS)).
    words_per_clause: usize,

    /// Bits per automaton state.
    state_bits: usize
}

impl BitPlaneBank {
    /// Creates a bank with every automaton at `2^(B-1) - 1`.
    ///
    /// # Panics
    ///
    /// Panics if any dimension is zero or `state_bits` is outside
    /// `MIN_STATE_BITS..=MAX_STATE_BITS`. Callers validate through
    /// [`Config`](crate::Config) first.
    pub fn new(n_clauses: usize, n_literals: usize, state_bits: u32) -> Self {
        assert!(n_clauses > 0, "n_clauses must be positive");
        assert!(n_literals > 0, "n_literals must be positive");
        assert!(
            (MIN_STATE_BITS..=MAX_STATE_BITS).contains(&state_bits),
            "state_bits must be in {MIN_STATE_BITS}..={MAX_STATE_BITS}"
        );

        let state_bits = state_bits as usize;
        let words_per_clause = n_literals.div_ceil(WORD_BITS);

        let mut bank = Self {
            planes: vec![0; n_clauses * words_per_clause * state_bits],
            n_clauses,
            n_literals,
            words_per_clause,
            state_bits
        };
        bank.initialize();
        bank
    }

    /// Resets every automaton: low planes all ones, top plane all zeros.
    pub fn initialize(&mut self) {
        let top = self.state_bits - 1;
        for block in self.planes.chunks_exact_mut(self.state_bits) {
            block[..top].fill(Word::MAX);
            block[top] = 0;
        }
    }

    /// Returns number of clauses.
    #[inline]
    pub fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    /// Returns number of literals per clause.
    #[inline]
    pub fn n_literals(&self) -> usize {
        self.n_literals
    }

    /// Returns words per clause.
    #[inline]
    pub fn words_per_clause(&self) -> usize {
        self.words_per_clause
    }

    /// Returns bits per automaton state.
    #[inline]
    pub fn state_bits(&self) -> usize {
        self.state_bits
    }

    #[inline(always)]
    fn offset(&self, clause: usize, word: usize) -> usize {
        debug_assert!(clause < self.n_clauses && word < self.words_per_clause);
        (clause * self.words_per_clause + word) * self.state_bits
    }

    /// All planes of one word, LSB plane first.
    #[inline(always)]
    fn block(&self, clause: usize, word: usize) -> &[Word] {
        let start = self.offset(clause, word);
        &self.planes[start..start + self.state_bits]
    }

    #[inline(always)]
    fn block_mut(&mut self, clause: usize, word: usize) -> &mut [Word] {
        let start = self.offset(clause, word);
        let end = start + self.state_bits;
        &mut self.planes[start..end]
    }

    /// Include bits (MSB plane) of one word of a clause.
    #[inline(always)]
    pub fn include_word(&self, clause: usize, word: usize) -> Word {
        self.planes[self.offset(clause, word) + self.state_bits - 1]
    }

    /// Gets the state of a specific automaton.
    ///
    /// # Arguments
    ///
    /// * `clause` - Clause index
    /// * `literal` - Literal index within clause (0..2*n_features)
    pub fn get_state(&self, clause: usize, literal: usize) -> u32 {
        let bit_pos = literal % WORD_BITS;

        self.block(clause, literal / WORD_BITS)
            .iter()
            .enumerate()
            .fold(0u32, |state, (bit, &plane)| {
                state | (((plane >> bit_pos) & 1) << bit)
            })
    }

    /// Returns the action for an automaton (true = include, false = exclude).
    #[inline]
    pub fn action(&self, clause: usize, literal: usize) -> bool {
        (self.include_word(clause, literal / WORD_BITS) >> (literal % WORD_BITS)) & 1 == 1
    }

    /// Increments states at positions specified by mask.
    ///
    /// Uses ripple-carry addition to increment up to [`WORD_BITS`] states in
    /// parallel. A carry leaving the top plane saturates the affected
    /// automata at `2^B - 1` instead of wrapping.
    ///
    /// # Algorithm
    ///
    /// ```text
    /// carry = mask
    /// for each bit-plane, low to high, while carry != 0:
    ///     carry_out = plane & carry
    ///     plane ^= carry
    ///     carry = carry_out
    /// if carry != 0: every plane |= carry
    /// ```
    #[inline]
    pub fn increment_masked(&mut self, clause: usize, word: usize, mask: Word) {
        if mask == 0 {
            return;
        }

        let block = self.block_mut(clause, word);
        let mut carry = mask;
        for plane in block.iter_mut() {
            if carry == 0 {
                return;
            }
            let carry_out = *plane & carry;
            *plane ^= carry;
            carry = carry_out;
        }

        if carry != 0 {
            for plane in block.iter_mut() {
                *plane |= carry;
            }
        }
    }

    /// Decrements states at positions specified by mask.
    ///
    /// Ripple-borrow counterpart of [`increment_masked`](Self::increment_masked);
    /// a borrow leaving the top plane saturates the affected automata at 0.
    #[inline]
    pub fn decrement_masked(&mut self, clause: usize, word: usize, mask: Word) {
        if mask == 0 {
            return;
        }

        let block = self.block_mut(clause, word);
        let mut borrow = mask;
        for plane in block.iter_mut() {
            if borrow == 0 {
                return;
            }
            let borrow_out = !*plane & borrow;
            *plane ^= borrow;
            borrow = borrow_out;
        }

        if borrow != 0 {
            for plane in block.iter_mut() {
                *plane &= !borrow;
            }
        }
    }

    /// Increments a single automaton state.
    #[inline]
    pub fn increment(&mut self, clause: usize, literal: usize) {
        self.increment_masked(clause, literal / WORD_BITS, 1 << (literal % WORD_BITS));
    }

    /// Decrements a single automaton state.
    #[inline]
    pub fn decrement(&mut self, clause: usize, literal: usize) {
        self.decrement_masked(clause, literal / WORD_BITS, 1 << (literal % WORD_BITS));
    }
}
