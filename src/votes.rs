//! Vote aggregation over packed clause outputs.

use crate::literals::Word;

/// Bits at even clause positions (positive polarity).
const EVEN_BITS_MASK: Word = 0x5555_5555;

/// Bits at odd clause positions (negative polarity).
const ODD_BITS_MASK: Word = 0xAAAA_AAAA;

/// # Overview
///
/// Sums clause votes and clips the total to `[-threshold, threshold]`.
///
/// Even clauses add one vote when they fire, odd clauses subtract one. The
/// word width is even, so parity within a word equals parity of the clause
/// index.
///
/// # Examples
///
/// ```
/// use bitplane_tsetlin::sum_votes;
///
/// // clauses 0, 1, 2 fire: +1 -1 +1
/// assert_eq!(sum_votes(&[0b111], 15), 1);
/// assert_eq!(sum_votes(&[0x5555_5555, 0x5555_5555], 15), 15);
/// ```
#[inline]
#[must_use]
pub fn sum_votes(output: &[Word], threshold: i32) -> i32 {
    let sum: i32 = output
        .iter()
        .map(|&w| (w & EVEN_BITS_MASK).count_ones() as i32 - (w & ODD_BITS_MASK).count_ones() as i32)
        .sum();
    sum.clamp(-threshold, threshold)
}
