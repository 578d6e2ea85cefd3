//! Packed literal vectors.
//!
//! An input of `F` raw features becomes `2F` literals: bit `i` holds feature
//! `i`, bit `F + i` holds its complement. Literal `i` lives in word
//! `i / WORD_BITS` at bit `i % WORD_BITS`.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Storage word for literals, clause outputs and bit-planes.
pub type Word = u32;

/// Bits per [`Word`].
pub const WORD_BITS: usize = Word::BITS as usize;

/// # Overview
///
/// Packs raw 0/1 features into a literal vector of `ceil(2F / WORD_BITS)`
/// words. Any non-zero byte counts as 1.
///
/// # Examples
///
/// ```
/// use bitplane_tsetlin::pack_features;
///
/// let packed = pack_features(&[1, 0]);
/// // x0 = 1 (bit 0), !x1 = 1 (bit 3)
/// assert_eq!(packed, vec![0b1001]);
/// ```
#[must_use]
pub fn pack_features(x: &[u8]) -> Vec<Word> {
    let n_features = x.len();
    let mut packed = vec![0; (2 * n_features).div_ceil(WORD_BITS)];

    for (k, &xk) in x.iter().enumerate() {
        let literal = if xk != 0 { k } else { k + n_features };
        packed[literal / WORD_BITS] |= 1 << (literal % WORD_BITS);
    }

    packed
}

/// # Overview
///
/// Packs multiple inputs.
#[inline]
#[must_use]
pub fn pack_batch(xs: &[Vec<u8>]) -> Vec<Vec<Word>> {
    xs.iter().map(|x| pack_features(x)).collect()
}

/// Returns literal `i` of a packed vector.
#[inline]
#[must_use]
pub fn literal_bit(words: &[Word], i: usize) -> bool {
    (words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
}

/// # Overview
///
/// Mask of the valid bits in the last word of a `n_literals`-wide vector.
///
/// All ones when `n_literals` is a multiple of [`WORD_BITS`].
#[inline]
#[must_use]
pub fn remainder_mask(n_literals: usize) -> Word {
    match n_literals % WORD_BITS {
        0 => Word::MAX,
        rem => (1 << rem) - 1
    }
}
