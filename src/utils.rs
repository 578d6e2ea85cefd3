//! Random number generation helpers.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Fast RNG suitable for no_std environments.
pub type FastRng = Xoshiro256PlusPlus;

/// # Overview
///
/// Creates a fast RNG seeded from a u64 value.
///
/// # Examples
///
/// ```
/// use bitplane_tsetlin::utils::rng_from_seed;
///
/// let mut rng = rng_from_seed(42);
/// ```
#[inline]
pub fn rng_from_seed(seed: u64) -> FastRng {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

/// # Overview
///
/// Creates a fast RNG with entropy from thread-local RNG.
#[cfg(feature = "std")]
#[inline]
pub fn rng_from_entropy() -> FastRng {
    Xoshiro256PlusPlus::from_rng(&mut rand::rng())
}

/// # Overview
///
/// Shuffles a slice in-place using Fisher-Yates algorithm.
#[inline]
pub fn shuffle<T, R: Rng>(slice: &mut [T], rng: &mut R) {
    let len = slice.len();
    for i in (1..len).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

/// Picks a class uniformly from `0..n_classes`, skipping `excluded`.
///
/// Requires `n_classes >= 2` and `excluded < n_classes`.
#[inline]
pub fn sample_other<R: Rng>(n_classes: usize, excluded: usize, rng: &mut R) -> usize {
    debug_assert!(n_classes >= 2 && excluded < n_classes);
    let other = rng.random_range(0..n_classes - 1);
    if other >= excluded { other + 1 } else { other }
}
