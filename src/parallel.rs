//! Parallel prediction and evaluation using rayon.
//!
//! Scoring never mutates a machine, so examples can be scored concurrently.
//! Training stays sequential: it shares one RNG stream.

use rayon::prelude::*;

use crate::{MultiClass, error::Result, literals::Word};

/// # Overview
///
/// Parallel prediction for multi-class.
pub fn predict_batch(tm: &MultiClass, x: &[Vec<Word>]) -> Result<Vec<usize>> {
    x.par_iter().map(|xi| tm.predict(xi)).collect()
}

/// # Overview
///
/// Parallel evaluation for multi-class. Same result as
/// [`MultiClass::evaluate`].
pub fn evaluate_parallel(tm: &MultiClass, x: &[Vec<Word>], y: &[usize]) -> Result<f32> {
    tm.check_dataset(x, y)?;

    let errors = x
        .par_iter()
        .zip(y.par_iter())
        .map(|(xi, &yi)| tm.predict(xi).map(|p| usize::from(p != yi)))
        .try_reduce(|| 0, |a, b| Ok(a + b))?;

    Ok(1.0 - errors as f32 / x.len() as f32)
}
