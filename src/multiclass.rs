//! Multi-class coordinator with stochastic one-vs-rest training.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use tracing::{debug, info};

use crate::{
    Config, TsetlinMachine,
    error::{Error, Result},
    literals::Word,
    training::{EarlyStopTracker, FitOptions, FitResult},
    utils::{FastRng, rng_from_seed, sample_other, shuffle}
};

/// # Overview
///
/// One [`TsetlinMachine`] per class plus the seeded RNG that drives all of
/// their training.
///
/// Each training step reinforces the true class positively and exactly one
/// uniformly drawn competitor negatively.
///
/// # Examples
///
/// ```
/// use bitplane_tsetlin::{Config, MultiClass, pack_features};
///
/// let config = Config::builder().clauses(20).features(4).threshold(10).build().unwrap();
/// let mut tm = MultiClass::new(config, 3, 42).unwrap();
///
/// let x = vec![
///     pack_features(&[1, 1, 0, 0]),
///     pack_features(&[0, 0, 1, 1]),
///     pack_features(&[1, 0, 1, 0]),
/// ];
/// let y = vec![0, 1, 2];
///
/// tm.fit(&x, &y, 50).unwrap();
/// assert!(tm.predict(&x[0]).unwrap() < 3);
/// ```
#[derive(Debug, Clone)]
pub struct MultiClass {
    machines: Vec<TsetlinMachine>,
    rng:      FastRng
}

impl MultiClass {
    /// # Overview
    ///
    /// Creates `n_classes` independent machines sharing `config`.
    ///
    /// # Errors
    ///
    /// [`Error::TooFewClasses`] for fewer than two classes, or the
    /// validation error of `config`.
    pub fn new(config: Config, n_classes: usize, seed: u64) -> Result<Self> {
        if n_classes < 2 {
            return Err(Error::TooFewClasses {
                got: n_classes
            });
        }

        let machines = (0..n_classes)
            .map(|_| TsetlinMachine::new(config))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            n_classes,
            n_clauses = config.n_clauses,
            n_features = config.n_features,
            threshold = config.threshold,
            state_bits = config.state_bits,
            "created multi-class machine"
        );

        Ok(Self {
            machines,
            rng: rng_from_seed(seed)
        })
    }

    #[inline]
    pub fn n_classes(&self) -> usize {
        self.machines.len()
    }

    /// Machine for `class`, if it exists.
    #[inline]
    pub fn machine(&self, class: usize) -> Option<&TsetlinMachine> {
        self.machines.get(class)
    }

    /// Restarts the RNG stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = rng_from_seed(seed);
    }

    fn check_class(&self, class: usize) -> Result<()> {
        if class >= self.n_classes() {
            return Err(Error::ClassOutOfRange {
                class,
                n_classes: self.n_classes()
            });
        }
        Ok(())
    }

    pub(crate) fn check_dataset(&self, x: &[Vec<Word>], y: &[usize]) -> Result<()> {
        if x.is_empty() {
            return Err(Error::EmptyDataset);
        }
        if x.len() != y.len() {
            return Err(Error::DimensionMismatch {
                expected: x.len(),
                got:      y.len()
            });
        }
        y.iter().try_for_each(|&c| self.check_class(c))
    }

    /// # Overview
    ///
    /// One training step: `update(x, 1)` on `class`, then `update(x, 0)` on a
    /// uniformly drawn other class.
    pub fn train(&mut self, x: &[Word], class: usize) -> Result<()> {
        self.check_class(class)?;

        self.machines[class].update(x, true, &mut self.rng)?;

        let negative = sample_other(self.n_classes(), class, &mut self.rng);
        self.machines[negative].update(x, false, &mut self.rng)
    }

    /// # Overview
    ///
    /// Clipped vote sums per class.
    pub fn scores(&self, x: &[Word]) -> Result<Vec<i32>> {
        self.machines.iter().map(|m| m.score(x)).collect()
    }

    /// # Overview
    ///
    /// Class with the highest score. Ties go to the lowest class index.
    pub fn predict(&self, x: &[Word]) -> Result<usize> {
        let mut best_class = 0;
        let mut best_score = self.machines[0].score(x)?;

        for (class, machine) in self.machines.iter().enumerate().skip(1) {
            let score = machine.score(x)?;
            if score > best_score {
                best_score = score;
                best_class = class;
            }
        }

        Ok(best_class)
    }

    /// # Overview
    ///
    /// Batch prediction for multiple samples.
    pub fn predict_batch(&self, xs: &[Vec<Word>]) -> Result<Vec<usize>> {
        xs.iter().map(|x| self.predict(x)).collect()
    }

    /// # Overview
    ///
    /// Accuracy `1 - errors / total`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyDataset`] for an empty dataset,
    /// [`Error::DimensionMismatch`] when `x` and `y` differ in length,
    /// [`Error::ClassOutOfRange`] for a label outside `0..n_classes`.
    pub fn evaluate(&self, x: &[Vec<Word>], y: &[usize]) -> Result<f32> {
        self.check_dataset(x, y)?;

        let mut errors = 0usize;
        for (xi, &yi) in x.iter().zip(y) {
            if self.predict(xi)? != yi {
                errors += 1;
            }
        }
        Ok(1.0 - errors as f32 / x.len() as f32)
    }

    /// # Overview
    ///
    /// Runs [`train`](Self::train) over every example in the given order,
    /// `epochs` times. No reshuffling between epochs.
    pub fn fit(&mut self, x: &[Vec<Word>], y: &[usize], epochs: usize) -> Result<()> {
        self.check_dataset(x, y)?;

        for epoch in 0..epochs {
            for (xi, &yi) in x.iter().zip(y) {
                self.train(xi, yi)?;
            }
            debug!(epoch = epoch + 1, "epoch finished");
        }

        Ok(())
    }

    /// # Overview
    ///
    /// Training with per-epoch accuracy, callbacks and early stopping.
    ///
    /// Accuracy is measured on `(x, y)` after each epoch.
    pub fn fit_with_options(
        &mut self,
        x: &[Vec<Word>],
        y: &[usize],
        mut opts: FitOptions
    ) -> Result<FitResult> {
        self.check_dataset(x, y)?;

        let mut indices: Vec<usize> = (0..x.len()).collect();
        let mut tracker = opts.early_stop.as_ref().map(EarlyStopTracker::new);
        let mut stopped = false;
        let mut epochs_run = 0;
        let mut history = Vec::with_capacity(opts.epochs);

        for epoch in 0..opts.epochs {
            if opts.shuffle {
                shuffle(&mut indices, &mut self.rng);
            }

            for &i in &indices {
                self.train(&x[i], y[i])?;
            }

            epochs_run = epoch + 1;
            let accuracy = self.evaluate(x, y)?;
            history.push(accuracy);
            debug!(epoch = epochs_run, accuracy, "epoch finished");

            if let Some(ref mut callback) = opts.callback
                && !callback(epochs_run, accuracy)
            {
                stopped = true;
                break;
            }

            if let Some(ref mut t) = tracker
                && t.update(accuracy)
            {
                stopped = true;
                break;
            }
        }

        let final_accuracy = match history.last() {
            Some(&accuracy) => accuracy,
            None => self.evaluate(x, y)?
        };
        info!(epochs_run, final_accuracy, stopped_early = stopped, "training finished");

        Ok(FitResult {
            epochs_run,
            final_accuracy,
            stopped_early: stopped,
            history
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literals::pack_features;

    fn config() -> Config {
        Config::builder()
            .clauses(4)
            .features(2)
            .threshold(15)
            .build()
            .unwrap()
    }

    #[test]
    fn rejects_single_class() {
        assert_eq!(
            MultiClass::new(config(), 1, 0).unwrap_err(),
            Error::TooFewClasses {
                got: 1
            }
        );
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let tm = MultiClass::new(config(), 4, 0).unwrap();
        let x = pack_features(&[1, 0]);

        assert_eq!(tm.scores(&x).unwrap(), vec![0, 0, 0, 0]);
        assert_eq!(tm.predict(&x).unwrap(), 0);
    }

    #[test]
    fn train_touches_target_and_one_other() {
        let config = Config::builder().clauses(32).features(2).build().unwrap();
        let mut tm = MultiClass::new(config, 3, 11).unwrap();
        let x = pack_features(&[1, 0]);

        tm.train(&x, 1).unwrap();

        let changed: Vec<bool> = (0..3)
            .map(|c| {
                let m = tm.machine(c).unwrap();
                (0..32).any(|clause| (0..4).any(|lit| m.state(clause, lit) != 127))
            })
            .collect();
        assert!(changed[1]);
        assert_eq!(changed.iter().filter(|&&c| c).count(), 2);
    }

    #[test]
    fn rejects_bad_class_and_length() {
        let mut tm = MultiClass::new(config(), 3, 0).unwrap();
        let x = pack_features(&[1, 0]);

        assert_eq!(
            tm.train(&x, 3).unwrap_err(),
            Error::ClassOutOfRange {
                class:     3,
                n_classes: 3
            }
        );
        assert!(tm.train(&[0, 0], 0).is_err());
        assert!(tm.predict(&[]).is_err());
    }

    #[test]
    fn evaluate_empty_fails() {
        let tm = MultiClass::new(config(), 2, 0).unwrap();
        assert_eq!(tm.evaluate(&[], &[]).unwrap_err(), Error::EmptyDataset);
    }

    #[test]
    fn evaluate_rejects_unknown_label() {
        let tm = MultiClass::new(config(), 2, 0).unwrap();
        let x = vec![pack_features(&[1, 0])];

        assert_eq!(
            tm.evaluate(&x, &[5]).unwrap_err(),
            Error::ClassOutOfRange {
                class:     5,
                n_classes: 2
            }
        );
    }

    #[test]
    fn fit_matches_sequential_training() {
        let x = vec![
            pack_features(&[1, 1, 0, 0]),
            pack_features(&[0, 0, 1, 1]),
            pack_features(&[1, 0, 1, 0]),
            pack_features(&[0, 1, 0, 1]),
        ];
        let y = vec![0, 1, 2, 1];
        let config = Config::builder().clauses(10).features(4).build().unwrap();

        let mut fitted = MultiClass::new(config, 3, 9).unwrap();
        fitted.fit(&x, &y, 5).unwrap();

        let mut stepped = MultiClass::new(config, 3, 9).unwrap();
        for _ in 0..5 {
            for (xi, &yi) in x.iter().zip(&y) {
                stepped.train(xi, yi).unwrap();
            }
        }

        for class in 0..3 {
            let (a, b) = (fitted.machine(class).unwrap(), stepped.machine(class).unwrap());
            for clause in 0..10 {
                for literal in 0..8 {
                    assert_eq!(a.state(clause, literal), b.state(clause, literal));
                }
            }
        }
    }

    #[test]
    fn evaluate_counts_errors() {
        let tm = MultiClass::new(config(), 2, 0).unwrap();
        let x = vec![pack_features(&[0, 0]), pack_features(&[1, 1])];

        // fresh machine predicts class 0 everywhere
        assert!((tm.evaluate(&x, &[0, 1]).unwrap() - 0.5).abs() < 1e-6);
        assert!((tm.evaluate(&x, &[0, 0]).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn fit_rejects_mismatched_labels() {
        let mut tm = MultiClass::new(config(), 2, 0).unwrap();
        let x = vec![pack_features(&[0, 0])];

        assert!(tm.fit(&x, &[0, 1], 1).is_err());
        assert!(tm.fit(&x, &[2], 1).is_err());
    }

    #[test]
    fn same_seed_same_model() {
        let x = vec![
            pack_features(&[1, 1, 0, 0]),
            pack_features(&[0, 0, 1, 1]),
            pack_features(&[1, 0, 1, 0]),
        ];
        let y = vec![0, 1, 2];
        let config = Config::builder().clauses(10).features(4).build().unwrap();

        let mut a = MultiClass::new(config, 3, 42).unwrap();
        let mut b = MultiClass::new(config, 3, 42).unwrap();
        a.fit(&x, &y, 20).unwrap();
        b.fit(&x, &y, 20).unwrap();

        for xi in &x {
            assert_eq!(a.scores(xi).unwrap(), b.scores(xi).unwrap());
        }
    }
}
