//! Training options, callbacks, and results.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

/// Progress callback type for training.
///
/// Called after each epoch with (epoch, accuracy).
/// Return `false` to stop training early.
pub type ProgressCallback = Box<dyn FnMut(usize, f32) -> bool + Send>;

/// Options for [`MultiClass::fit_with_options`](crate::MultiClass::fit_with_options).
///
/// Examples are visited in the order given unless `shuffle` is set.
pub struct FitOptions {
    pub epochs:     usize,
    pub shuffle:    bool,
    pub early_stop: Option<EarlyStop>,
    pub callback:   Option<ProgressCallback>
}

impl Default for FitOptions {
    fn default() -> Self {
        Self::new(100)
    }
}

impl core::fmt::Debug for FitOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FitOptions")
            .field("epochs", &self.epochs)
            .field("shuffle", &self.shuffle)
            .field("early_stop", &self.early_stop)
            .field("callback", &self.callback.as_ref().map(|_| "..."))
            .finish()
    }
}

impl FitOptions {
    /// Creates options for `epochs` passes in dataset order.
    #[must_use]
    pub fn new(epochs: usize) -> Self {
        Self {
            epochs,
            shuffle: false,
            early_stop: None,
            callback: None
        }
    }

    /// Enables early stopping with patience.
    ///
    /// Training stops if accuracy doesn't improve by `min_delta`
    /// for `patience` consecutive epochs.
    #[must_use]
    pub fn with_early_stop(mut self, patience: usize, min_delta: f32) -> Self {
        self.early_stop = Some(EarlyStop {
            patience,
            min_delta
        });
        self
    }

    /// Reshuffles the visiting order before every epoch.
    #[must_use]
    pub fn shuffled(mut self) -> Self {
        self.shuffle = true;
        self
    }

    /// Sets progress callback.
    ///
    /// The callback receives (epoch, accuracy) after each epoch.
    /// Return `false` to stop training early.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let opts = FitOptions::new(100).with_callback(|epoch, acc| {
    ///     println!("Epoch {}: {:.1}%", epoch, acc * 100.0);
    ///     true
    /// });
    /// ```
    #[must_use]
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize, f32) -> bool + Send + 'static
    {
        self.callback = Some(Box::new(callback));
        self
    }
}

/// Early stopping configuration.
#[derive(Debug, Clone, Copy)]
pub struct EarlyStop {
    /// Number of epochs without improvement before stopping.
    pub patience:  usize,
    /// Minimum improvement required to reset patience counter.
    pub min_delta: f32
}

/// Result of training.
#[derive(Debug, Clone)]
pub struct FitResult {
    /// Number of epochs actually run.
    pub epochs_run:     usize,
    /// Final accuracy on training data.
    pub final_accuracy: f32,
    /// Whether training stopped early.
    pub stopped_early:  bool,
    /// Accuracy history per epoch.
    pub history:        Vec<f32>
}

/// Tracks early stopping state during training.
#[derive(Debug)]
pub(crate) struct EarlyStopTracker {
    patience:  usize,
    min_delta: f32,
    best:      f32,
    wait:      usize
}

impl EarlyStopTracker {
    pub(crate) fn new(config: &EarlyStop) -> Self {
        Self {
            patience:  config.patience,
            min_delta: config.min_delta,
            best:      0.0,
            wait:      0
        }
    }

    /// Returns `true` once accuracy has stalled for `patience` epochs.
    pub(crate) fn update(&mut self, accuracy: f32) -> bool {
        if accuracy > self.best + self.min_delta {
            self.best = accuracy;
            self.wait = 0;
            false
        } else {
            self.wait += 1;
            self.wait >= self.patience
        }
    }
}
