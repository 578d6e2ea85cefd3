//! Configuration and builder for the bit-plane Tsetlin Machine.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    literals::WORD_BITS
};

/// Smallest supported automaton bit depth.
pub const MIN_STATE_BITS: u32 = 2;

/// Largest supported automaton bit depth.
pub const MAX_STATE_BITS: u32 = 16;

/// # Overview
///
/// Hyperparameters shared by every clause of a machine.
///
/// `n_features` counts raw features; each one contributes two literals
/// (itself and its complement).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[must_use]
pub struct Config {
    pub n_clauses:  usize,
    pub n_features: usize,
    pub threshold:  i32,
    pub s:          f64,
    pub state_bits: u32
}

impl Config {
    /// # Overview
    ///
    /// Creates a new ConfigBuilder.
    #[inline]
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// # Overview
    ///
    /// Validates configuration parameters.
    pub fn validate(&self) -> Result<()> {
        if self.n_clauses == 0 {
            return Err(Error::MissingClauses);
        }
        if self.n_features == 0 {
            return Err(Error::MissingFeatures);
        }
        if self.threshold <= 0 {
            return Err(Error::InvalidThreshold);
        }
        if !self.s.is_finite() || self.s <= 1.0 {
            return Err(Error::InvalidSpecificity);
        }
        if !(MIN_STATE_BITS..=MAX_STATE_BITS).contains(&self.state_bits) {
            return Err(Error::InvalidStateBits {
                bits: self.state_bits
            });
        }
        Ok(())
    }

    /// Number of literals per clause (features plus complements).
    #[inline]
    #[must_use]
    pub fn n_literals(&self) -> usize {
        2 * self.n_features
    }

    /// Words needed to hold one packed input vector.
    #[inline]
    #[must_use]
    pub fn literal_words(&self) -> usize {
        self.n_literals().div_ceil(WORD_BITS)
    }

    /// Words needed to hold one output bit per clause.
    #[inline]
    #[must_use]
    pub fn clause_words(&self) -> usize {
        self.n_clauses.div_ceil(WORD_BITS)
    }

    /// # Overview
    ///
    /// Size of the feedback stream drawn for Type I feedback: `round(2F / s)`.
    ///
    /// Never exceeds the literal count, so the draw without replacement
    /// always terminates.
    #[inline]
    #[must_use]
    pub fn feedback_literals(&self) -> usize {
        let n = self.n_literals();
        // round half up; the ratio is positive so this matches f64::round
        let active = (n as f64 / self.s + 0.5) as usize;
        active.min(n)
    }

    /// Saturation value `2^B - 1`.
    #[inline]
    #[must_use]
    pub fn max_state(&self) -> u32 {
        (1u32 << self.state_bits) - 1
    }

    /// Initial state `2^(B-1) - 1`: deepest Exclude, one step below Include.
    #[inline]
    #[must_use]
    pub fn initial_state(&self) -> u32 {
        (1u32 << (self.state_bits - 1)) - 1
    }
}

/// # Overview
///
/// Builder for Config with validation.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    n_clauses:  Option<usize>,
    n_features: Option<usize>,
    threshold:  Option<i32>,
    s:          Option<f64>,
    state_bits: Option<u32>
}

impl ConfigBuilder {
    /// # Overview
    ///
    /// Sets the number of clauses. Even counts balance the two polarities.
    pub fn clauses(mut self, n: usize) -> Self {
        self.n_clauses = Some(n);
        self
    }

    /// # Overview
    ///
    /// Sets the number of raw input features.
    pub fn features(mut self, n: usize) -> Self {
        self.n_features = Some(n);
        self
    }

    /// # Overview
    ///
    /// Sets the vote clipping threshold T (default: 15).
    pub fn threshold(mut self, t: i32) -> Self {
        self.threshold = Some(t);
        self
    }

    /// # Overview
    ///
    /// Sets sensitivity parameter s (default: 3.9).
    pub fn specificity(mut self, s: f64) -> Self {
        self.s = Some(s);
        self
    }

    /// # Overview
    ///
    /// Sets automaton bit depth B (default: 8).
    pub fn state_bits(mut self, bits: u32) -> Self {
        self.state_bits = Some(bits);
        self
    }

    /// # Overview
    ///
    /// Builds and validates the Config.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            n_clauses:  self.n_clauses.ok_or(Error::MissingClauses)?,
            n_features: self.n_features.ok_or(Error::MissingFeatures)?,
            threshold:  self.threshold.unwrap_or(15),
            s:          self.s.unwrap_or(3.9),
            state_bits: self.state_bits.unwrap_or(8)
        };
        config.validate()?;
        Ok(config)
    }
}
