//! Error types for the bit-plane Tsetlin Machine.

use core::fmt;

/// # Overview
///
/// Errors raised while building a machine or feeding it data.
///
/// Automaton arithmetic itself never fails: counters saturate at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    MissingClauses,
    MissingFeatures,
    InvalidThreshold,
    InvalidSpecificity,
    InvalidStateBits { bits: u32 },
    TooFewClasses { got: usize },
    EmptyDataset,
    DimensionMismatch { expected: usize, got: usize },
    ClassOutOfRange { class: usize, n_classes: usize }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingClauses => write!(f, "n_clauses must be > 0"),
            Self::MissingFeatures => write!(f, "n_features must be > 0"),
            Self::InvalidThreshold => write!(f, "threshold must be > 0"),
            Self::InvalidSpecificity => write!(f, "s must be > 1.0"),
            Self::InvalidStateBits {
                bits
            } => write!(f, "state_bits must be in 2..=16, got {bits}"),
            Self::TooFewClasses {
                got
            } => write!(f, "at least 2 classes required, got {got}"),
            Self::EmptyDataset => write!(f, "dataset cannot be empty"),
            Self::DimensionMismatch {
                expected,
                got
            } => {
                write!(f, "dimension mismatch: expected {expected}, got {got}")
            }
            Self::ClassOutOfRange {
                class,
                n_classes
            } => write!(f, "class {class} out of range for {n_classes} classes")
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// # Overview
///
/// Result type for Tsetlin Machine operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_values() {
        let err = Error::DimensionMismatch {
            expected: 49,
            got:      48
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 49, got 48");

        let err = Error::ClassOutOfRange {
            class:     7,
            n_classes: 3
        };
        assert!(err.to_string().contains("class 7"));
    }
}
