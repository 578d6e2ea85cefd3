//! # Bit-plane Tsetlin Machine
//!
//! Tsetlin Machine classifier whose automata live in stacked bit-planes, so
//! clause evaluation and feedback operate on 32 literals per word operation.
//!
//! Inputs are packed literal vectors: `F` feature bits followed by their `F`
//! complements (see [`pack_features`]).
//!
//! # Features
//!
//! - `std` (default): Standard library support
//! - `parallel`: Parallel prediction and evaluation via rayon
//! - `serde`: Serialization support for [`Config`]
//!
//! # Examples
//!
//! ```
//! use bitplane_tsetlin::{Config, MultiClass, pack_batch};
//!
//! let config = Config::builder()
//!     .clauses(20)
//!     .features(2)
//!     .threshold(10)
//!     .build()
//!     .unwrap();
//!
//! let mut tm = MultiClass::new(config, 2, 42).unwrap();
//!
//! let x = pack_batch(&[vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
//! let y = vec![0, 1, 1, 0];
//!
//! tm.fit(&x, &y, 200).unwrap();
//! let accuracy = tm.evaluate(&x, &y).unwrap();
//! assert!((0.0..=1.0).contains(&accuracy));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod bitplane;
pub mod clause;
mod config;
pub mod error;
pub mod feedback;
mod literals;
mod machine;
mod multiclass;
mod training;
pub mod utils;
mod votes;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use bitplane::BitPlaneBank;
pub use clause::EvalMode;
pub use config::{Config, ConfigBuilder, MAX_STATE_BITS, MIN_STATE_BITS};
pub use error::{Error, Result};
pub use literals::{WORD_BITS, Word, literal_bit, pack_batch, pack_features, remainder_mask};
pub use machine::TsetlinMachine;
pub use multiclass::MultiClass;
pub use training::{EarlyStop, FitOptions, FitResult, ProgressCallback};
pub use votes::sum_votes;
