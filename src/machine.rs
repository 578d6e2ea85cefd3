//! Single-class Tsetlin Machine over bit-plane automata.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use rand::Rng;
use tracing::trace;

use crate::{
    bitplane::BitPlaneBank,
    clause::{EvalMode, evaluate_clauses, output_bit},
    config::Config,
    error::{Error, Result},
    feedback::{
        FeedbackKind, FeedbackStream, feedback_kind, feedback_probability, select_clauses, type_i,
        type_ii
    },
    literals::Word,
    votes::sum_votes
};

/// # Overview
///
/// One binary sub-problem: `C` clauses over `2F` literals, voting with
/// alternating polarity.
///
/// `update` is the only mutating operation; `score` is a pure read.
///
/// # Examples
///
/// ```
/// use bitplane_tsetlin::{Config, TsetlinMachine, pack_features, utils::rng_from_seed};
///
/// let config = Config::builder().clauses(4).features(2).build().unwrap();
/// let mut tm = TsetlinMachine::new(config).unwrap();
/// let mut rng = rng_from_seed(42);
///
/// let x = pack_features(&[1, 0]);
/// assert_eq!(tm.score(&x).unwrap(), 0);
///
/// tm.update(&x, true, &mut rng).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct TsetlinMachine {
    config:        Config,
    bank:          BitPlaneBank,
    clause_output: Vec<Word>,
    selected:      Vec<Word>,
    stream:        FeedbackStream
}

impl TsetlinMachine {
    /// # Overview
    ///
    /// Creates a machine with every automaton at the initial Exclude state.
    ///
    /// # Errors
    ///
    /// Returns the validation error of an invalid `config`.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            bank: BitPlaneBank::new(config.n_clauses, config.n_literals(), config.state_bits),
            clause_output: vec![0; config.clause_words()],
            selected: vec![0; config.clause_words()],
            stream: FeedbackStream::new(config.n_literals(), config.feedback_literals()),
            config
        })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read-only view of the automaton store.
    #[inline]
    pub fn bank(&self) -> &BitPlaneBank {
        &self.bank
    }

    /// # Overview
    ///
    /// Resets every automaton to the initial state.
    pub fn reset(&mut self) {
        self.bank.initialize();
    }

    fn check_input(&self, x: &[Word]) -> Result<()> {
        let expected = self.config.literal_words();
        if x.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                got: x.len()
            });
        }
        Ok(())
    }

    /// # Overview
    ///
    /// Packed clause outputs for `x` under `mode`.
    pub fn clause_outputs(&self, x: &[Word], mode: EvalMode) -> Result<Vec<Word>> {
        self.check_input(x)?;
        let mut output = vec![0; self.config.clause_words()];
        evaluate_clauses(&self.bank, x, mode, &mut output);
        Ok(output)
    }

    /// # Overview
    ///
    /// Clipped vote sum for `x` in prediction mode.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if `x` is not `ceil(2F / 32)` words long.
    pub fn score(&self, x: &[Word]) -> Result<i32> {
        let output = self.clause_outputs(x, EvalMode::Predict)?;
        Ok(sum_votes(&output, self.config.threshold))
    }

    /// # Overview
    ///
    /// One online learning step towards `target`.
    ///
    /// Evaluates clauses in training mode, draws one trial per clause with the
    /// feedback probability, then applies Type I or Type II feedback to the
    /// selected clauses.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if `x` is not `ceil(2F / 32)` words long.
    /// The state is untouched in that case.
    pub fn update<R: Rng>(&mut self, x: &[Word], target: bool, rng: &mut R) -> Result<()> {
        self.check_input(x)?;

        evaluate_clauses(&self.bank, x, EvalMode::Training, &mut self.clause_output);
        let votes = sum_votes(&self.clause_output, self.config.threshold);
        let p = feedback_probability(self.config.threshold, votes, target);
        trace!(votes, p, target, "update");

        select_clauses(self.config.n_clauses, p, rng, &mut self.selected);

        for clause in 0..self.config.n_clauses {
            if !output_bit(&self.selected, clause) {
                continue;
            }

            let fires = output_bit(&self.clause_output, clause);
            match feedback_kind(clause, target) {
                FeedbackKind::TypeI => {
                    self.stream.draw(rng);
                    type_i(&mut self.bank, clause, x, fires, self.stream.words());
                }
                FeedbackKind::TypeII => type_ii(&mut self.bank, clause, x, fires)
            }
        }

        Ok(())
    }

    /// # Overview
    ///
    /// State of the automaton for `literal` in `clause`.
    #[inline]
    pub fn state(&self, clause: usize, literal: usize) -> u32 {
        self.bank.get_state(clause, literal)
    }

    /// # Overview
    ///
    /// Whether `literal` is Included in `clause`.
    #[inline]
    pub fn action(&self, clause: usize, literal: usize) -> bool {
        self.bank.action(clause, literal)
    }
}
