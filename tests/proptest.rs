//! Property-based tests for the bit-plane Tsetlin Machine.

use bitplane_tsetlin::{
    BitPlaneBank, Config, EvalMode, TsetlinMachine, WORD_BITS, Word, literal_bit, pack_features,
    sum_votes, utils::rng_from_seed
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Masked bit-plane arithmetic matches a clamped per-automaton counter.
    #[test]
    fn bank_matches_saturating_counters(
        state_bits in 2u32..=10,
        ops in prop::collection::vec((any::<bool>(), 0usize..2, any::<u32>()), 0..200)
    ) {
        let n_literals = 40;
        let mut bank = BitPlaneBank::new(1, n_literals, state_bits);
        let max = (1i64 << state_bits) - 1;
        let mut reference = vec![(1i64 << (state_bits - 1)) - 1; 2 * WORD_BITS];

        for (up, word, mask) in ops {
            if up {
                bank.increment_masked(0, word, mask);
            } else {
                bank.decrement_masked(0, word, mask);
            }
            for bit in 0..WORD_BITS {
                if (mask >> bit) & 1 == 1 {
                    let s = &mut reference[word * WORD_BITS + bit];
                    *s = if up { (*s + 1).min(max) } else { (*s - 1).max(0) };
                }
            }
        }

        for literal in 0..n_literals {
            prop_assert_eq!(i64::from(bank.get_state(0, literal)), reference[literal]);
            prop_assert_eq!(bank.action(0, literal), reference[literal] > max / 2);
        }
    }

    /// Enough increments pin an automaton at the ceiling, enough decrements at 0.
    #[test]
    fn saturation_is_sticky(state_bits in 2u32..=12, extra in 0usize..50) {
        let mut bank = BitPlaneBank::new(1, 4, state_bits);
        let max = (1u32 << state_bits) - 1;

        for _ in 0..(max as usize + extra) {
            bank.increment(0, 1);
        }
        prop_assert_eq!(bank.get_state(0, 1), max);

        for _ in 0..(max as usize + 1 + extra) {
            bank.decrement(0, 1);
        }
        prop_assert_eq!(bank.get_state(0, 1), 0);
    }

    /// Vote sums are always clipped to the threshold.
    #[test]
    fn votes_bounded(
        output in prop::collection::vec(any::<Word>(), 1..8),
        threshold in 1i32..100
    ) {
        let v = sum_votes(&output, threshold);
        prop_assert!(v >= -threshold && v <= threshold);
    }

    /// Without Included literals no clause fires in prediction mode.
    #[test]
    fn empty_clauses_never_vote(
        n_clauses in 1usize..40,
        input in prop::collection::vec(0u8..=1, 1..50)
    ) {
        let config = Config::builder()
            .clauses(n_clauses)
            .features(input.len())
            .build()
            .unwrap();
        let tm = TsetlinMachine::new(config).unwrap();
        let x = pack_features(&input);

        let out = tm.clause_outputs(&x, EvalMode::Predict).unwrap();
        prop_assert!(out.iter().all(|&w| w == 0));
        prop_assert_eq!(tm.score(&x).unwrap(), 0);
    }

    /// Scoring is a pure read after arbitrary training.
    #[test]
    fn score_deterministic(
        seed in 0u64..1000,
        steps in prop::collection::vec((prop::collection::vec(0u8..=1, 6), any::<bool>()), 1..30)
    ) {
        let config = Config::builder()
            .clauses(10)
            .features(6)
            .threshold(5)
            .build()
            .unwrap();
        let mut tm = TsetlinMachine::new(config).unwrap();
        let mut rng = rng_from_seed(seed);

        for (input, target) in &steps {
            tm.update(&pack_features(input), *target, &mut rng).unwrap();
        }

        for (input, _) in &steps {
            let x = pack_features(input);
            let a = tm.score(&x).unwrap();
            prop_assert_eq!(tm.score(&x).unwrap(), a);
            prop_assert!(a.abs() <= 5);
        }
    }

    /// Packed literals hold each feature and its complement.
    #[test]
    fn packing_complements(input in prop::collection::vec(0u8..=1, 1..100)) {
        let n = input.len();
        let x = pack_features(&input);

        prop_assert_eq!(x.len(), (2 * n).div_ceil(WORD_BITS));
        for (k, &v) in input.iter().enumerate() {
            prop_assert_eq!(literal_bit(&x, k), v == 1);
            prop_assert_eq!(literal_bit(&x, k + n), v == 0);
        }
    }

    /// Config validation works correctly.
    #[test]
    fn config_validation(
        n_clauses in 0usize..100,
        n_features in 0usize..50,
        threshold in -5i32..50,
        s in 0.5f64..5.0
    ) {
        let result = Config::builder()
            .clauses(n_clauses)
            .features(n_features)
            .threshold(threshold)
            .specificity(s)
            .build();

        let valid = n_clauses > 0 && n_features > 0 && threshold > 0 && s > 1.0;
        prop_assert_eq!(result.is_ok(), valid);
    }
}
