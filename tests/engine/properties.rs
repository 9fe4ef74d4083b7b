//! Invariant properties checked over generated inputs.

use permutest::PermutationTest;
use proptest::prelude::*;

/// Small samples whose sign space stays within the default budget.
fn small_sample() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-100.0f64..100.0, 1..=8)
}

/// Two small groups whose combination space stays exact.
fn small_groups() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (
        prop::collection::vec(-100.0f64..100.0, 1..=5),
        prop::collection::vec(-100.0f64..100.0, 1..=5),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every p-value includes the reference assignment: p >= 1/N.
    #[test]
    fn prop_self_inclusion_one_sample(values in small_sample()) {
        let report = PermutationTest::new().one_sample(&values).unwrap();
        let floor = 1.0 / report.n_assignments as f64;
        prop_assert!(report.p_lesser >= floor);
        prop_assert!(report.p_greater >= floor);
        prop_assert!(report.p_two_sided >= floor);
    }

    /// Self-inclusion holds in sampled mode too.
    #[test]
    fn prop_self_inclusion_sampled(values in prop::collection::vec(-100.0f64..100.0, 16..=24), seed in any::<u64>()) {
        let report = PermutationTest::new()
            .limit(50)
            .seed(seed)
            .one_sample(&values)
            .unwrap();
        prop_assert!(!report.exact);
        prop_assert_eq!(report.n_assignments, 50);
        let floor = 1.0 / 50.0;
        prop_assert!(report.p_lesser >= floor);
        prop_assert!(report.p_greater >= floor);
        prop_assert!(report.p_two_sided >= floor);
    }

    /// Negating the sample swaps the tails: p_lesser(D) = p_greater(-D).
    #[test]
    fn prop_negation_swaps_tails(values in small_sample()) {
        let negated: Vec<f64> = values.iter().map(|v| -v).collect();
        let original = PermutationTest::new().one_sample(&values).unwrap();
        let mirrored = PermutationTest::new().one_sample(&negated).unwrap();
        prop_assert_eq!(original.p_lesser, mirrored.p_greater);
        prop_assert_eq!(original.p_greater, mirrored.p_lesser);
        prop_assert_eq!(original.p_two_sided, mirrored.p_two_sided);
    }

    /// Exact enumeration is deterministic: two runs agree bit for bit.
    #[test]
    fn prop_exact_runs_identical(values in small_sample()) {
        let first = PermutationTest::new().one_sample(&values).unwrap();
        let second = PermutationTest::new().one_sample(&values).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Two-sample exact runs are deterministic as well.
    #[test]
    fn prop_two_sample_exact_identical((a, b) in small_groups()) {
        let first = PermutationTest::new().two_sample(&a, &b).unwrap();
        let second = PermutationTest::new().two_sample(&a, &b).unwrap();
        prop_assert_eq!(first, second);
    }

    /// The two-sample two-sided value follows the conservative convention
    /// exactly: min(2 * min(p_lesser, p_greater), 1).
    #[test]
    fn prop_two_sided_convention((a, b) in small_groups()) {
        let report = PermutationTest::new().two_sample(&a, &b).unwrap();
        let expected = (2.0 * report.p_lesser.min(report.p_greater)).min(1.0);
        prop_assert_eq!(report.p_two_sided, expected);
    }

    /// Tails cover the whole space: every assignment is <= or >= the
    /// reference, so the counts sum to at least N.
    #[test]
    fn prop_tails_cover_space(values in small_sample()) {
        let report = PermutationTest::new().one_sample(&values).unwrap();
        prop_assert!(report.counts.lesser + report.counts.greater >= report.n_assignments);
    }

    /// Ranking a strictly increasing sequence is the identity ranking.
    #[test]
    fn prop_rank_of_sorted_distinct(n in 1usize..50) {
        let values: Vec<f64> = (0..n).map(|i| i as f64 * 3.5).collect();
        let expected: Vec<f64> = (1..=n).map(|i| i as f64).collect();
        prop_assert_eq!(permutest::rank(&values), expected);
    }

    /// A constant sequence ranks to (n + 1) / 2 everywhere (rounded).
    #[test]
    fn prop_rank_of_constant(n in 1usize..50, value in -100.0f64..100.0) {
        let values = vec![value; n];
        let expected = vec![((n + 1) as f64 / 2.0).round(); n];
        prop_assert_eq!(permutest::rank(&values), expected);
    }
}
