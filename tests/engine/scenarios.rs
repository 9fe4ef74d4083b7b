//! Concrete end-to-end scenarios with hand-checked expectations.

use permutest::{
    one_sample_test, rank, signed_rank, two_sample_test, PermutationTest, TestError,
};

#[test]
fn one_sample_small_exact() {
    // 2^4 = 16 <= 1000: exact enumeration. Reference statistic = 3.
    let report = one_sample_test(&[5.0, -3.0, 2.0, -1.0], 1000).unwrap();
    assert!(report.exact);
    assert_eq!(report.n_assignments, 16);

    // Scaled tail probabilities must be whole counts, each at least 1
    // (the reference assignment itself).
    let lesser = report.p_lesser * 16.0;
    let greater = report.p_greater * 16.0;
    assert_eq!(lesser.fract(), 0.0);
    assert_eq!(greater.fract(), 0.0);
    assert!(lesser >= 1.0);
    assert!(greater >= 1.0);
}

#[test]
fn two_sample_small_exact() {
    // C(6, 3) = 20 <= 1000: exact. Reference = sum of A = 6.
    let report = two_sample_test(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], 1000).unwrap();
    assert!(report.exact);
    assert_eq!(report.n_assignments, 20);

    let expected = (2.0 * report.p_lesser.min(report.p_greater)).min(1.0);
    assert_eq!(report.p_two_sided, expected);
}

#[test]
fn rank_rounds_tied_ranks() {
    assert_eq!(rank(&[10.0, 20.0, 20.0, 30.0]), vec![1.0, 3.0, 3.0, 4.0]);
}

#[test]
fn signed_rank_round_trip() {
    assert_eq!(signed_rank(&[-3.0, 1.0, -2.0]), vec![-3.0, 1.0, -2.0]);
}

#[test]
fn two_sample_large_space_samples_the_budget() {
    // C(30, 15) = 155,117,520 >> 500: sampled mode, exactly 500
    // assignments evaluated.
    let a: Vec<f64> = (0..15).map(f64::from).collect();
    let b: Vec<f64> = (15..30).map(f64::from).collect();
    let report = PermutationTest::new()
        .limit(500)
        .seed(7)
        .two_sample(&a, &b)
        .unwrap();
    assert!(!report.exact);
    assert_eq!(report.n_assignments, 500);

    // Distinct draws plus the always-counted identity: no p-value can dip
    // below 1/500, and the tails stay well-formed probabilities.
    assert!(report.p_lesser >= 1.0 / 500.0);
    assert!(report.p_greater >= 1.0 / 500.0);
    assert!(report.p_two_sided >= 1.0 / 500.0);
    assert!(report.p_two_sided <= 1.0);

    // A is the lower half of the pool, so the identity split has the
    // smallest possible group-A sum.
    assert_eq!(report.counts.lesser, 1);
}

#[test]
fn empty_input_fails() {
    let err = one_sample_test(&[], 1000).unwrap_err();
    assert!(matches!(err, TestError::InvalidInput { .. }));

    let err = two_sample_test(&[], &[1.0], 1000).unwrap_err();
    assert!(matches!(err, TestError::InvalidInput { .. }));
}

#[test]
fn zero_limit_fails() {
    let err = one_sample_test(&[1.0, 2.0], 0).unwrap_err();
    assert!(matches!(err, TestError::InvalidConfiguration { .. }));
}

#[test]
fn paired_difference_test_end_to_end() {
    // Before/after measurements; the test runs on the differences.
    let before = [12.1, 14.3, 11.8, 13.9, 12.6];
    let after = [11.2, 13.1, 11.9, 12.4, 11.8];
    let report = PermutationTest::new().limit(1000).paired(&before, &after).unwrap();
    assert!(report.exact);
    assert_eq!(report.n_assignments, 32);
    // Four of five differences are positive; the upper tail is the small one.
    assert!(report.p_greater < report.p_lesser);
}

#[test]
fn wilcoxon_mann_whitney_on_shifted_groups() {
    // Clearly separated groups: the identity split is the extreme one in
    // rank space too, so the one-sided p hits the 1/N floor.
    let a = [1.0, 2.0, 3.0, 4.0];
    let b = [10.0, 11.0, 12.0, 13.0];
    let report = PermutationTest::new()
        .ranked(true)
        .two_sample(&a, &b)
        .unwrap();
    assert_eq!(report.n_assignments, 70); // C(8, 4)
    assert_eq!(report.p_lesser, 1.0 / 70.0);
}
