//! Test orchestrators: the [`PermutationTest`] builder and its runners.
//!
//! An orchestrator validates its inputs, computes the reference statistic,
//! sizes the assignment space, picks exact or sampled mode, drives the
//! lazy assignment stream through the statistic evaluator, and normalizes
//! the accumulated counts into a [`TestReport`].
//!
//! # Mode selection
//!
//! Both paths use the same rule: exact enumeration when the space size is
//! at most `limit`, otherwise Monte-Carlo sampling of exactly `limit`
//! assignments. The switch is deliberately symmetric between the
//! one-sample and two-sample paths.
//!
//! # Self-inclusion
//!
//! The identity assignment is always part of the enumeration and the
//! denominator: exact mode enumerates it like any other member, and
//! sampled mode records the reference-against-itself comparison as the
//! first of the `limit` assignments (the sampled spaces never redraw it).
//! It ties itself in all three directions, so every reported p-value is at
//! least `1/N` — a permutation test never reports p = 0.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

use crate::assignment::{CombinationAssignments, SignAssignments};
use crate::config::Config;
use crate::error::{validate_sample, TestError};
use crate::progress::{NullSink, ProgressSink};
use crate::rank::{rank, rank_fractional, signed_rank, signed_rank_fractional};
use crate::statistic::{sign_statistic, subset_statistic, Counts};

/// Result of a permutation test.
///
/// The three p-values share the denominator `n_assignments`; the raw
/// comparison tallies are kept alongside so callers can recover either
/// two-sided convention (see [`p_two_sided`](TestReport::p_two_sided)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    /// Probability of a statistic `<=` the observed one (lower tail).
    pub p_lesser: f64,
    /// Probability of a statistic `>=` the observed one (upper tail).
    pub p_greater: f64,
    /// Two-sided probability.
    ///
    /// One-sample tests report the more-extreme fraction
    /// `counts.more_extreme / n_assignments`. Two-sample tests report the
    /// conservative convention `min(2 * min(lesser, greater), N) / N`
    /// instead; the raw more-extreme tally remains available in `counts`.
    pub p_two_sided: f64,
    /// Number of assignments actually evaluated: the full space size in
    /// exact mode, the budget in sampled mode.
    pub n_assignments: u64,
    /// Raw comparison tallies behind the p-values.
    pub counts: Counts,
    /// Whether the full assignment space was enumerated (as opposed to
    /// Monte-Carlo sampling).
    pub exact: bool,
}

/// Builder and entry point for permutation tests.
///
/// # Example
///
/// ```
/// use permutest::PermutationTest;
///
/// let report = PermutationTest::new()
///     .limit(1000)
///     .two_sample(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0])
///     .unwrap();
/// assert_eq!(report.n_assignments, 20); // C(6, 3), enumerated exactly
/// assert!(report.p_lesser >= 1.0 / 20.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PermutationTest {
    config: Config,
}

impl PermutationTest {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from an existing configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the enumeration budget.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero.
    pub fn limit(mut self, limit: usize) -> Self {
        assert!(limit > 0, "limit must be > 0");
        self.config.limit = limit;
        self
    }

    /// Rank-transform the data before testing (Wilcoxon variants).
    pub fn ranked(mut self, ranked: bool) -> Self {
        self.config.ranked = ranked;
        self
    }

    /// Keep tied ranks fractional instead of rounding.
    pub fn fractional_ranks(mut self, fractional: bool) -> Self {
        self.config.fractional_ranks = fractional;
        self
    }

    /// Seed the Monte-Carlo sampler for reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// One-sample test on a sequence of observations (or precomputed
    /// paired differences).
    ///
    /// The null hypothesis is that the distribution is symmetric around
    /// zero: every reassignment of signs to the observations is equally
    /// likely, and the statistic is the signed sum.
    pub fn one_sample(&self, values: &[f64]) -> Result<TestReport, TestError> {
        self.one_sample_with_progress(values, &mut NullSink)
    }

    /// [`one_sample`](Self::one_sample) with progress reporting.
    pub fn one_sample_with_progress(
        &self,
        values: &[f64],
        progress: &mut dyn ProgressSink,
    ) -> Result<TestReport, TestError> {
        self.config.validate()?;
        validate_sample("sample", values)?;

        let transformed;
        let data = if self.config.ranked {
            transformed = if self.config.fractional_ranks {
                signed_rank_fractional(values)
            } else {
                signed_rank(values)
            };
            transformed.as_slice()
        } else {
            values
        };

        let reference: f64 = data.iter().sum();
        let limit = self.config.limit;
        let exact =
            SignAssignments::space_size(data.len()).is_some_and(|size| size <= limit as u128);

        let mut counts = Counts::default();
        let total = if exact {
            // Space size fits the budget, so it also fits u64.
            let total = 1u64 << data.len();
            progress.set_total(total, &format!("of {total} permutations"));
            for signs in SignAssignments::exact(data.len()) {
                counts.record(reference, sign_statistic(data, &signs));
                progress.advance();
            }
            total
        } else {
            let total = limit as u64;
            progress.set_total(total, &format!("of {total} permutations"));
            counts.record(reference, reference);
            progress.advance();
            for signs in SignAssignments::sampled(data.len(), limit - 1, self.rng()) {
                counts.record(reference, sign_statistic(data, &signs));
                progress.advance();
            }
            total
        };
        progress.clear();

        debug_assert!(counts.more_extreme >= 1, "identity assignment missing");
        let n = total as f64;
        Ok(TestReport {
            p_lesser: counts.lesser as f64 / n,
            p_greater: counts.greater as f64 / n,
            p_two_sided: counts.more_extreme as f64 / n,
            n_assignments: total,
            counts,
            exact,
        })
    }

    /// One-sample test on the elementwise differences of two paired
    /// samples.
    ///
    /// Fails with [`TestError::DimensionMismatch`] if the samples have
    /// different lengths.
    pub fn paired(&self, first: &[f64], second: &[f64]) -> Result<TestReport, TestError> {
        self.paired_with_progress(first, second, &mut NullSink)
    }

    /// [`paired`](Self::paired) with progress reporting.
    pub fn paired_with_progress(
        &self,
        first: &[f64],
        second: &[f64],
        progress: &mut dyn ProgressSink,
    ) -> Result<TestReport, TestError> {
        if first.len() != second.len() {
            return Err(TestError::DimensionMismatch {
                left: first.len(),
                right: second.len(),
            });
        }
        validate_sample("first", first)?;
        validate_sample("second", second)?;
        let differences: Vec<f64> = first.iter().zip(second).map(|(a, b)| a - b).collect();
        self.one_sample_with_progress(&differences, progress)
    }

    /// Two-sample test: are the two samples drawn from the same
    /// distribution?
    ///
    /// The observations are pooled and every way of assigning `|a|` of
    /// them to group A is (conceptually) enumerated; the statistic is the
    /// group-A sum. The two-sided p-value uses the conservative
    /// twice-the-smaller-tail convention, capped at 1.
    pub fn two_sample(&self, a: &[f64], b: &[f64]) -> Result<TestReport, TestError> {
        self.two_sample_with_progress(a, b, &mut NullSink)
    }

    /// [`two_sample`](Self::two_sample) with progress reporting.
    pub fn two_sample_with_progress(
        &self,
        a: &[f64],
        b: &[f64],
        progress: &mut dyn ProgressSink,
    ) -> Result<TestReport, TestError> {
        self.config.validate()?;
        validate_sample("first", a)?;
        validate_sample("second", b)?;

        let k = a.len();
        let n = k + b.len();
        let mut pool: Vec<f64> = a.iter().chain(b).copied().collect();
        if self.config.ranked {
            // Joint ranking keeps the two groups comparable; the first k
            // positions still belong to the true group A.
            pool = if self.config.fractional_ranks {
                rank_fractional(&pool)
            } else {
                rank(&pool)
            };
        }
        let reference: f64 = pool[..k].iter().sum();

        let limit = self.config.limit;
        let space = CombinationAssignments::space_size(n, k);
        let exact = space.is_some_and(|size| size <= limit as u128);

        let mut counts = Counts::default();
        let total = if exact {
            let total = space.unwrap_or(0) as u64;
            progress.set_total(total, &format!("of {total} permutations"));
            for subset in CombinationAssignments::exact(n, k) {
                counts.record(reference, subset_statistic(&pool, &subset));
                progress.advance();
            }
            total
        } else {
            let total = limit as u64;
            progress.set_total(total, &format!("of {total} permutations"));
            counts.record(reference, reference);
            progress.advance();
            for subset in CombinationAssignments::sampled(n, k, limit - 1, self.rng()) {
                counts.record(reference, subset_statistic(&pool, &subset));
                progress.advance();
            }
            total
        };
        progress.clear();

        debug_assert!(counts.more_extreme >= 1, "identity assignment missing");
        let n_f = total as f64;
        let two_sided_count = (2 * counts.lesser.min(counts.greater)).min(total);
        Ok(TestReport {
            p_lesser: counts.lesser as f64 / n_f,
            p_greater: counts.greater as f64 / n_f,
            p_two_sided: two_sided_count as f64 / n_f,
            n_assignments: total,
            counts,
            exact,
        })
    }

    /// One generator per test invocation; no state crosses invocations.
    fn rng(&self) -> Xoshiro256PlusPlus {
        match self.config.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_entropy(),
        }
    }
}
