//! # permutest
//!
//! Non-parametric permutation tests over plain numeric sequences.
//!
//! Given one or two samples of real-valued observations, this crate
//! estimates the probability that the observed test statistic arose by
//! chance, by enumerating (or, past a budget, uniformly sampling) the
//! space of sign or group-membership reassignments consistent with the
//! null hypothesis. Small spaces are enumerated exactly; large ones fall
//! back to Monte-Carlo estimation with exactly `limit` assignments.
//!
//! The engine knows nothing about records, attributes, or files: it
//! consumes `&[f64]` slices, optionally reports progress through a
//! minimal callback, and returns a fixed-shape [`TestReport`]. One test at
//! a time, single-threaded, no state across invocations.
//!
//! ## Quick Start
//!
//! ```
//! use permutest::{one_sample_test, PermutationTest};
//!
//! // Free function: sign test on one sample.
//! let report = one_sample_test(&[5.0, -3.0, 2.0, -1.0], 1000).unwrap();
//! assert_eq!(report.n_assignments, 16); // 2^4, enumerated exactly
//! assert!(report.p_two_sided >= 1.0 / 16.0);
//!
//! // Builder: rank-sum (Wilcoxon-Mann-Whitney) variant, seeded sampling.
//! let report = PermutationTest::new()
//!     .ranked(true)
//!     .limit(500)
//!     .seed(42)
//!     .two_sample(&[1.2, 3.4, 2.2], &[5.6, 7.1, 6.3])
//!     .unwrap();
//! assert!(report.p_lesser >= 1.0 / report.n_assignments as f64);
//! ```
//!
//! ## p-values
//!
//! Every report carries three probabilities: `p_lesser` (lower tail),
//! `p_greater` (upper tail), and `p_two_sided`. The identity assignment is
//! always part of the denominator, so no p-value is ever below `1/N`.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod engine;
mod error;
mod rank;
mod statistic;

// Functional modules
pub mod assignment;
pub mod progress;

// Re-exports for the public API
pub use config::{Config, DEFAULT_LIMIT};
pub use engine::{PermutationTest, TestReport};
pub use error::TestError;
pub use progress::{NullSink, ProgressSink};
pub use rank::{rank, rank_fractional, signed_rank, signed_rank_fractional};
pub use statistic::Counts;

/// One-sample permutation test with default options.
///
/// A zero `limit` fails with [`TestError::InvalidConfiguration`]; use the
/// [`PermutationTest`] builder for eager validation.
pub fn one_sample_test(values: &[f64], limit: usize) -> Result<TestReport, TestError> {
    PermutationTest::with_config(Config {
        limit,
        ..Config::default()
    })
    .one_sample(values)
}

/// [`one_sample_test`] with progress reporting.
pub fn one_sample_test_with_progress(
    values: &[f64],
    limit: usize,
    progress: &mut dyn ProgressSink,
) -> Result<TestReport, TestError> {
    PermutationTest::with_config(Config {
        limit,
        ..Config::default()
    })
    .one_sample_with_progress(values, progress)
}

/// Two-sample permutation test with default options.
///
/// A zero `limit` fails with [`TestError::InvalidConfiguration`]; use the
/// [`PermutationTest`] builder for eager validation.
pub fn two_sample_test(a: &[f64], b: &[f64], limit: usize) -> Result<TestReport, TestError> {
    PermutationTest::with_config(Config {
        limit,
        ..Config::default()
    })
    .two_sample(a, b)
}

/// [`two_sample_test`] with progress reporting.
pub fn two_sample_test_with_progress(
    a: &[f64],
    b: &[f64],
    limit: usize,
    progress: &mut dyn ProgressSink,
) -> Result<TestReport, TestError> {
    PermutationTest::with_config(Config {
        limit,
        ..Config::default()
    })
    .two_sample_with_progress(a, b, progress)
}
