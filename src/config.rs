//! Configuration for permutation tests.

use crate::error::TestError;

/// Default enumeration budget: exact up to 10,000 assignments, Monte-Carlo
/// sampling with 10,000 draws beyond that.
pub const DEFAULT_LIMIT: usize = 10_000;

/// Options shared by the one-sample and two-sample tests.
///
/// Usually built through [`PermutationTest`](crate::PermutationTest);
/// constructing a `Config` directly is supported for callers that load
/// settings from elsewhere, in which case the limit is validated when the
/// test runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Enumeration budget.
    ///
    /// The full assignment space is enumerated exactly when its size is at
    /// most `limit`; otherwise exactly `limit` assignments are evaluated
    /// by Monte-Carlo sampling. Must be positive. Default: 10,000.
    pub limit: usize,

    /// Rank-transform the data before testing.
    ///
    /// The one-sample test applies the signed-rank transform (Wilcoxon),
    /// the two-sample test ranks the pooled data jointly and splits it
    /// back (Wilcoxon-Mann-Whitney / rank-sum). Default: false
    /// (Fisher/Pitman test on the raw values).
    pub ranked: bool,

    /// Keep tied ranks fractional instead of rounding to integers.
    ///
    /// Only relevant with `ranked`. Rounding matches the classic integer
    /// rank tables but distorts heavy-tie inputs; fractional ranks give
    /// exact Wilcoxon behavior under ties. Default: false (round).
    pub fractional_ranks: bool,

    /// Seed for the Monte-Carlo sampler.
    ///
    /// `Some(seed)` makes sampled runs reproducible; `None` seeds from OS
    /// entropy. Exact runs involve no randomness either way.
    /// Default: None.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            ranked: false,
            fractional_ranks: false,
            seed: None,
        }
    }
}

impl Config {
    pub(crate) fn validate(&self) -> Result<(), TestError> {
        if self.limit == 0 {
            return Err(TestError::InvalidConfiguration {
                message: "limit must be > 0".to_string(),
            });
        }
        Ok(())
    }
}
