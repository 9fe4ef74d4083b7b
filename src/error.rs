//! Error types for permutation tests.

use std::fmt;

/// Error returned when a permutation test cannot run.
///
/// All failures are detected up front, before any assignment is enumerated;
/// there is never a partial result. Failures are deterministic, not
/// transient, so retrying with the same inputs is pointless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestError {
    /// Input data is unusable: an empty sample, or a non-finite value.
    ///
    /// NaN and infinity are rejected rather than propagated because the
    /// statistic comparison (`<=`, `>=`) is meaningless for NaN and would
    /// silently corrupt the counts.
    InvalidInput {
        /// Description of what was wrong with the input.
        message: String,
    },

    /// Configuration is unusable, e.g. an enumeration budget of zero.
    InvalidConfiguration {
        /// Description of the offending setting.
        message: String,
    },

    /// Paired samples of unequal length on the one-sample (difference) path.
    DimensionMismatch {
        /// Length of the first sample.
        left: usize,
        /// Length of the second sample.
        right: usize,
    },
}

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { message } => write!(f, "invalid input: {message}"),
            Self::InvalidConfiguration { message } => {
                write!(f, "invalid configuration: {message}")
            }
            Self::DimensionMismatch { left, right } => write!(
                f,
                "paired samples must have equal length, got {left} and {right}"
            ),
        }
    }
}

impl std::error::Error for TestError {}

/// Reject empty or non-finite samples before any enumeration starts.
///
/// `label` names the offending sample in the error message ("sample",
/// "first", "second").
pub(crate) fn validate_sample(label: &str, values: &[f64]) -> Result<(), TestError> {
    if values.is_empty() {
        return Err(TestError::InvalidInput {
            message: format!("{label} sample is empty"),
        });
    }
    if let Some((index, value)) = values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite())
    {
        return Err(TestError::InvalidInput {
            message: format!("{label} sample contains non-finite value {value} at index {index}"),
        });
    }
    Ok(())
}
