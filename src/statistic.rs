//! Test statistics and the 3-way comparison against the reference.
//!
//! Both test families use a sum statistic: the signed sum of the sample
//! for the one-sample test, and the sum of the elements assigned to group
//! A for the two-sample test. Each candidate statistic is compared against
//! the observed reference statistic in three ways at once (lesser,
//! greater, more extreme in magnitude); the running tallies divided by the
//! number of assignments are the one-sided and two-sided p-values.

use serde::{Deserialize, Serialize};

/// Running tallies of how candidate statistics compare to the reference.
///
/// Each processed assignment increments `lesser` if its statistic is `<=`
/// the reference, `greater` if `>=`, and `more_extreme` if its magnitude
/// is at least the reference's. A candidate that ties the reference counts
/// in all three, so `lesser + greater` can exceed the number of
/// assignments. Tallies never decrease.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// Assignments with statistic `<=` reference.
    pub lesser: u64,
    /// Assignments with statistic `>=` reference.
    pub greater: u64,
    /// Assignments with `|statistic| >= |reference|`.
    pub more_extreme: u64,
}

impl Counts {
    /// Fold one candidate statistic into the tallies.
    pub fn record(&mut self, reference: f64, candidate: f64) {
        self.lesser += u64::from(candidate <= reference);
        self.greater += u64::from(candidate >= reference);
        self.more_extreme += u64::from(candidate.abs() >= reference.abs());
    }
}

/// Statistic for a sign assignment: `sum(values[i] * signs[i])`.
pub fn sign_statistic(values: &[f64], signs: &[i8]) -> f64 {
    debug_assert_eq!(values.len(), signs.len());
    values
        .iter()
        .zip(signs)
        .map(|(&v, &s)| v * f64::from(s))
        .sum()
}

/// Statistic for a combination assignment: the sum of the pooled elements
/// at the positions assigned to group A.
pub fn subset_statistic(pool: &[f64], subset: &[usize]) -> f64 {
    subset.iter().map(|&i| pool[i]).sum()
}
