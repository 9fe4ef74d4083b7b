//! Rank transforms for tie-robust test variants.
//!
//! Replacing raw observations with their ranks turns the Fisher/Pitman
//! permutation tests into their Wilcoxon / Wilcoxon-Mann-Whitney
//! counterparts. Ties are resolved by averaging: tied values all receive
//! the mean of the positions they would occupy in the ascending sort
//! (1-based), so `[10, 20, 20, 30]` gets fractional ranks
//! `[1, 2.5, 2.5, 4]`.
//!
//! The default transforms round the averaged ranks to the nearest integer
//! (half away from zero, so `2.5 -> 3`). Rounding can distort the exact
//! tie structure of inputs with many ties; the `_fractional` variants keep
//! the averaged ranks untouched for exact Wilcoxon behavior under ties.
//!
//! # Input Requirements
//!
//! All input values must be finite. The transforms are pure functions used
//! after the orchestrators have already validated their inputs, so this is
//! enforced with debug assertions only.

/// Average ranks of `values`, rounded to the nearest integer.
///
/// # Example
///
/// ```
/// let ranks = permutest::rank(&[10.0, 20.0, 20.0, 30.0]);
/// assert_eq!(ranks, vec![1.0, 3.0, 3.0, 4.0]);
/// ```
pub fn rank(values: &[f64]) -> Vec<f64> {
    average_ranks(values).into_iter().map(f64::round).collect()
}

/// Average ranks of `values` with ties kept as fractional ranks.
///
/// # Example
///
/// ```
/// let ranks = permutest::rank_fractional(&[10.0, 20.0, 20.0, 30.0]);
/// assert_eq!(ranks, vec![1.0, 2.5, 2.5, 4.0]);
/// ```
pub fn rank_fractional(values: &[f64]) -> Vec<f64> {
    average_ranks(values)
}

/// Signed ranks: rank the absolute values, reattach each element's sign.
///
/// Zero counts as positive. Ranks are rounded like [`rank`].
///
/// # Example
///
/// ```
/// let ranks = permutest::signed_rank(&[-3.0, 1.0, -2.0]);
/// assert_eq!(ranks, vec![-3.0, 1.0, -2.0]);
/// ```
pub fn signed_rank(values: &[f64]) -> Vec<f64> {
    signed_from(values, rank)
}

/// Signed ranks with ties kept fractional, see [`rank_fractional`].
pub fn signed_rank_fractional(values: &[f64]) -> Vec<f64> {
    signed_from(values, rank_fractional)
}

fn signed_from(values: &[f64], ranker: fn(&[f64]) -> Vec<f64>) -> Vec<f64> {
    let magnitudes: Vec<f64> = values.iter().map(|v| v.abs()).collect();
    ranker(&magnitudes)
        .into_iter()
        .zip(values)
        .map(|(r, &v)| if v < 0.0 { -r } else { r })
        .collect()
}

/// Average rank of each element (1-based, ties averaged, no rounding).
fn average_ranks(values: &[f64]) -> Vec<f64> {
    debug_assert!(
        values.iter().all(|v| v.is_finite()),
        "rank transform requires finite inputs"
    );

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        // Positions start..=end share the average of their 1-based ranks.
        let average = (start + end) as f64 / 2.0 + 1.0;
        for &index in &order[start..=end] {
            ranks[index] = average;
        }
        start = end + 1;
    }
    ranks
}
