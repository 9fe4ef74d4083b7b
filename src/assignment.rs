//! Lazy enumeration and sampling of assignment spaces.
//!
//! A permutation test walks a space of label reassignments: sign vectors
//! for the one-sample test (2^n of them), k-subsets of the pooled
//! observations for the two-sample test (C(n, k) of them). Both spaces are
//! produced one assignment at a time with O(n) state; neither is ever
//! materialized.
//!
//! Exact mode enumerates every member once in a fixed deterministic order
//! and always starts at the identity assignment (all `+1` signs, or the
//! subset `{0, .., k-1}` matching the true group split). Sampled mode
//! draws a bounded number of members uniformly; for combinations the draws
//! are **distinct** indices into the space, decoded through the
//! combinatorial number system, so Monte-Carlo runs never evaluate the
//! same split twice. The orchestrators account the identity assignment
//! separately in sampled mode, which is why the sampled constructors take
//! the number of *additional* draws and never produce the identity.
//!
//! # Randomness
//!
//! Sampling uses the same generator the rest of the codebase uses for
//! Monte-Carlo work: `Xoshiro256PlusPlus`, seeded per test invocation for
//! reproducibility.

use std::collections::HashSet;

use rand::Rng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Checked binomial coefficient C(n, k).
///
/// `None` means the computation exceeds `u128`. The intermediate running
/// product is up to k times the final value, so results within a factor k
/// of `u128::MAX` also report `None`; callers treat `None` as "larger
/// than any practical enumeration budget", where that slack is harmless.
pub fn binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // Multiply before dividing: the running product C(n, i+1) * (i+1)
        // stays integral at every step.
        acc = acc.checked_mul((n - i) as u128)? / (i as u128 + 1);
    }
    Some(acc)
}

/// Decode a combination index into its k-subset of `{0..n-1}`.
///
/// Implements the combinatorial number system: for each slot rank r from
/// k down to 1, take the largest v with C(v, r) <= index, consume C(v, r)
/// from the index, and continue. This is a bijection between
/// `[0, C(n, k))` and the k-subsets, with index 0 mapping to
/// `{0, .., k-1}`. The returned subset is sorted ascending.
pub fn decode_combination(mut index: u128, n: usize, k: usize) -> Vec<usize> {
    debug_assert!(binomial(n, k).map_or(true, |c| index < c));
    let mut subset = vec![0usize; k];
    let mut bound = n;
    for rank in (1..=k).rev() {
        let mut v = bound - 1;
        let consumed = loop {
            match binomial(v, rank) {
                Some(c) if c <= index => break c,
                _ => v -= 1,
            }
        };
        index -= consumed;
        subset[rank - 1] = v;
        bound = v;
    }
    debug_assert_eq!(index, 0, "combination index not fully consumed");
    subset
}

/// Lazy stream of sign vectors for the one-sample test.
///
/// Single-pass and not restartable; abandoning it early has no side
/// effects.
#[derive(Debug)]
pub enum SignAssignments {
    /// Every one of the 2^len sign vectors, in binary-counter order.
    ///
    /// Bit i of the counter selects the sign of element i (0 maps to +1),
    /// so counter value 0 is the identity assignment. Exact mode is only
    /// selected when 2^len fits the enumeration budget, so the counter
    /// fits in u64.
    Exact {
        /// Next counter value to emit.
        counter: u64,
        /// One past the last counter value (2^len).
        total: u64,
        /// Vector length.
        len: usize,
    },
    /// `remaining` vectors with independently uniform ±1 coordinates.
    ///
    /// Draws are independent; duplicates across draws are permitted.
    Sampled {
        /// Draws left to produce.
        remaining: usize,
        /// Vector length.
        len: usize,
        /// Per-invocation generator.
        rng: Xoshiro256PlusPlus,
    },
}

impl SignAssignments {
    /// Size of the sign space for a sample of `len` elements, 2^len.
    ///
    /// `None` when 2^len exceeds `u128`.
    pub fn space_size(len: usize) -> Option<u128> {
        u32::try_from(len).ok().and_then(|l| 1u128.checked_shl(l))
    }

    /// Enumerate all 2^len sign vectors in binary-counter order.
    pub fn exact(len: usize) -> Self {
        debug_assert!(len < 64, "exact sign enumeration sized beyond u64");
        Self::Exact {
            counter: 0,
            total: 1u64 << len,
            len,
        }
    }

    /// Draw `draws` independent uniform sign vectors.
    pub fn sampled(len: usize, draws: usize, rng: Xoshiro256PlusPlus) -> Self {
        Self::Sampled {
            remaining: draws,
            len,
            rng,
        }
    }
}

impl Iterator for SignAssignments {
    type Item = Vec<i8>;

    fn next(&mut self) -> Option<Vec<i8>> {
        match self {
            Self::Exact {
                counter,
                total,
                len,
            } => {
                if counter == total {
                    return None;
                }
                let bits = *counter;
                *counter += 1;
                Some(
                    (0..*len)
                        .map(|i| if (bits >> i) & 1 == 0 { 1 } else { -1 })
                        .collect(),
                )
            }
            Self::Sampled {
                remaining,
                len,
                rng,
            } => {
                if *remaining == 0 {
                    return None;
                }
                *remaining -= 1;
                Some((0..*len).map(|_| if rng.gen() { 1 } else { -1 }).collect())
            }
        }
    }
}

/// Lazy stream of k-subsets of `{0..n-1}` for the two-sample test.
///
/// Single-pass and not restartable, like [`SignAssignments`].
#[derive(Debug)]
pub enum CombinationAssignments {
    /// All C(n, k) subsets in lexicographic order, starting at the
    /// identity `{0, .., k-1}`.
    Exact {
        /// Next subset to emit; `None` once exhausted.
        next: Option<Vec<usize>>,
        /// Pool size.
        n: usize,
    },
    /// Distinct sampled indices, decoded on demand.
    Indexed {
        /// Drawn indices, all in `[1, C(n, k))`, pairwise distinct.
        indices: std::vec::IntoIter<u128>,
        /// Pool size.
        n: usize,
        /// Subset size.
        k: usize,
    },
    /// Distinct sampled subsets for spaces too large to index in u128.
    Direct {
        /// Pre-drawn subsets, pairwise distinct, identity excluded.
        subsets: std::vec::IntoIter<Vec<usize>>,
    },
}

impl CombinationAssignments {
    /// Size of the combination space, C(n, k).
    ///
    /// `None` when the count exceeds `u128`.
    pub fn space_size(n: usize, k: usize) -> Option<u128> {
        binomial(n, k)
    }

    /// Enumerate all C(n, k) subsets in lexicographic order.
    pub fn exact(n: usize, k: usize) -> Self {
        Self::Exact {
            next: Some((0..k).collect()),
            n,
        }
    }

    /// Draw `draws` distinct non-identity subsets.
    ///
    /// When C(n, k) fits in `u128` the draws are distinct indices from
    /// `[1, C(n, k))` via Floyd's sampling algorithm, decoded through
    /// [`decode_combination`]. Beyond `u128` the indices cannot be
    /// represented, so subsets are drawn directly and de-duplicated; at
    /// that scale collisions are unobservable, but distinctness is still
    /// enforced.
    pub fn sampled(n: usize, k: usize, draws: usize, mut rng: Xoshiro256PlusPlus) -> Self {
        match binomial(n, k) {
            Some(space) => {
                let indices = sample_distinct_indices(space, draws, &mut rng);
                Self::Indexed {
                    indices: indices.into_iter(),
                    n,
                    k,
                }
            }
            None => {
                let subsets = sample_distinct_subsets(n, k, draws, &mut rng);
                Self::Direct {
                    subsets: subsets.into_iter(),
                }
            }
        }
    }
}

impl Iterator for CombinationAssignments {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        match self {
            Self::Exact { next, n } => {
                let current = next.take()?;
                *next = lex_successor(&current, *n);
                Some(current)
            }
            Self::Indexed { indices, n, k } => {
                let index = indices.next()?;
                Some(decode_combination(index, *n, *k))
            }
            Self::Direct { subsets } => subsets.next(),
        }
    }
}

/// Lexicographic successor of a sorted k-subset of `{0..n-1}`, or `None`
/// at the last subset.
fn lex_successor(subset: &[usize], n: usize) -> Option<Vec<usize>> {
    let k = subset.len();
    for i in (0..k).rev() {
        if subset[i] < n - k + i {
            let mut next = subset.to_vec();
            next[i] += 1;
            for j in i + 1..k {
                next[j] = next[j - 1] + 1;
            }
            return Some(next);
        }
    }
    None
}

/// Floyd's algorithm: `draws` distinct values from `{1, .., space-1}`.
///
/// Requires `draws < space`, which the exact/sampled mode switch
/// guarantees (`space > limit >= draws + 1`).
fn sample_distinct_indices(
    space: u128,
    draws: usize,
    rng: &mut Xoshiro256PlusPlus,
) -> Vec<u128> {
    debug_assert!((draws as u128) < space);
    let mut seen: HashSet<u128> = HashSet::with_capacity(draws);
    let mut order = Vec::with_capacity(draws);
    let hi = space - 1;
    for j in (hi - draws as u128 + 1)..=hi {
        let candidate = rng.gen_range(1..=j);
        if seen.insert(candidate) {
            order.push(candidate);
        } else {
            seen.insert(j);
            order.push(j);
        }
    }
    order
}

/// `draws` distinct random k-subsets, identity excluded, for spaces whose
/// size overflows u128.
fn sample_distinct_subsets(
    n: usize,
    k: usize,
    draws: usize,
    rng: &mut Xoshiro256PlusPlus,
) -> Vec<Vec<usize>> {
    let identity: Vec<usize> = (0..k).collect();
    let mut seen: HashSet<Vec<usize>> = HashSet::with_capacity(draws + 1);
    seen.insert(identity);
    let mut out = Vec::with_capacity(draws);
    while out.len() < draws {
        let subset = random_subset(n, k, rng);
        if seen.insert(subset.clone()) {
            out.push(subset);
        }
    }
    out
}

/// One uniform random k-subset of `{0..n-1}` (Floyd over positions),
/// sorted ascending.
fn random_subset(n: usize, k: usize, rng: &mut Xoshiro256PlusPlus) -> Vec<usize> {
    let mut seen: HashSet<usize> = HashSet::with_capacity(k);
    let mut subset = Vec::with_capacity(k);
    for j in (n - k)..n {
        let candidate = rng.gen_range(0..=j);
        if seen.insert(candidate) {
            subset.push(candidate);
        } else {
            seen.insert(j);
            subset.push(j);
        }
    }
    subset.sort_unstable();
    subset
}
