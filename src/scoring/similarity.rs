//! Cosine similarity over frequency structures
//!
//! Two scores feed the answer ranking:
//!
//! - [`cosine`] - cosine similarity between two frequency bags
//! - [`ngram_overlap`] - per-length cosine averaged over the lengths present
//!   in the driving table
//!
//! `ngram_overlap` is deliberately asymmetric: only lengths present in the
//! driving table (the answer's, at the call site) are visited, so a length
//! present only in the other table never contributes. Callers rely on this
//! exact behavior; do not "fix" it by unioning the lengths.

use super::features::{FrequencyBag, NGramTable};

/// Cosine similarity between two frequency bags.
///
/// Dot product over `a`'s keys (absent keys in `b` contribute 0) divided by
/// the product of Euclidean norms. Either bag empty yields 0.0 rather than a
/// division error. Numerically symmetric despite the asymmetric iteration.
pub fn cosine(a: &FrequencyBag, b: &FrequencyBag) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .map(|(key, &count)| f64::from(count) * f64::from(b.get(key).copied().unwrap_or(0)))
        .sum();

    dot / (squared_norm(a) * squared_norm(b)).sqrt()
}

/// Sum of squared counts, the squared Euclidean norm of a bag
fn squared_norm(bag: &FrequencyBag) -> f64 {
    bag.values().map(|&count| f64::from(count) * f64::from(count)).sum()
}

/// Average per-length cosine between two n-gram tables.
///
/// For every length present in `driving`, computes the cosine against the
/// matching row of `other` (a missing row counts as an empty bag, so it
/// contributes 0), then averages over the number of lengths in `driving`.
/// Returns 0.0 when `driving` has no rows.
pub fn ngram_overlap(driving: &NGramTable, other: &NGramTable) -> f64 {
    let mut total = 0.0;
    let mut row_count = 0usize;

    for (len, row) in driving.rows() {
        let score = match other.row(len) {
            Some(other_row) => cosine(row, other_row),
            None => 0.0,
        };
        total += score;
        row_count += 1;
    }

    if row_count > 0 {
        total / row_count as f64
    } else {
        0.0
    }
}
