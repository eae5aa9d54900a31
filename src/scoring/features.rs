//! Frequency features over annotated spans
//!
//! Builds the word-frequency bag and length-indexed n-gram table for a text
//! span. Matching is case-sensitive; the only normalization anywhere is the
//! exclusion of punctuation-only tokens from the bag.

use crate::annotate::Annotations;
use crate::corpus::Span;
use std::collections::HashMap;

/// Mapping from surface string to occurrence count within a span
pub type FrequencyBag = HashMap<String, u32>;

/// N-gram frequencies indexed by n-gram length
///
/// Conceptually a collection of [`FrequencyBag`]s, one row per length.
#[derive(Debug, Clone, Default)]
pub struct NGramTable {
    rows: HashMap<usize, FrequencyBag>,
}

impl NGramTable {
    /// Count one occurrence of `surface` at length `len`
    pub fn add(&mut self, len: usize, surface: &str) {
        *self
            .rows
            .entry(len)
            .or_default()
            .entry(surface.to_string())
            .or_insert(0) += 1;
    }

    /// The frequency bag for one n-gram length, if present
    pub fn row(&self, len: usize) -> Option<&FrequencyBag> {
        self.rows.get(&len)
    }

    /// All (length, bag) rows
    pub fn rows(&self) -> impl Iterator<Item = (usize, &FrequencyBag)> {
        self.rows.iter().map(|(&len, bag)| (len, bag))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Whether a token surface is punctuation only
fn is_punctuation(surface: &str) -> bool {
    !surface.is_empty() && surface.chars().all(|c| c.is_ascii_punctuation())
}

/// Count token surfaces within `span`, skipping punctuation-only tokens.
///
/// An empty span yields an empty bag.
pub fn token_counts(text: &str, span: Span, annotations: &Annotations) -> FrequencyBag {
    let mut bag = FrequencyBag::new();
    for token in annotations.tokens_within(span) {
        let surface = token.span.covered_text(text);
        if is_punctuation(surface) {
            continue;
        }
        *bag.entry(surface.to_string()).or_insert(0) += 1;
    }
    bag
}

/// Count n-gram surfaces within `span`, keyed by (length, surface).
///
/// Length-1 n-grams are skipped; they duplicate token data.
pub fn ngram_counts(text: &str, span: Span, annotations: &Annotations) -> NGramTable {
    let mut table = NGramTable::default();
    for ngram in annotations.ngrams_within(span) {
        if ngram.len == 1 {
            continue;
        }
        table.add(ngram.len, ngram.span.covered_text(text));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::annotate;

    fn whole(text: &str) -> Span {
        Span::new(0, text.len())
    }

    #[test]
    fn test_token_counts_skips_punctuation() {
        let text = "Lincoln, Booth, and Booth.";
        let annotations = annotate(text, 3);
        let bag = token_counts(text, whole(text), &annotations);
        assert_eq!(bag.get("Booth"), Some(&2));
        assert_eq!(bag.get("Lincoln"), Some(&1));
        assert_eq!(bag.get("and"), Some(&1));
        assert_eq!(bag.get(","), None);
        assert_eq!(bag.get("."), None);
    }

    #[test]
    fn test_token_counts_case_sensitive() {
        let text = "Paris paris";
        let annotations = annotate(text, 2);
        let bag = token_counts(text, whole(text), &annotations);
        assert_eq!(bag.get("Paris"), Some(&1));
        assert_eq!(bag.get("paris"), Some(&1));
    }

    #[test]
    fn test_token_counts_empty_span() {
        let text = "some words";
        let annotations = annotate(text, 2);
        let bag = token_counts(text, Span::new(0, 0), &annotations);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_ngram_counts_rows() {
        let text = "one two one two";
        let annotations = annotate(text, 3);
        let table = ngram_counts(text, whole(text), &annotations);

        let bigrams = table.row(2).unwrap();
        assert_eq!(bigrams.get("one two"), Some(&2));
        assert_eq!(bigrams.get("two one"), Some(&1));

        let trigrams = table.row(3).unwrap();
        assert_eq!(trigrams.get("one two one"), Some(&1));
        assert_eq!(trigrams.get("two one two"), Some(&1));

        assert!(table.row(1).is_none());
        assert!(table.row(4).is_none());
    }
}
