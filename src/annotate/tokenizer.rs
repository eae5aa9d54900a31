//! Punctuation-aware tokenizer and n-gram annotator
//!
//! Tokens are maximal runs of non-whitespace, non-punctuation characters;
//! each punctuation character is a token of its own. Case is preserved.
//! N-grams are contiguous token sequences of length 2 up to `max_ngram`;
//! length-1 n-grams are never produced since they duplicate token data.

use crate::corpus::Span;

/// Default maximum n-gram length
pub const DEFAULT_MAX_NGRAM: usize = 3;

/// A minimal text unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub span: Span,
}

/// A contiguous sequence of `len` tokens (len >= 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NGram {
    /// From the first token's begin to the last token's end
    pub span: Span,
    /// Number of tokens covered
    pub len: usize,
}

/// All annotations over one document's text
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    pub tokens: Vec<Token>,
    pub ngrams: Vec<NGram>,
}

impl Annotations {
    /// Tokens lying entirely within `span`
    pub fn tokens_within(&self, span: Span) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(move |t| span.contains(t.span))
    }

    /// N-grams lying entirely within `span`
    pub fn ngrams_within(&self, span: Span) -> impl Iterator<Item = &NGram> + '_ {
        self.ngrams.iter().filter(move |n| span.contains(n.span))
    }
}

/// Annotate `text` with tokens and n-grams of length 2..=`max_ngram`.
pub fn annotate(text: &str, max_ngram: usize) -> Annotations {
    let tokens = tokenize(text);

    let mut ngrams = Vec::new();
    for n in 2..=max_ngram {
        for window in tokens.windows(n) {
            ngrams.push(NGram {
                span: Span::new(window[0].span.begin, window[n - 1].span.end),
                len: n,
            });
        }
    }

    Annotations { tokens, ngrams }
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() || ch.is_ascii_punctuation() {
            if let Some(start) = word_start.take() {
                tokens.push(Token {
                    span: Span::new(start, i),
                });
            }
            if ch.is_ascii_punctuation() {
                tokens.push(Token {
                    span: Span::new(i, i + ch.len_utf8()),
                });
            }
        } else if word_start.is_none() {
            word_start = Some(i);
        }
    }

    if let Some(start) = word_start {
        tokens.push(Token {
            span: Span::new(start, text.len()),
        });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surfaces<'a>(text: &'a str, tokens: &[Token]) -> Vec<&'a str> {
        tokens.iter().map(|t| t.span.covered_text(text)).collect()
    }

    #[test]
    fn test_tokenize_splits_words_and_punctuation() {
        let text = "Booth shot Lincoln.";
        let tokens = tokenize(text);
        assert_eq!(surfaces(text, &tokens), vec!["Booth", "shot", "Lincoln", "."]);
    }

    #[test]
    fn test_tokenize_punctuation_run() {
        let text = "well--spoken";
        let tokens = tokenize(text);
        assert_eq!(surfaces(text, &tokens), vec!["well", "-", "-", "spoken"]);
    }

    #[test]
    fn test_tokenize_preserves_case() {
        let text = "Paris paris";
        let tokens = tokenize(text);
        assert_eq!(surfaces(text, &tokens), vec!["Paris", "paris"]);
    }

    #[test]
    fn test_annotate_ngram_lengths() {
        let text = "one two three four";
        let annotations = annotate(text, 3);
        assert_eq!(annotations.tokens.len(), 4);
        // 3 bigrams + 2 trigrams, no unigrams
        assert_eq!(annotations.ngrams.len(), 5);
        assert!(annotations.ngrams.iter().all(|n| n.len >= 2));
        assert_eq!(annotations.ngrams.iter().filter(|n| n.len == 2).count(), 3);
        assert_eq!(annotations.ngrams.iter().filter(|n| n.len == 3).count(), 2);
    }

    #[test]
    fn test_ngram_covered_text() {
        let text = "one two three";
        let annotations = annotate(text, 2);
        let bigrams: Vec<&str> = annotations
            .ngrams
            .iter()
            .map(|n| n.span.covered_text(text))
            .collect();
        assert_eq!(bigrams, vec!["one two", "two three"]);
    }

    #[test]
    fn test_containment_queries() {
        let text = "Q What is it?\nA 1 It is this.\n";
        let annotations = annotate(text, 2);

        // Question span: after "Q " to end of first line
        let question = Span::new(2, 13);
        let question_tokens: Vec<&str> = annotations
            .tokens_within(question)
            .map(|t| t.span.covered_text(text))
            .collect();
        assert_eq!(question_tokens, vec!["What", "is", "it", "?"]);

        // Bigrams within the question: "What is", "is it", "it ?". The
        // bigram spanning the "?" and the next line's "A" is not contained.
        assert_eq!(annotations.ngrams_within(question).count(), 3);
        let texts: Vec<&str> = annotations
            .ngrams_within(question)
            .map(|n| n.span.covered_text(text))
            .collect();
        assert_eq!(texts, vec!["What is", "is it", "it?"]);
    }
}
