//! Per-answer relevance scoring
//!
//! Scores every answer in a document against its question. Token overlap and
//! n-gram overlap are combined with fixed weights of 0.8 and 0.2.
//!
//! The scorer returns [`AnswerScore`] values instead of mutating the
//! document; [`apply_scores`] attaches them as answer confidences.

use serde::{Deserialize, Serialize};

use super::features::{ngram_counts, token_counts};
use super::similarity::{cosine, ngram_overlap};
use crate::annotate::{annotate, Annotations};
use crate::corpus::{Document, Span};

/// Weight of the token-overlap cosine in the final relevance
pub const TOKEN_WEIGHT: f64 = 0.8;

/// Weight of the n-gram-overlap score in the final relevance
pub const NGRAM_WEIGHT: f64 = 0.2;

/// One answer's computed relevance, by answer index within its document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnswerScore {
    /// Index of the answer in `Document::answers`
    pub answer: usize,
    /// Weighted relevance score
    pub score: f64,
}

/// Score every answer in `doc` against its question.
///
/// The question's features are computed once and shared across answers. The
/// n-gram overlap is always driven by the answer's table. Returns one score
/// per answer, in answer order.
pub fn score_answers(doc: &Document, annotations: &Annotations) -> Vec<AnswerScore> {
    let question_tokens = token_counts(&doc.text, doc.question, annotations);
    let question_ngrams = ngram_counts(&doc.text, doc.question, annotations);

    doc.answers
        .iter()
        .enumerate()
        .map(|(index, answer)| {
            let answer_tokens = token_counts(&doc.text, answer.span, annotations);
            let answer_ngrams = ngram_counts(&doc.text, answer.span, annotations);

            let token_score = cosine(&question_tokens, &answer_tokens);
            let ngram_score = ngram_overlap(&answer_ngrams, &question_ngrams);

            AnswerScore {
                answer: index,
                score: TOKEN_WEIGHT * token_score + NGRAM_WEIGHT * ngram_score,
            }
        })
        .collect()
}

/// Attach computed scores to the document's answers.
///
/// Writes each answer's `confidence` exactly once.
pub fn apply_scores(doc: &mut Document, scores: &[AnswerScore]) {
    for score in scores {
        doc.answers[score.answer].confidence = Some(score.score);
    }
}

/// Component scores for one ad-hoc question/answer pair
#[derive(Debug, Clone, Copy)]
pub struct PairScore {
    pub token_score: f64,
    pub ngram_score: f64,
    pub relevance: f64,
}

/// Score a single question/answer pair outside any document.
pub fn score_pair(question: &str, answer: &str, max_ngram: usize) -> PairScore {
    let question_annotations = annotate(question, max_ngram);
    let answer_annotations = annotate(answer, max_ngram);

    let question_span = Span::new(0, question.len());
    let answer_span = Span::new(0, answer.len());

    let question_tokens = token_counts(question, question_span, &question_annotations);
    let question_ngrams = ngram_counts(question, question_span, &question_annotations);
    let answer_tokens = token_counts(answer, answer_span, &answer_annotations);
    let answer_ngrams = ngram_counts(answer, answer_span, &answer_annotations);

    let token_score = cosine(&question_tokens, &answer_tokens);
    let ngram_score = ngram_overlap(&answer_ngrams, &question_ngrams);

    PairScore {
        token_score,
        ngram_score,
        relevance: TOKEN_WEIGHT * token_score + NGRAM_WEIGHT * ngram_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::DEFAULT_MAX_NGRAM;
    use crate::corpus::parse_document;

    const CAPITAL: &str = "\
Q what is capital of france
A 1 paris is capital of france
A 0 unrelated words only
";

    #[test]
    fn test_overlapping_answer_outscores_disjoint_answer() {
        let doc = parse_document("q1", CAPITAL).unwrap();
        let annotations = annotate(&doc.text, DEFAULT_MAX_NGRAM);
        let scores = score_answers(&doc, &annotations);

        assert_eq!(scores.len(), 2);
        assert!(scores[0].score > scores[1].score);
        // The disjoint answer shares no tokens or n-grams with the question.
        assert_eq!(scores[1].score, 0.0);
    }

    #[test]
    fn test_identical_answer_scores_one() {
        let text = "Q the exact same words\nA 1 the exact same words\n";
        let doc = parse_document("q1", text).unwrap();
        let annotations = annotate(&doc.text, DEFAULT_MAX_NGRAM);
        let scores = score_answers(&doc, &annotations);
        // Token cosine and every n-gram row cosine are all 1.0.
        assert!((scores[0].score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_apply_scores_sets_confidence_once() {
        let mut doc = parse_document("q1", CAPITAL).unwrap();
        let annotations = annotate(&doc.text, DEFAULT_MAX_NGRAM);
        let scores = score_answers(&doc, &annotations);

        assert!(doc.answers.iter().all(|a| a.confidence.is_none()));
        apply_scores(&mut doc, &scores);
        for (answer, score) in doc.answers.iter().zip(&scores) {
            assert_eq!(answer.confidence, Some(score.score));
        }
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let doc = parse_document("q1", CAPITAL).unwrap();
        let annotations = annotate(&doc.text, DEFAULT_MAX_NGRAM);
        let first = score_answers(&doc, &annotations);
        let second = score_answers(&doc, &annotations);
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_pair_matches_document_scoring() {
        let doc = parse_document("q1", CAPITAL).unwrap();
        let annotations = annotate(&doc.text, DEFAULT_MAX_NGRAM);
        let scores = score_answers(&doc, &annotations);

        let pair = score_pair(
            "what is capital of france",
            "paris is capital of france",
            DEFAULT_MAX_NGRAM,
        );
        assert!((pair.relevance - scores[0].score).abs() < 1e-12);
        assert!(
            (pair.relevance - (TOKEN_WEIGHT * pair.token_score + NGRAM_WEIGHT * pair.ngram_score))
                .abs()
                < 1e-12
        );
    }
}
