//! Precision-at-N ranking evaluation
//!
//! Ranks a question's answers by computed relevance and measures precision at
//! N, where N is the number of ground-truth-correct answers. A running
//! average across documents is kept in an explicit accumulator value folded
//! by the caller, so repeated runs never share hidden state.
//!
//! ## Edge policies
//!
//! - Equal confidences rank in original input order (explicit secondary sort
//!   key; ranking is fully deterministic).
//! - A question with zero ground-truth-correct answers cannot be evaluated;
//!   it yields `None` and the caller excludes it from the aggregate.
//! - An accumulator that never recorded a document reports no average.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::corpus::Document;
use crate::scoring::AnswerScore;

/// One answer in ranked order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedAnswer {
    /// Answer text
    pub text: String,
    /// Ground-truth correctness label
    pub is_correct: bool,
    /// Computed relevance score
    pub confidence: f64,
    /// Rank in results (1-indexed)
    pub rank: usize,
}

/// Rank a document's answers by relevance score, descending.
///
/// Ties break by original input order, so the ordering is a total order even
/// when scores are equal. Answers missing from `scores` rank as 0.0.
pub fn rank_answers(doc: &Document, scores: &[AnswerScore]) -> Vec<RankedAnswer> {
    let by_index: HashMap<usize, f64> = scores.iter().map(|s| (s.answer, s.score)).collect();

    let mut indexed: Vec<(usize, f64)> = (0..doc.answers.len())
        .map(|i| (i, by_index.get(&i).copied().unwrap_or(0.0)))
        .collect();

    indexed.sort_by(|a, b| {
        // Primary: confidence descending
        match b.1.partial_cmp(&a.1) {
            Some(std::cmp::Ordering::Equal) | None => {
                // Secondary: input order ascending (deterministic tie-break)
                a.0.cmp(&b.0)
            }
            Some(ord) => ord,
        }
    });

    indexed
        .into_iter()
        .enumerate()
        .map(|(rank, (index, confidence))| RankedAnswer {
            text: doc.answer_text(index).to_string(),
            is_correct: doc.answers[index].is_correct,
            confidence,
            rank: rank + 1,
        })
        .collect()
}

/// Per-question evaluation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionMetrics {
    /// Document identifier
    pub id: String,
    /// Question text
    pub question: String,
    /// N: number of ground-truth-correct answers
    pub total_correct: usize,
    /// Correct answers among the top N ranked
    pub num_correct: usize,
    /// num_correct / total_correct
    pub precision_at_n: f64,
    /// All answers in ranked order
    pub ranking: Vec<RankedAnswer>,
}

impl QuestionMetrics {
    /// Evaluate one scored document.
    ///
    /// Returns `None` when the document has no ground-truth-correct answers;
    /// such documents are excluded from the aggregate.
    pub fn evaluate(doc: &Document, scores: &[AnswerScore]) -> Option<Self> {
        let ranking = rank_answers(doc, scores);

        let total_correct = ranking.iter().filter(|r| r.is_correct).count();
        if total_correct == 0 {
            return None;
        }

        let num_correct = ranking
            .iter()
            .take(total_correct)
            .filter(|r| r.is_correct)
            .count();

        Some(Self {
            id: doc.id.clone(),
            question: doc.question_text().to_string(),
            total_correct,
            num_correct,
            precision_at_n: num_correct as f64 / total_correct as f64,
            ranking,
        })
    }

    /// Format the per-question report block.
    ///
    /// One line per answer in ranked order with a `+`/`-` correctness marker
    /// and the confidence to two decimals, then the precision line.
    pub fn format_report(&self) -> String {
        let mut out = format!("Question: {}\n", self.question);
        for answer in &self.ranking {
            let marker = if answer.is_correct { "+" } else { "-" };
            out.push_str(&format!(
                "{} {:.2} {}\n",
                marker, answer.confidence, answer.text
            ));
        }
        out.push_str(&format!(
            "Precision at {}: {:.2}",
            self.total_correct, self.precision_at_n
        ));
        out
    }
}

/// Running precision average for one evaluation run
///
/// An explicit value: the caller folds one `record` per evaluated document
/// and then consumes the accumulator with `finish`. Because `finish` takes
/// ownership, a reported run cannot be re-entered; a new run starts from
/// `PrecisionAccumulator::new()`.
#[derive(Debug, Default)]
pub struct PrecisionAccumulator {
    sum: f64,
    documents: usize,
}

impl PrecisionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one evaluated document into the run. Called exactly once per
    /// document.
    pub fn record(&mut self, metrics: &QuestionMetrics) {
        self.sum += metrics.precision_at_n;
        self.documents += 1;
    }

    /// Documents recorded so far
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Final average precision, or `None` when no documents were recorded.
    pub fn finish(self) -> Option<f64> {
        if self.documents == 0 {
            None
        } else {
            Some(self.sum / self.documents as f64)
        }
    }
}

/// Aggregated ranking quality across all evaluated questions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingQualityMetrics {
    /// Number of questions that contributed to the average
    pub question_count: usize,
    /// Questions skipped because they had no correct answers
    pub questions_skipped: usize,
    /// Mean precision-at-N across evaluated questions
    pub mean_precision: f64,
    /// Individual question results
    pub question_metrics: Vec<QuestionMetrics>,
}

impl RankingQualityMetrics {
    /// Aggregate per-question results for the results file.
    pub fn aggregate(question_metrics: Vec<QuestionMetrics>, questions_skipped: usize) -> Self {
        let count = question_metrics.len();
        if count == 0 {
            return Self {
                question_count: 0,
                questions_skipped,
                mean_precision: 0.0,
                question_metrics: vec![],
            };
        }

        let mean_precision =
            question_metrics.iter().map(|m| m.precision_at_n).sum::<f64>() / count as f64;

        Self {
            question_count: count,
            questions_skipped,
            mean_precision,
            question_metrics,
        }
    }

    /// Format as a summary string
    pub fn format_summary(&self) -> String {
        format!(
            "Mean P@N: {:.3} | Questions: {} (skipped: {})",
            self.mean_precision, self.question_count, self.questions_skipped
        )
    }
}
