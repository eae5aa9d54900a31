//! Lexical relevance scoring
//!
//! Turns question/answer spans into frequency structures and scores each
//! answer against its question by weighted token and n-gram cosine overlap.
//!
//! ## Modules
//!
//! - `features` - frequency bags and n-gram tables over annotated spans
//! - `similarity` - cosine similarity and averaged n-gram overlap
//! - `scorer` - per-answer relevance scores

pub mod features;
pub mod scorer;
pub mod similarity;

pub use features::{ngram_counts, token_counts, FrequencyBag, NGramTable};
pub use scorer::{
    apply_scores, score_answers, score_pair, AnswerScore, PairScore, NGRAM_WEIGHT, TOKEN_WEIGHT,
};
pub use similarity::{cosine, ngram_overlap};
