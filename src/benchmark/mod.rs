//! Benchmark infrastructure
//!
//! Ranks scored answers and evaluates ranking quality against ground truth.
//!
//! ## Modules
//!
//! - `precision` - per-question precision-at-N and run-level aggregation

pub mod precision;

pub use precision::{
    rank_answers, PrecisionAccumulator, QuestionMetrics, RankedAnswer, RankingQualityMetrics,
};
