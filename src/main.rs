//! Answer-Ranking Benchmark CLI
//!
//! Scores candidate answers against their question by lexical overlap and
//! evaluates the resulting ranking against ground truth.
//!
//! ## Quick Start
//!
//! ```bash
//! # Evaluate a directory of question/answer documents
//! ./answer-benchmark run --docs ./documents
//!
//! # Save per-question and aggregate metrics as JSON
//! ./answer-benchmark run --docs ./documents --output results.json
//!
//! # Check a document set without scoring it
//! ./answer-benchmark validate --docs ./documents
//!
//! # Score a single question/answer pair
//! ./answer-benchmark score -q "what is capital of france" -a "paris is capital of france"
//! ```
//!
//! ## Document Format
//!
//! One document per file: a single `Q <text>` line followed by `A <0|1>
//! <text>` lines, where the flag is the ground-truth correctness label. A
//! single JSON document-set file is accepted as well (see `corpus::loader`).

mod annotate;
mod benchmark;
mod corpus;
mod scoring;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use annotate::{annotate, DEFAULT_MAX_NGRAM};
use benchmark::{PrecisionAccumulator, QuestionMetrics, RankingQualityMetrics};
use corpus::{load_documents, CorpusConfig};
use scoring::{apply_scores, score_answers, score_pair};

#[derive(Parser)]
#[command(name = "answer-benchmark")]
#[command(about = "Lexical answer-ranking benchmark with precision-at-N evaluation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark over a document set
    ///
    /// Each document is annotated, scored, and evaluated in turn; per-question
    /// reports stream to stdout and an aggregate summary closes the run.
    Run {
        /// Path to the document set (directory of text files, or a JSON file)
        #[arg(short, long)]
        docs: PathBuf,

        /// Write aggregate metrics as JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum n-gram length to annotate
        #[arg(long, default_value_t = DEFAULT_MAX_NGRAM)]
        max_ngram: usize,

        /// File extensions to load from a document directory
        #[arg(long, value_delimiter = ',')]
        extensions: Option<Vec<String>>,
    },

    /// Validate a document set without scoring it
    Validate {
        /// Path to the document set (directory of text files, or a JSON file)
        #[arg(short, long)]
        docs: PathBuf,
    },

    /// Score a single question/answer pair
    Score {
        /// Question text
        #[arg(short, long)]
        question: String,

        /// Answer text
        #[arg(short, long)]
        answer: String,

        /// Maximum n-gram length to annotate
        #[arg(long, default_value_t = DEFAULT_MAX_NGRAM)]
        max_ngram: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            docs,
            output,
            max_ngram,
            extensions,
        } => {
            run_benchmark(&docs, output.as_deref(), max_ngram, extensions)?;
        }

        Commands::Validate { docs } => {
            validate_docs(&docs)?;
        }

        Commands::Score {
            question,
            answer,
            max_ngram,
        } => {
            score_single(&question, &answer, max_ngram);
        }
    }

    Ok(())
}

/// Run the benchmark over every document in the set
fn run_benchmark(
    docs_path: &PathBuf,
    output: Option<&std::path::Path>,
    max_ngram: usize,
    extensions: Option<Vec<String>>,
) -> Result<()> {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              ANSWER RANKING BENCHMARK                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let mut config = CorpusConfig::new();
    if let Some(exts) = extensions {
        let ext_refs: Vec<&str> = exts.iter().map(|s| s.as_str()).collect();
        config = config.with_extensions(ext_refs);
    }

    // Load documents - use eprintln for progress (line-buffered even when piped)
    eprintln!("Loading documents from {:?}...", docs_path);
    let documents = load_documents(docs_path, &config)?;
    eprintln!("  Loaded {} documents (max n-gram: {})\n", documents.len(), max_ngram);

    let mut accumulator = PrecisionAccumulator::new();
    let mut question_metrics = Vec::new();
    let mut skipped = 0usize;

    // One document is fully scored and evaluated before the next begins.
    for mut doc in documents {
        let annotations = annotate(&doc.text, max_ngram);
        let scores = score_answers(&doc, &annotations);
        apply_scores(&mut doc, &scores);

        match QuestionMetrics::evaluate(&doc, &scores) {
            Some(metrics) => {
                println!("{}\n", metrics.format_report());
                accumulator.record(&metrics);
                question_metrics.push(metrics);
            }
            None => {
                eprintln!(
                    "  ⚠ Skipping '{}': no ground-truth-correct answers",
                    doc.id
                );
                skipped += 1;
            }
        }
    }

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                      BENCHMARK SUMMARY                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    if skipped > 0 {
        println!("  ⚠ {} documents skipped (no correct answers)", skipped);
    }

    match accumulator.finish() {
        Some(average) => println!("Average precision: {:.2}", average),
        None => println!("Average precision: no data"),
    }

    if let Some(output) = output {
        save_results(docs_path, output, max_ngram, question_metrics, skipped)?;
    }

    Ok(())
}

/// Save aggregate metrics as a JSON results file
fn save_results(
    docs_path: &std::path::Path,
    output: &std::path::Path,
    max_ngram: usize,
    question_metrics: Vec<QuestionMetrics>,
    skipped: usize,
) -> Result<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[derive(serde::Serialize)]
    struct BenchmarkOutput {
        timestamp: String,
        config: BenchmarkConfigOutput,
        result: RankingQualityMetrics,
    }

    #[derive(serde::Serialize)]
    struct BenchmarkConfigOutput {
        docs: String,
        max_ngram: usize,
    }

    let result = RankingQualityMetrics::aggregate(question_metrics, skipped);
    eprintln!("\n{}", result.format_summary());

    let output_data = BenchmarkOutput {
        timestamp: chrono::Utc::now().to_rfc3339(),
        config: BenchmarkConfigOutput {
            docs: docs_path.to_string_lossy().to_string(),
            max_ngram,
        },
        result,
    };

    let json = serde_json::to_string_pretty(&output_data)?;
    std::fs::write(output, &json)
        .with_context(|| format!("Failed to write results to {}", output.display()))?;
    println!("\nResults saved to {:?}", output);

    Ok(())
}

/// Validate a document set and report its shape
fn validate_docs(docs_path: &PathBuf) -> Result<()> {
    println!("Validating {:?}...", docs_path);

    let documents = load_documents(docs_path, &CorpusConfig::new())?;

    println!("✓ Valid document set");
    println!("  Documents: {}", documents.len());

    let mut total_answers = 0;
    let mut without_correct = 0;

    for doc in &documents {
        let correct = doc.answers.iter().filter(|a| a.is_correct).count();
        total_answers += doc.answers.len();
        if correct == 0 {
            without_correct += 1;
            println!(
                "  ⚠ '{}' has no correct answers (will be skipped by run)",
                doc.id
            );
        }
    }

    println!("  Answers: {}", total_answers);
    if without_correct == 0 {
        println!("  Every document has at least one correct answer");
    }

    Ok(())
}

/// Score one ad-hoc question/answer pair and print the components
fn score_single(question: &str, answer: &str, max_ngram: usize) {
    let pair = score_pair(question, answer, max_ngram);

    println!("Question:  {}", question);
    println!("Answer:    {}", answer);
    println!();
    println!("  Token score:  {:.4}", pair.token_score);
    println!("  N-gram score: {:.4}", pair.ngram_score);
    println!("  Relevance:    {:.4}", pair.relevance);
}
