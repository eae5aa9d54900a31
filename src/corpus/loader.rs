//! Document loader for the answer-ranking benchmark
//!
//! Loads question/answer documents from disk. Each document carries exactly
//! one question and zero or more candidate answers with ground-truth
//! correctness labels.
//!
//! ## Plain-text format (one document per file)
//!
//! ```text
//! Q What is the capital of France?
//! A 1 Paris is the capital of France.
//! A 0 unrelated words only
//! ```
//!
//! The `A` flag is the ground-truth label: `1` correct, `0` incorrect.
//! Blank lines and lines starting with `#` are ignored.
//!
//! ## JSON format (one document set per file)
//!
//! ```json
//! {
//!   "metadata": { "name": "my-questions" },
//!   "documents": [
//!     {
//!       "id": "q001",
//!       "question": "What is the capital of France?",
//!       "answers": [
//!         { "text": "Paris is the capital of France.", "correct": true },
//!         { "text": "unrelated words only", "correct": false }
//!       ]
//!     }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A byte range into a document's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Start offset (inclusive)
    pub begin: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// The text this span covers
    pub fn covered_text<'a>(&self, text: &'a str) -> &'a str {
        &text[self.begin..self.end]
    }

    /// Whether `other` lies entirely within this span
    pub fn contains(&self, other: Span) -> bool {
        other.begin >= self.begin && other.end <= self.end
    }
}

/// A candidate answer within a document
///
/// `is_correct` is externally supplied ground truth and never changes.
/// `confidence` is `None` until the scorer has run; it is written exactly
/// once when the caller attaches the computed scores.
#[derive(Debug, Clone)]
pub struct Answer {
    /// Location of the answer text within the document
    pub span: Span,
    /// Ground-truth correctness label
    pub is_correct: bool,
    /// Computed relevance score (populated by `scoring::apply_scores`)
    pub confidence: Option<f64>,
}

impl Answer {
    pub fn new(span: Span, is_correct: bool) -> Self {
        Self {
            span,
            is_correct,
            confidence: None,
        }
    }
}

/// A single benchmark document: one question plus its candidate answers
#[derive(Debug, Clone)]
pub struct Document {
    /// Identifier (relative file path or JSON id)
    pub id: String,
    /// Full raw text; all spans index into this buffer
    pub text: String,
    /// Location of the question text
    pub question: Span,
    /// Candidate answers in input order
    pub answers: Vec<Answer>,
}

impl Document {
    /// The question's covered text
    pub fn question_text(&self) -> &str {
        self.question.covered_text(&self.text)
    }

    /// A given answer's covered text
    pub fn answer_text(&self, index: usize) -> &str {
        self.answers[index].span.covered_text(&self.text)
    }
}

// =============================================================================
// PLAIN-TEXT PARSING
// =============================================================================

/// Parse a plain-text document in the `Q`/`A` line format.
///
/// Spans point into the raw input so downstream containment queries operate
/// on genuine offsets. Fails if the document does not contain exactly one
/// question line, or if an answer line is malformed.
pub fn parse_document(id: impl Into<String>, text: impl Into<String>) -> Result<Document> {
    let id = id.into();
    let text = text.into();

    let mut question: Option<Span> = None;
    let mut answers = Vec::new();
    let mut pos = 0usize;

    for line in text.split_inclusive('\n') {
        let begin = pos;
        pos += line.len();

        let content = line.trim_end_matches(['\n', '\r']);
        let end = begin + content.len();

        if content.trim().is_empty() || content.starts_with('#') {
            continue;
        }

        if let Some(rest) = content.strip_prefix("Q ") {
            if question.is_some() {
                anyhow::bail!("document '{}' contains more than one question line", id);
            }
            if rest.trim().is_empty() {
                anyhow::bail!("document '{}' has an empty question", id);
            }
            question = Some(Span::new(end - rest.len(), end));
        } else if let Some(rest) = content.strip_prefix("A ") {
            let (flag, answer_text) = rest.split_once(' ').with_context(|| {
                format!("document '{}': malformed answer line '{}'", id, content)
            })?;
            let is_correct = match flag {
                "1" => true,
                "0" => false,
                other => anyhow::bail!(
                    "document '{}': invalid correctness flag '{}' (expected 0 or 1)",
                    id,
                    other
                ),
            };
            answers.push(Answer::new(Span::new(end - answer_text.len(), end), is_correct));
        } else {
            anyhow::bail!("document '{}': unrecognized line '{}'", id, content);
        }
    }

    let question = question
        .with_context(|| format!("document '{}' contains no question line", id))?;

    Ok(Document {
        id,
        text,
        question,
        answers,
    })
}

// =============================================================================
// JSON DOCUMENT SETS
// =============================================================================

/// Metadata about a document set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFileMetadata {
    /// Name of the document set
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: String,
    /// Optional version
    #[serde(default)]
    pub version: String,
}

/// One question/answer record in a JSON document set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Document identifier
    pub id: String,
    /// Question text
    pub question: String,
    /// Candidate answers with ground-truth labels
    pub answers: Vec<AnswerRecord>,
}

/// One answer in a JSON document record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Answer text
    pub text: String,
    /// Ground-truth correctness label
    pub correct: bool,
}

impl DocumentRecord {
    /// Render this record into the plain-text format and parse it, so both
    /// input formats feed identical downstream code.
    fn into_document(self) -> Result<Document> {
        if self.question.contains('\n') {
            anyhow::bail!("document '{}': question text contains a newline", self.id);
        }
        let mut text = format!("Q {}\n", self.question);
        for answer in &self.answers {
            if answer.text.contains('\n') {
                anyhow::bail!("document '{}': answer text contains a newline", self.id);
            }
            text.push_str(&format!(
                "A {} {}\n",
                if answer.correct { 1 } else { 0 },
                answer.text
            ));
        }
        parse_document(self.id, text)
    }
}

/// A complete document set loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFile {
    /// Metadata about the document set
    pub metadata: DocumentFileMetadata,
    /// The documents
    pub documents: Vec<DocumentRecord>,
}

impl DocumentFile {
    /// Load a document set from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read document file: {}", path.display()))?;

        let document_file: DocumentFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse document file: {}", path.display()))?;

        Ok(document_file)
    }

    /// Convert all records into parsed documents
    pub fn into_documents(self) -> Result<Vec<Document>> {
        self.documents
            .into_iter()
            .map(DocumentRecord::into_document)
            .collect()
    }
}

// =============================================================================
// CORPUS CONFIGURATION
// =============================================================================

/// Configuration for loading a directory of plain-text documents
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    /// File extensions to include (without dots)
    pub extensions: Vec<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["txt".to_string(), "qa".to_string()],
        }
    }
}

impl CorpusConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file extensions to include
    pub fn with_extensions(mut self, extensions: Vec<&str>) -> Self {
        self.extensions = extensions.into_iter().map(String::from).collect();
        self
    }
}

/// Load a document set from a path.
///
/// A `.json` file is loaded as a JSON document set; any other file is parsed
/// as a single plain-text document; a directory is walked (respecting
/// .gitignore) and every file with a configured extension is parsed as a
/// plain-text document. Documents are returned in path order so reports are
/// stable across runs.
pub fn load_documents(path: &Path, config: &CorpusConfig) -> Result<Vec<Document>> {
    let documents = if path.is_file() {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext == "json" {
            DocumentFile::load(path)?.into_documents()?
        } else {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read document: {}", path.display()))?;
            vec![parse_document(path.to_string_lossy(), content)?]
        }
    } else {
        load_document_dir(path, config)?
    };

    if documents.is_empty() {
        anyhow::bail!("no documents found at {}", path.display());
    }

    Ok(documents)
}

fn load_document_dir(root_path: &Path, config: &CorpusConfig) -> Result<Vec<Document>> {
    let walker = WalkBuilder::new(root_path)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build();

    let mut paths = Vec::new();
    for entry in walker {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !config.extensions.iter().any(|e| e == ext) {
            continue;
        }

        paths.push(path.to_path_buf());
    }

    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read document: {}", path.display()))?;

        let id = path
            .strip_prefix(root_path)
            .unwrap_or(&path)
            .to_string_lossy()
            .to_string();

        documents.push(parse_document(id, content)?);
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Q What is the capital of France?
A 1 Paris is the capital of France.
A 0 unrelated words only
";

    #[test]
    fn test_parse_document_spans() {
        let doc = parse_document("q1", SAMPLE).unwrap();
        assert_eq!(doc.question_text(), "What is the capital of France?");
        assert_eq!(doc.answers.len(), 2);
        assert_eq!(doc.answer_text(0), "Paris is the capital of France.");
        assert!(doc.answers[0].is_correct);
        assert_eq!(doc.answer_text(1), "unrelated words only");
        assert!(!doc.answers[1].is_correct);
        assert!(doc.answers.iter().all(|a| a.confidence.is_none()));
    }

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let text = "# a comment\n\nQ a question here\n\nA 1 an answer\n";
        let doc = parse_document("q1", text).unwrap();
        assert_eq!(doc.question_text(), "a question here");
        assert_eq!(doc.answers.len(), 1);
    }

    #[test]
    fn test_parse_rejects_multiple_questions() {
        let text = "Q one\nQ two\nA 1 answer\n";
        let err = parse_document("q1", text).unwrap_err();
        assert!(err.to_string().contains("more than one question"));
    }

    #[test]
    fn test_parse_rejects_missing_question() {
        let err = parse_document("q1", "A 1 answer\n").unwrap_err();
        assert!(err.to_string().contains("no question line"));
    }

    #[test]
    fn test_parse_rejects_bad_flag() {
        let err = parse_document("q1", "Q question\nA 2 answer\n").unwrap_err();
        assert!(err.to_string().contains("invalid correctness flag"));
    }

    #[test]
    fn test_json_record_matches_plain_text() {
        let record = DocumentRecord {
            id: "q1".to_string(),
            question: "What is the capital of France?".to_string(),
            answers: vec![
                AnswerRecord {
                    text: "Paris is the capital of France.".to_string(),
                    correct: true,
                },
                AnswerRecord {
                    text: "unrelated words only".to_string(),
                    correct: false,
                },
            ],
        };
        let doc = record.into_document().unwrap();
        let expected = parse_document("q1", SAMPLE).unwrap();
        assert_eq!(doc.question_text(), expected.question_text());
        assert_eq!(doc.answer_text(0), expected.answer_text(0));
        assert_eq!(doc.answers[1].is_correct, expected.answers[1].is_correct);
    }

    #[test]
    fn test_load_documents_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "Q second question\nA 0 no\n").unwrap();
        std::fs::write(dir.path().join("a.txt"), SAMPLE).unwrap();
        std::fs::write(dir.path().join("ignored.md"), "not a document").unwrap();

        let documents = load_documents(dir.path(), &CorpusConfig::new()).unwrap();
        assert_eq!(documents.len(), 2);
        // Path order, not discovery order
        assert_eq!(documents[0].id, "a.txt");
        assert_eq!(documents[1].id, "b.txt");
    }

    #[test]
    fn test_load_documents_empty_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_documents(dir.path(), &CorpusConfig::new()).is_err());
    }
}
