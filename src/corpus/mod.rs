//! Document corpus loading
//!
//! Loads question/answer documents for the ranking benchmark.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use corpus::{CorpusConfig, load_documents};
//!
//! let config = CorpusConfig::new().with_extensions(vec!["txt", "qa"]);
//! let documents = load_documents(&path, &config)?;
//! ```
//!
//! Two input formats are supported:
//! - A directory of plain-text documents (`Q`/`A` line format)
//! - A single JSON document-set file

pub mod loader;

pub use loader::{
    Answer, CorpusConfig, Document, DocumentFile, DocumentRecord, Span,
    load_documents, parse_document,
};
