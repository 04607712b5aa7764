//! Batch document analysis.
//!
//! - `types`: documents, per-document results and skip reasons
//! - `analyzer`: the pure per-document pipeline
//! - `source`: where document text comes from
//! - `runner`: drives a whole source through the analyzer

mod analyzer;
mod runner;
mod source;
mod types;

pub use analyzer::Analyzer;
pub use runner::Runner;
pub use source::{DirectorySource, DirectorySourceBuilder, DocumentSource, MemorySource};
pub use types::{BatchResult, Document, DocumentMetrics, FetchError, SkipReason, Skipped};
