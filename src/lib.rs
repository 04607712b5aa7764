//! Textgauge - readability and sentiment metrics for plain-text documents.
//!
//! Each document is normalized, tokenized into lemmas and split into
//! sentences. Tokens are scored against positive and negative word lists,
//! and word, sentence and syllable statistics feed the Gunning fog index.
//! Results are joined with a metadata table into one fixed-column record
//! per document.
//!
//! # Architecture
//!
//! - `lexicon`: positive and negative word lists
//! - `text`: normalization, tokenization, lemmatization, sentence
//!   segmentation and syllable counting
//! - `sentiment`: lexicon match counts
//! - `metrics`: readability and ratio metrics
//! - `analyze`: the per-document pipeline, document sources and the batch runner
//! - `assemble`: joining metrics with metadata into output records
//! - `report`: CSV/JSON writers and the run summary
//! - `config`: YAML configuration

pub mod analyze;
pub mod assemble;
pub mod cli;
pub mod config;
pub mod lexicon;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod sentiment;
pub mod text;

pub use analyze::{
    Analyzer, BatchResult, DirectorySource, Document, DocumentMetrics, DocumentSource,
    MemorySource, Runner, SkipReason,
};
pub use assemble::{assemble, Assembly, MetadataTable, MetricsRecord};
pub use config::Config;
pub use lexicon::{Lexicon, LexiconError};
pub use metrics::ReadabilityMetrics;
pub use pipeline::Pipeline;
pub use sentiment::SentimentScore;
