//! Core types for batch analysis results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics::ReadabilityMetrics;
use crate::sentiment::SentimentScore;

/// A document to analyze. Never mutated by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Failure to obtain a document's text from its source.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("document {0:?} not found")]
    NotFound(String),
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Why a document produced no metrics. Skips never abort the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("no valid words")]
    NoValidWords,
    #[error("non-finite {0}")]
    NonFiniteMetric(String),
}

impl SkipReason {
    /// Short stable label, used to group skips in summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Fetch(_) => "fetch_failed",
            SkipReason::NoValidWords => "no_valid_words",
            SkipReason::NonFiniteMetric(_) => "non_finite_metric",
        }
    }
}

impl From<FetchError> for SkipReason {
    fn from(e: FetchError) -> Self {
        SkipReason::Fetch(e.to_string())
    }
}

/// Everything computed for one successfully analyzed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetrics {
    pub id: String,
    pub sentiment: SentimentScore,
    pub readability: ReadabilityMetrics,
}

/// A document that was attempted but skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skipped {
    pub id: String,
    pub reason: SkipReason,
}

/// Results of analyzing a batch of documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResult {
    pub analyzed: Vec<DocumentMetrics>,
    pub skipped: Vec<Skipped>,
    /// Number of documents attempted
    pub attempted: usize,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one document's outcome.
    pub fn record(&mut self, id: &str, outcome: Result<DocumentMetrics, SkipReason>) {
        self.attempted += 1;
        match outcome {
            Ok(metrics) => self.analyzed.push(metrics),
            Err(reason) => self.skipped.push(Skipped {
                id: id.to_string(),
                reason,
            }),
        }
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: BatchResult) {
        self.analyzed.extend(other.analyzed);
        self.skipped.extend(other.skipped);
        self.attempted += other.attempted;
    }

    /// Order both lists by document identifier.
    pub fn sort(&mut self) {
        self.analyzed.sort_by(|a, b| a.id.cmp(&b.id));
        self.skipped.sort_by(|a, b| a.id.cmp(&b.id));
    }

    pub fn succeeded(&self) -> usize {
        self.analyzed.len()
    }

    pub fn failed(&self) -> usize {
        self.skipped.len()
    }

    pub fn get(&self, id: &str) -> Option<&DocumentMetrics> {
        self.analyzed.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_merge() {
        let mut a = BatchResult::new();
        a.record("2", Err(SkipReason::NoValidWords));
        let mut b = BatchResult::new();
        b.record("1", Err(SkipReason::Fetch("gone".into())));
        a.merge(b);
        a.sort();

        assert_eq!(a.attempted, 2);
        assert_eq!(a.failed(), 2);
        assert_eq!(a.succeeded(), 0);
        assert_eq!(a.skipped[0].id, "1");
    }

    #[test]
    fn test_skip_reason_messages() {
        assert_eq!(SkipReason::NoValidWords.to_string(), "no valid words");
        assert_eq!(SkipReason::NoValidWords.as_str(), "no_valid_words");
        let fetch: SkipReason = FetchError::NotFound("42".into()).into();
        assert_eq!(fetch.to_string(), "fetch failed: document \"42\" not found");
    }
}
