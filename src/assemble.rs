//! Joining computed metrics with document metadata.
//!
//! The metadata table supplies the identifier and URL columns of the output.
//! A document with metrics but no metadata row produces no record.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analyze::{BatchResult, DocumentMetrics};

/// Default identifier column of the metadata table.
pub const DEFAULT_ID_COLUMN: &str = "URL_ID";

/// Default URL column of the metadata table.
pub const DEFAULT_URL_COLUMN: &str = "URL";

/// Output column names, in order.
pub const COLUMNS: [&str; 15] = [
    "URL_ID",
    "URL",
    "POSITIVE SCORE",
    "NEGATIVE SCORE",
    "POLARITY SCORE",
    "SUBJECTIVITY SCORE",
    "AVG SENTENCE LENGTH",
    "PERCENTAGE OF COMPLEX WORDS",
    "FOG INDEX",
    "AVG NUMBER OF WORDS PER SENTENCE",
    "COMPLEX WORD COUNT",
    "WORD COUNT",
    "SYLLABLE PER WORD",
    "PERSONAL PRONOUNS",
    "AVG WORD LENGTH",
];

/// Failure to read the metadata table. Always fatal for the batch.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("cannot read metadata table {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed metadata table: {0}")]
    Csv(#[from] csv::Error),
    #[error("metadata table has no {0:?} column")]
    MissingColumn(String),
}

/// One row of the metadata table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRow {
    pub id: String,
    pub url: String,
}

/// Externally supplied per-document metadata, in row order.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    rows: Vec<MetadataRow>,
    index: HashMap<String, usize>,
}

impl MetadataTable {
    /// Read a CSV file using the default column names.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, MetadataError> {
        Self::from_path_with_columns(path, DEFAULT_ID_COLUMN, DEFAULT_URL_COLUMN)
    }

    pub fn from_path_with_columns<P: AsRef<Path>>(
        path: P,
        id_column: &str,
        url_column: &str,
    ) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| MetadataError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_reader(file, id_column, url_column)?;
        tracing::info!(path = %path.display(), rows = table.len(), "loaded metadata table");
        Ok(table)
    }

    /// Read CSV with headers from any reader.
    pub fn from_reader<R: Read>(
        reader: R,
        id_column: &str,
        url_column: &str,
    ) -> Result<Self, MetadataError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| MetadataError::MissingColumn(name.to_string()))
        };
        let id_idx = position(id_column)?;
        let url_idx = position(url_column)?;

        let mut table = MetadataTable::default();
        for record in rdr.records() {
            let record = record?;
            let id = record.get(id_idx).unwrap_or("").trim();
            if id.is_empty() {
                continue;
            }
            let url = record.get(url_idx).unwrap_or("").trim();
            table.push(MetadataRow {
                id: id.to_string(),
                url: url.to_string(),
            });
        }
        Ok(table)
    }

    /// Build a table from `(id, url)` pairs.
    pub fn from_rows<I, S, T>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut table = MetadataTable::default();
        for (id, url) in rows {
            table.push(MetadataRow {
                id: id.into(),
                url: url.into(),
            });
        }
        table
    }

    fn push(&mut self, row: MetadataRow) {
        if self.index.contains_key(&row.id) {
            tracing::warn!(id = %row.id, "duplicate metadata row ignored");
            return;
        }
        self.index.insert(row.id.clone(), self.rows.len());
        self.rows.push(row);
    }

    pub fn get(&self, id: &str) -> Option<&MetadataRow> {
        self.index.get(id.trim()).map(|&i| &self.rows[i])
    }

    pub fn rows(&self) -> &[MetadataRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    #[serde(rename = "URL_ID")]
    pub url_id: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "POSITIVE SCORE")]
    pub positive_score: usize,
    #[serde(rename = "NEGATIVE SCORE")]
    pub negative_score: usize,
    #[serde(rename = "POLARITY SCORE")]
    pub polarity_score: f64,
    #[serde(rename = "SUBJECTIVITY SCORE")]
    pub subjectivity_score: f64,
    #[serde(rename = "AVG SENTENCE LENGTH")]
    pub avg_sentence_length: f64,
    #[serde(rename = "PERCENTAGE OF COMPLEX WORDS")]
    pub percentage_complex_words: f64,
    #[serde(rename = "FOG INDEX")]
    pub fog_index: f64,
    #[serde(rename = "AVG NUMBER OF WORDS PER SENTENCE")]
    pub avg_words_per_sentence: f64,
    #[serde(rename = "COMPLEX WORD COUNT")]
    pub complex_word_count: usize,
    #[serde(rename = "WORD COUNT")]
    pub word_count: usize,
    #[serde(rename = "SYLLABLE PER WORD")]
    pub syllable_per_word: f64,
    #[serde(rename = "PERSONAL PRONOUNS")]
    pub personal_pronouns: usize,
    #[serde(rename = "AVG WORD LENGTH")]
    pub avg_word_length: f64,
}

impl MetricsRecord {
    /// Combine one document's metrics with its metadata row.
    pub fn new(row: &MetadataRow, metrics: &DocumentMetrics) -> Self {
        let r = &metrics.readability;
        Self {
            url_id: row.id.clone(),
            url: row.url.clone(),
            positive_score: metrics.sentiment.positive,
            negative_score: metrics.sentiment.negative,
            polarity_score: r.polarity_score,
            subjectivity_score: r.subjectivity_score,
            avg_sentence_length: r.avg_sentence_length,
            percentage_complex_words: r.percentage_complex_words,
            fog_index: r.fog_index,
            avg_words_per_sentence: r.avg_sentence_length,
            complex_word_count: r.complex_word_count,
            word_count: r.word_count,
            syllable_per_word: r.syllable_per_word,
            personal_pronouns: r.personal_pronouns,
            avg_word_length: r.avg_word_length,
        }
    }
}

/// Output of [`assemble`].
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    /// One record per analyzed document with a metadata row, in table order.
    pub records: Vec<MetricsRecord>,
    /// Analyzed documents with no metadata row.
    pub unmatched: Vec<String>,
}

/// Join a batch with its metadata table.
pub fn assemble(batch: &BatchResult, table: &MetadataTable) -> Assembly {
    let by_id: HashMap<&str, &DocumentMetrics> = batch
        .analyzed
        .iter()
        .map(|m| (m.id.trim(), m))
        .collect();

    let records = table
        .rows()
        .iter()
        .filter_map(|row| by_id.get(row.id.as_str()).map(|m| MetricsRecord::new(row, m)))
        .collect();

    let unmatched: Vec<String> = batch
        .analyzed
        .iter()
        .filter(|m| table.get(&m.id).is_none())
        .map(|m| m.id.clone())
        .collect();
    for id in &unmatched {
        tracing::warn!(id = %id, "no metadata row for document; result dropped");
    }

    Assembly { records, unmatched }
}
