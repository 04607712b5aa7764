//! Output writers for textgauge results.
//!
//! Records are written as CSV (one row per document, fixed column order) or
//! as a pretty JSON array. The run summary is printed either as colored
//! terminal text or as JSON.

use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::analyze::{BatchResult, DocumentMetrics, Skipped};
use crate::assemble::{Assembly, MetricsRecord};

/// Record file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// Write records in the given format, creating parent directories.
pub fn write_records(path: &Path, records: &[MetricsRecord], format: OutputFormat) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    match format {
        OutputFormat::Csv => write_csv(path, records),
        OutputFormat::Json => write_json(path, records),
    }
}

/// Write records as CSV with a header row.
pub fn write_csv(path: &Path, records: &[MetricsRecord]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if records.is_empty() {
        writer.write_record(crate::assemble::COLUMNS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records as a pretty-printed JSON array.
pub fn write_json(path: &Path, records: &[MetricsRecord]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json + "\n")?;
    Ok(())
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub version: String,
    pub documents: String,
    pub output: String,
    pub format: OutputFormat,
    pub attempted: usize,
    pub succeeded: usize,
    pub records: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<Skipped>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unmatched: Vec<String>,
}

impl BatchSummary {
    pub fn new(
        documents: &str,
        output: &str,
        format: OutputFormat,
        batch: &BatchResult,
        assembly: &Assembly,
    ) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            documents: documents.to_string(),
            output: output.to_string(),
            format,
            attempted: batch.attempted,
            succeeded: batch.succeeded(),
            records: assembly.records.len(),
            skipped: batch.skipped.clone(),
            unmatched: assembly.unmatched.clone(),
        }
    }

    /// Skip counts grouped by reason label.
    pub fn skip_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for s in &self.skipped {
            *counts.entry(s.reason.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// True when documents were attempted but no record came out.
    pub fn produced_nothing(&self) -> bool {
        self.attempted > 0 && self.records == 0
    }
}

/// Print the summary as JSON on stdout.
pub fn write_summary_json(summary: &BatchSummary) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    println!("{}", json);
    Ok(())
}

/// Print a colored summary on stdout.
pub fn write_summary(summary: &BatchSummary) {
    println!();
    print!("  ");
    print!("{}", "textgauge".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Documents: ".dimmed());
    println!("{}", summary.documents);
    print!("  {}", "Output:    ".dimmed());
    println!("{} ({})", summary.output, summary.format.as_str());
    println!();

    if summary.produced_nothing() {
        print!("  {}", "✗ NO RECORDS".red());
    } else {
        print!("  {}", "✓ DONE".green());
    }
    println!(
        "  {} attempted, {} analyzed, {} written",
        summary.attempted,
        summary.succeeded,
        summary.records.to_string().bold()
    );

    if !summary.skipped.is_empty() {
        println!();
        println!("  {}", format!("Skipped ({})", summary.skipped.len()).yellow().bold());
        for (reason, count) in summary.skip_counts() {
            println!("    {:<20} {}", reason, count);
        }
        for s in &summary.skipped {
            println!("    {} {}", s.id.dimmed(), s.reason);
        }
    }

    if !summary.unmatched.is_empty() {
        println!();
        println!(
            "  {}",
            format!("No metadata row ({})", summary.unmatched.len()).yellow().bold()
        );
        println!("    {}", summary.unmatched.join(", ").dimmed());
    }
    println!();
}

/// Print one document's metrics in output column order.
pub fn write_document(metrics: &DocumentMetrics) {
    let r = &metrics.readability;
    let rows: [(&str, String); 13] = [
        ("POSITIVE SCORE", metrics.sentiment.positive.to_string()),
        ("NEGATIVE SCORE", metrics.sentiment.negative.to_string()),
        ("POLARITY SCORE", format!("{:.4}", r.polarity_score)),
        ("SUBJECTIVITY SCORE", format!("{:.4}", r.subjectivity_score)),
        ("AVG SENTENCE LENGTH", format!("{:.4}", r.avg_sentence_length)),
        ("PERCENTAGE OF COMPLEX WORDS", format!("{:.4}", r.percentage_complex_words)),
        ("FOG INDEX", format!("{:.4}", r.fog_index)),
        ("AVG NUMBER OF WORDS PER SENTENCE", format!("{:.4}", r.avg_sentence_length)),
        ("COMPLEX WORD COUNT", r.complex_word_count.to_string()),
        ("WORD COUNT", r.word_count.to_string()),
        ("SYLLABLE PER WORD", format!("{:.4}", r.syllable_per_word)),
        ("PERSONAL PRONOUNS", r.personal_pronouns.to_string()),
        ("AVG WORD LENGTH", format!("{:.4}", r.avg_word_length)),
    ];

    println!();
    print!("  {}", "Document: ".dimmed());
    println!("{}", metrics.id.bold());
    println!();
    for (name, value) in rows {
        println!("    {} {}", format!("{:<34}", name).dimmed(), value);
    }
    if !metrics.sentiment.positive_matches.is_empty() {
        println!();
        print!("  {}", "Positive: ".green());
        println!("{}", metrics.sentiment.positive_matches.join(", "));
    }
    if !metrics.sentiment.negative_matches.is_empty() {
        if metrics.sentiment.positive_matches.is_empty() {
            println!();
        }
        print!("  {}", "Negative: ".red());
        println!("{}", metrics.sentiment.negative_matches.join(", "));
    }
    println!();
}
