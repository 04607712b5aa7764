//! Tests for the record file formats.
//!
//! Downstream consumers read the output by column name and position, so the
//! header and key order must stay fixed.

use std::path::PathBuf;

use tempfile::TempDir;
use textgauge::analyze::{DirectorySource, Runner};
use textgauge::assemble::{assemble, Assembly, MetadataTable, COLUMNS};
use textgauge::config::Config;
use textgauge::pipeline::Pipeline;
use textgauge::report::{self, BatchSummary, OutputFormat};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

/// Run the fixture batch and return its summary inputs.
fn run_fixture_batch() -> (textgauge::BatchResult, Assembly) {
    let config = Config::parse_file(testdata_path().join("textgauge.yaml")).expect("should parse config");
    let pipeline = Pipeline::from_config(&config).expect("should load lexicon");
    let table = MetadataTable::from_path(&config.metadata.path).expect("should read metadata");
    let source = DirectorySource::open(&config.documents.path).expect("should open documents");

    let batch = Runner::new(pipeline.analyzer())
        .run(&source)
        .expect("batch should run");
    let assembly = assemble(&batch, &table);
    (batch, assembly)
}

#[test]
fn test_csv_header_and_row_order() {
    let (_, assembly) = run_fixture_batch();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("out/records.csv");
    report::write_records(&path, &assembly.records, OutputFormat::Csv).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, COLUMNS);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "2");
    assert_eq!(&rows[1][0], "1");
    assert_eq!(&rows[1][1], "https://example.com/articles/1");

    // AVG SENTENCE LENGTH and AVG NUMBER OF WORDS PER SENTENCE carry the same value
    for row in &rows {
        assert_eq!(&row[6], &row[9]);
    }
    // WORD COUNT of document 1
    assert_eq!(&rows[1][11], "10");
}

#[test]
fn test_json_keys_in_column_order() {
    let (_, assembly) = run_fixture_batch();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("records.json");
    report::write_records(&path, &assembly.records, OutputFormat::Json).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let first_object = &text[..text.find('}').unwrap()];
    let positions: Vec<usize> = COLUMNS
        .iter()
        .map(|c| {
            first_object
                .find(&format!("\"{}\"", c))
                .unwrap_or_else(|| panic!("missing key {}", c))
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "keys out of order");

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[1]["POSITIVE SCORE"], 1);
    assert_eq!(value[1]["NEGATIVE SCORE"], 2);
}

#[test]
fn test_summary_json_structure() {
    let (batch, assembly) = run_fixture_batch();
    let summary = BatchSummary::new("documents", "output.csv", OutputFormat::Csv, &batch, &assembly);

    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(value["attempted"], 4);
    assert_eq!(value["succeeded"], 3);
    assert_eq!(value["records"], 2);
    assert_eq!(value["skipped"][0]["id"], "3");
    assert_eq!(value["skipped"][0]["reason"]["kind"], "no_valid_words");
    assert_eq!(value["unmatched"][0], "4");
    assert!(!summary.produced_nothing());
}
