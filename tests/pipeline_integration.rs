//! End-to-end tests for the batch pipeline against the fixtures in testdata/.

use std::path::PathBuf;

use tempfile::TempDir;
use textgauge::analyze::{DirectorySource, MemorySource, Runner, SkipReason};
use textgauge::assemble::{assemble, MetadataTable};
use textgauge::config::{self, Config};
use textgauge::lexicon::{Lexicon, LexiconError};
use textgauge::metrics::FOG_FACTOR;
use textgauge::pipeline::Pipeline;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn load_config() -> Config {
    let config = Config::parse_file(testdata_path().join("textgauge.yaml")).expect("should parse config");
    config::validate(&config).expect("config should be valid");
    config
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_config_paths_resolve_to_testdata() {
    let config = load_config();
    assert_eq!(config.documents.path, testdata_path().join("documents"));
    assert!(config.lexicon.positive.is_file());
    assert!(config.metadata.path.is_file());
}

#[test]
fn test_lexicon_fixture_skips_comments() {
    let config = load_config();
    let lexicon = Lexicon::load(&config.lexicon.positive, &config.lexicon.negative).unwrap();
    assert_eq!(lexicon.positive().len(), 5);
    assert_eq!(lexicon.negative().len(), 5);
    assert!(lexicon.is_positive("excellent"));
    assert!(!lexicon.positive().iter().any(|w| w.starts_with(';')));
}

#[test]
fn test_full_batch() {
    let config = load_config();
    let pipeline = Pipeline::from_config(&config).unwrap();
    let table = MetadataTable::from_path(&config.metadata.path).unwrap();
    let source = DirectorySource::open(&config.documents.path).unwrap();

    let batch = Runner::new(pipeline.analyzer()).run(&source).unwrap();

    // nested/6.txt is only found by a recursive scan
    assert_eq!(batch.attempted, 4);
    assert_eq!(batch.succeeded(), 3);
    assert_eq!(batch.skipped.len(), 1);
    assert_eq!(batch.skipped[0].id, "3");
    assert_eq!(batch.skipped[0].reason, SkipReason::NoValidWords);

    let one = batch.get("1").unwrap();
    assert_eq!(one.sentiment.positive, 1);
    assert_eq!(one.sentiment.negative, 2);
    assert_eq!(one.readability.word_count, 10);
    assert_eq!(one.readability.sentence_count, 2);
    assert!(approx(one.readability.fog_index, FOG_FACTOR * 5.0));

    let two = batch.get("2").unwrap();
    assert_eq!(two.sentiment.positive, 2);
    assert_eq!(two.sentiment.negative, 1);
    assert_eq!(two.readability.sentence_count, 3);
    assert_eq!(two.readability.personal_pronouns, 2);
    assert!(two.readability.polarity_score > 0.0);

    let assembly = assemble(&batch, &table);
    let ids: Vec<&str> = assembly.records.iter().map(|r| r.url_id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
    assert_eq!(assembly.unmatched, vec!["4"]);
    assert_eq!(assembly.records[1].url, "https://example.com/articles/1");
}

#[test]
fn test_recursive_batch_picks_up_nested_documents() {
    let config = load_config();
    let pipeline = Pipeline::from_config(&config).unwrap();
    let table = MetadataTable::from_path(&config.metadata.path).unwrap();
    let source = DirectorySource::builder(&config.documents.path)
        .recursive(true)
        .build()
        .unwrap();

    let batch = Runner::new(pipeline.analyzer())
        .parallel(false)
        .run(&source)
        .unwrap();
    assert_eq!(batch.attempted, 5);

    let assembly = assemble(&batch, &table);
    let ids: Vec<&str> = assembly.records.iter().map(|r| r.url_id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1", "6"]);
    assert_eq!(assembly.records[2].negative_score, 1);
}

#[test]
fn test_missing_lexicon_is_fatal() {
    let mut config = load_config();
    config.lexicon.negative = testdata_path().join("lexicon/missing.txt");
    let err = Pipeline::from_config(&config).err().expect("missing lexicon must fail");
    assert!(matches!(err, LexiconError::Unreadable { kind: "negative", .. }));
}

#[test]
fn test_empty_lexicon_is_fatal() {
    let temp = TempDir::new().unwrap();
    let empty = temp.path().join("empty.txt");
    std::fs::write(&empty, "; only comments\n\n").unwrap();

    let mut config = load_config();
    config.lexicon.positive = empty;
    let err = Pipeline::from_config(&config).err().expect("empty lexicon must fail");
    assert!(matches!(err, LexiconError::Empty { kind: "positive", .. }));
}

#[test]
fn test_one_bad_document_does_not_affect_others() {
    let config = load_config();
    let pipeline = Pipeline::from_config(&config).unwrap();

    let alone = MemorySource::new().with("a", "Great success for the team.");
    let mixed = MemorySource::new()
        .with("a", "Great success for the team.")
        .with("b", "!!! ??? 404");

    let alone = Runner::new(pipeline.analyzer()).run(&alone).unwrap();
    let mixed = Runner::new(pipeline.analyzer()).run(&mixed).unwrap();

    assert_eq!(mixed.failed(), 1);
    assert_eq!(alone.get("a"), mixed.get("a"));
}

#[test]
fn test_latin1_document() {
    let temp = TempDir::new().unwrap();
    // "Caf\xe9 service was poor." in Latin-1
    let mut bytes = b"Caf".to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b" service was poor.");
    std::fs::write(temp.path().join("9.txt"), bytes).unwrap();

    let config = load_config();
    let pipeline = Pipeline::from_config(&config).unwrap();
    let source = DirectorySource::open(temp.path()).unwrap();
    let batch = Runner::new(pipeline.analyzer()).run(&source).unwrap();

    let doc = batch.get("9").unwrap();
    assert_eq!(doc.sentiment.negative, 1);
    // The accented letter is replaced, leaving "caf service was poor"
    assert_eq!(doc.readability.word_count, 4);
}
