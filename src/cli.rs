//! Command-line interface for textgauge.

use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::analyze::{DirectorySource, Document, Runner, SkipReason};
use crate::assemble::{self, MetadataTable};
use crate::config::{self, Config, DEFAULT_CONFIG_NAMES, DEFAULT_TEMPLATE};
use crate::lexicon::decode_text;
use crate::pipeline::Pipeline;
use crate::report::{self, BatchSummary, OutputFormat};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Readability and sentiment metrics for plain-text documents.
///
/// Textgauge scores each document against positive and negative word lists,
/// computes sentence, word and syllable statistics (including the Gunning
/// fog index) and joins the results with a metadata table.
#[derive(Parser)]
#[command(name = "textgauge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze every document and write one record per document
    #[command(visible_alias = "run")]
    Analyze(AnalyzeArgs),
    /// Analyze a single text file and print its metrics
    Score(ScoreArgs),
    /// Write a default configuration file
    Init(InitArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory of document text files
    #[arg(short, long)]
    pub documents: Option<PathBuf>,

    /// Metadata CSV with identifier and URL columns
    #[arg(short, long)]
    pub metadata: Option<PathBuf>,

    /// Output file for the records
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Record format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Positive word list
    #[arg(long)]
    pub positive: Option<PathBuf>,

    /// Negative word list
    #[arg(long)]
    pub negative: Option<PathBuf>,

    /// Analyze documents one at a time
    #[arg(long)]
    pub sequential: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the score command.
#[derive(Parser)]
pub struct ScoreArgs {
    /// Text file to analyze
    pub file: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Positive word list
    #[arg(long)]
    pub positive: Option<PathBuf>,

    /// Negative word list
    #[arg(long)]
    pub negative: Option<PathBuf>,

    /// Print metrics as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_NAMES[0])]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl AnalyzeArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(p) = &self.documents {
            config.documents.path = p.clone();
        }
        if let Some(p) = &self.metadata {
            config.metadata.path = p.clone();
        }
        if let Some(p) = &self.output {
            config.output.path = p.clone();
        }
        if let Some(f) = self.format {
            config.output.format = f;
        }
        if let Some(p) = &self.positive {
            config.lexicon.positive = p.clone();
        }
        if let Some(p) = &self.negative {
            config.lexicon.negative = p.clone();
        }
        if self.sequential {
            config.analysis.parallel = false;
        }
    }
}

/// Load, override and validate the configuration.
///
/// Errors are reported here; `None` means the caller should exit with
/// [`EXIT_ERROR`].
fn load_config(explicit: Option<&Path>, overrides: impl FnOnce(&mut Config)) -> Option<Config> {
    let mut config = match Config::load(explicit) {
        Ok((c, _)) => c,
        Err(e) => {
            eprintln!("Error parsing config: {}", e);
            return None;
        }
    };
    overrides(&mut config);

    if let Err(e) = config::validate(&config) {
        eprintln!("Error: invalid config: {}", e);
        return None;
    }
    Some(config)
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    let Some(config) = load_config(args.config.as_deref(), |c| args.apply(c)) else {
        return Ok(EXIT_ERROR);
    };

    // Lexicon failure is fatal for the whole batch
    let pipeline = match Pipeline::from_config(&config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let table = match MetadataTable::from_path_with_columns(
        &config.metadata.path,
        &config.metadata.id_column,
        &config.metadata.url_column,
    ) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let source = match DirectorySource::builder(&config.documents.path)
        .extensions(config.documents.extensions.iter().cloned())
        .excluded_paths(config.documents.excluded_paths.iter().cloned())
        .recursive(config.documents.recursive)
        .build()
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if source.is_empty() {
        eprintln!("Warning: no documents to analyze in {}", source.root().display());
    }

    let runner = Runner::new(pipeline.analyzer())
        .parallel(config.analysis.parallel)
        .show_progress(!args.no_progress && !args.json);
    let batch = runner.run(&source)?;
    let assembly = assemble::assemble(&batch, &table);

    report::write_records(&config.output.path, &assembly.records, config.output.format)?;

    let summary = BatchSummary::new(
        &config.documents.path.to_string_lossy(),
        &config.output.path.to_string_lossy(),
        config.output.format,
        &batch,
        &assembly,
    );
    if args.json {
        report::write_summary_json(&summary)?;
    } else {
        report::write_summary(&summary);
    }

    if summary.produced_nothing() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the score command.
pub fn run_score(args: &ScoreArgs) -> anyhow::Result<i32> {
    let Some(config) = load_config(args.config.as_deref(), |c| {
        if let Some(p) = &args.positive {
            c.lexicon.positive = p.clone();
        }
        if let Some(p) = &args.negative {
            c.lexicon.negative = p.clone();
        }
    }) else {
        return Ok(EXIT_ERROR);
    };

    let pipeline = match Pipeline::from_config(&config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let bytes = match std::fs::read(&args.file) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", args.file.display(), e);
            return Ok(EXIT_ERROR);
        }
    };
    let id = args
        .file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| args.file.display().to_string());

    match pipeline.analyzer().analyze(&Document::new(id.clone(), decode_text(bytes))) {
        Ok(metrics) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            } else {
                report::write_document(&metrics);
            }
            Ok(EXIT_SUCCESS)
        }
        Err(reason) => {
            report_skip(&id, &reason);
            Ok(EXIT_FAILED)
        }
    }
}

fn report_skip(id: &str, reason: &SkipReason) {
    eprintln!("Skipped {}: {}", id, reason);
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() && !args.force {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it, use --force, or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, DEFAULT_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Point the lexicon, documents and metadata paths at your data");
    println!("  2. Run: textgauge analyze --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
