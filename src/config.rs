//! Configuration schema for textgauge.
//!
//! A configuration file names the lexicons, the document directory, the
//! metadata table and the output. Every field has a default, so an empty
//! file (or no file at all) is a valid configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::assemble::{DEFAULT_ID_COLUMN, DEFAULT_URL_COLUMN};
use crate::lexicon::DEFAULT_COMMENT_PREFIX;
use crate::report::OutputFormat;

/// Config file names searched for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["textgauge.yaml", ".textgauge.yaml"];

/// Template written by `textgauge init`.
pub const DEFAULT_TEMPLATE: &str = include_str!("templates/default.yaml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub lexicon: LexiconConfig,
    pub documents: DocumentsConfig,
    pub metadata: MetadataConfig,
    pub output: OutputConfig,
    pub analysis: AnalysisConfig,
}

/// Sentiment word lists.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub positive: PathBuf,
    pub negative: PathBuf,
    /// Lines starting with this prefix are comments
    pub comment_prefix: String,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            positive: PathBuf::from("MasterDictionary/positive-words.txt"),
            negative: PathBuf::from("MasterDictionary/negative-words.txt"),
            comment_prefix: DEFAULT_COMMENT_PREFIX.to_string(),
        }
    }
}

/// Where document text files live.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocumentsConfig {
    pub path: PathBuf,
    /// File extensions to analyze, without the dot
    pub extensions: Vec<String>,
    /// Glob patterns, relative to `path`, for files to skip (e.g. "drafts/**")
    pub excluded_paths: Vec<String>,
    pub recursive: bool,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("documents"),
            extensions: vec!["txt".to_string()],
            excluded_paths: Vec::new(),
            recursive: false,
        }
    }
}

/// The metadata table joined with computed metrics.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub path: PathBuf,
    pub id_column: String,
    pub url_column: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("input.csv"),
            id_column: DEFAULT_ID_COLUMN.to_string(),
            url_column: DEFAULT_URL_COLUMN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("output.csv"),
            format: OutputFormat::Csv,
        }
    }
}

/// Analysis tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Analyze documents across threads (default: true)
    pub parallel: bool,
    /// Abbreviations, besides the built-in list, whose period does not end a sentence
    pub extra_abbreviations: Vec<String>,
    /// Log matched sentiment words at info level
    pub show_matches: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            extra_abbreviations: Vec::new(),
            show_matches: false,
        }
    }
}

impl Config {
    /// Parse a configuration from a YAML file.
    ///
    /// Relative paths in the file are resolved against the file's directory.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read config {}: {}", path.display(), e))?;
        let mut config = Self::parse_str(&content)?;
        if let Some(base) = path.parent() {
            config.resolve(base);
        }
        Ok(config)
    }

    /// Parse a configuration from YAML text, without resolving paths.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load the explicit config if given, else a discovered one, else defaults.
    ///
    /// Returns the config and the file it came from.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => discover(),
        };
        match path {
            Some(p) => {
                let config = Self::parse_file(&p)?;
                tracing::info!(path = %p.display(), "loaded configuration");
                Ok((config, Some(p)))
            }
            None => {
                tracing::debug!("no configuration file found, using defaults");
                Ok((Config::default(), None))
            }
        }
    }

    /// Make every relative path absolute against `base`.
    pub fn resolve(&mut self, base: &Path) {
        for path in [
            &mut self.lexicon.positive,
            &mut self.lexicon.negative,
            &mut self.documents.path,
            &mut self.metadata.path,
            &mut self.output.path,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Find a config file: working directory first, then the user config directory.
pub fn discover() -> Option<PathBuf> {
    discover_in(Path::new(".")).or_else(|| {
        let dirs = directories::ProjectDirs::from("", "", "textgauge")?;
        let path = dirs.config_dir().join(DEFAULT_CONFIG_NAMES[0]);
        path.is_file().then_some(path)
    })
}

/// Find a config file by name in `dir`.
pub fn discover_in(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Validate a configuration for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.lexicon.comment_prefix.is_empty() {
        anyhow::bail!("lexicon.comment_prefix must not be empty");
    }

    if config.documents.extensions.is_empty() {
        anyhow::bail!("documents.extensions must list at least one extension");
    }

    // Validate excluded_paths glob patterns compile
    for pattern in &config.documents.excluded_paths {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    if config.metadata.id_column.trim().is_empty() || config.metadata.url_column.trim().is_empty() {
        anyhow::bail!("metadata.id_column and metadata.url_column must not be empty");
    }

    for abbr in &config.analysis.extra_abbreviations {
        if abbr.trim().is_empty() || abbr.contains(char::is_whitespace) {
            anyhow::bail!("invalid abbreviation {:?}, must be a single word", abbr);
        }
    }

    Ok(())
}
