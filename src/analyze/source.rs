//! Document sources.
//!
//! The pipeline never knows where text comes from. A [`DocumentSource`]
//! lists identifiers and fetches text by identifier; fetch failures become
//! per-document skips.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use super::FetchError;
use crate::lexicon::decode_text;

/// Yields raw document text keyed by identifier.
pub trait DocumentSource: Sync {
    /// All document identifiers, in a stable order.
    fn identifiers(&self) -> anyhow::Result<Vec<String>>;

    /// Raw text for one identifier.
    fn fetch(&self, id: &str) -> Result<String, FetchError>;
}

/// In-memory documents.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(id.into(), text.into());
    }

    pub fn with(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(id, text);
        self
    }
}

impl DocumentSource for MemorySource {
    fn identifiers(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn fetch(&self, id: &str) -> Result<String, FetchError> {
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(id.to_string()))
    }
}

/// One file per document; the identifier is the file stem (`123.txt` → `123`).
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    extensions: Vec<String>,
    excluded: Option<GlobSet>,
    recursive: bool,
    files: BTreeMap<String, PathBuf>,
}

impl DirectorySource {
    /// Scan `root` for `.txt` files (non-recursive).
    pub fn open<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        Self::builder(root).build()
    }

    pub fn builder<P: AsRef<Path>>(root: P) -> DirectorySourceBuilder {
        DirectorySourceBuilder {
            root: root.as_ref().to_path_buf(),
            extensions: vec!["txt".to_string()],
            excluded_paths: Vec::new(),
            recursive: false,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn scan(&mut self) -> anyhow::Result<()> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .max_depth(max_depth)
            .into_iter()
            .filter_entry(|e| {
                // Skip hidden files and directories below the root
                e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.')
            })
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if !self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
                continue;
            }

            let rel = path.strip_prefix(&self.root).unwrap_or(path);
            if let Some(excluded) = &self.excluded {
                if excluded.is_match(rel) {
                    tracing::debug!(path = %rel.display(), "excluded by pattern");
                    continue;
                }
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!(path = %path.display(), "skipping file with non UTF-8 name");
                continue;
            };

            if let Some(previous) = self.files.insert(stem.to_string(), path.to_path_buf()) {
                tracing::warn!(
                    id = stem,
                    kept = %path.display(),
                    dropped = %previous.display(),
                    "duplicate document identifier"
                );
            }
        }

        Ok(())
    }
}

impl DocumentSource for DirectorySource {
    fn identifiers(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn fetch(&self, id: &str) -> Result<String, FetchError> {
        let path = self
            .files
            .get(id)
            .ok_or_else(|| FetchError::NotFound(id.to_string()))?;
        let bytes = std::fs::read(path).map_err(|source| FetchError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(decode_text(bytes))
    }
}

/// Options for [`DirectorySource`].
pub struct DirectorySourceBuilder {
    root: PathBuf,
    extensions: Vec<String>,
    excluded_paths: Vec<String>,
    recursive: bool,
}

impl DirectorySourceBuilder {
    /// File extensions to include, without the dot.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| {
                let e: String = e.into();
                e.trim_start_matches('.').to_string()
            })
            .collect();
        self
    }

    /// Glob patterns, relative to the root, for files to leave out.
    pub fn excluded_paths<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_paths = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn build(self) -> anyhow::Result<DirectorySource> {
        if !self.root.is_dir() {
            anyhow::bail!("document directory {:?} does not exist", self.root);
        }

        let excluded = if self.excluded_paths.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in &self.excluded_paths {
                let glob = Glob::new(pattern).map_err(|e| {
                    anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e)
                })?;
                builder.add(glob);
            }
            Some(builder.build()?)
        };

        let mut source = DirectorySource {
            root: self.root,
            extensions: self.extensions,
            excluded,
            recursive: self.recursive,
            files: BTreeMap::new(),
        };
        source.scan()?;
        Ok(source)
    }
}
