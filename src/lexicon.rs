//! Positive/negative word dictionaries.
//!
//! A lexicon source is a plain-text file with one word per line. Lines whose
//! first non-blank character is the comment prefix (`;` in the published
//! master dictionaries) are ignored, as are blank lines.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default comment prefix for lexicon sources.
pub const DEFAULT_COMMENT_PREFIX: &str = ";";

/// Errors raised while loading a lexicon. All of them are batch-fatal.
#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("cannot read {kind} word list {path:?}: {source}")]
    Unreadable {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{kind} word list {path:?} contains no entries")]
    Empty { kind: &'static str, path: PathBuf },
}

/// The pair of sentiment word sets. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
}

impl Lexicon {
    /// Load both word lists using the default comment prefix.
    pub fn load<P: AsRef<Path>, N: AsRef<Path>>(
        positive: P,
        negative: N,
    ) -> Result<Self, LexiconError> {
        Self::load_with_prefix(positive, negative, DEFAULT_COMMENT_PREFIX)
    }

    /// Load both word lists. Either list missing, unreadable or empty is an error.
    pub fn load_with_prefix<P: AsRef<Path>, N: AsRef<Path>>(
        positive: P,
        negative: N,
        comment_prefix: &str,
    ) -> Result<Self, LexiconError> {
        let positive = load_required("positive", positive.as_ref(), comment_prefix)?;
        let negative = load_required("negative", negative.as_ref(), comment_prefix)?;
        Ok(Self { positive, negative })
    }

    /// Build a lexicon directly from word iterators. Entries are lowercased.
    pub fn from_words<I, J, S, T>(positive: I, negative: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            positive: positive
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            negative: negative
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn positive(&self) -> &HashSet<String> {
        &self.positive
    }

    pub fn negative(&self) -> &HashSet<String> {
        &self.negative
    }

    pub fn is_positive(&self, word: &str) -> bool {
        self.positive.contains(word)
    }

    pub fn is_negative(&self, word: &str) -> bool {
        self.negative.contains(word)
    }

    /// Every word in either list. Used to seed the lemmatizer's known words.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.positive
            .iter()
            .chain(self.negative.iter())
            .map(String::as_str)
    }

    /// Words present in both lists. Overlap is allowed but worth reporting.
    pub fn overlap(&self) -> Vec<&str> {
        let mut shared: Vec<&str> = self
            .positive
            .intersection(&self.negative)
            .map(String::as_str)
            .collect();
        shared.sort_unstable();
        shared
    }
}

fn load_required(
    kind: &'static str,
    path: &Path,
    comment_prefix: &str,
) -> Result<HashSet<String>, LexiconError> {
    let words = load_word_list(path, comment_prefix).map_err(|source| LexiconError::Unreadable {
        kind,
        path: path.to_path_buf(),
        source,
    })?;

    if words.is_empty() {
        return Err(LexiconError::Empty {
            kind,
            path: path.to_path_buf(),
        });
    }

    tracing::info!(kind, entries = words.len(), path = %path.display(), "loaded word list");
    Ok(words)
}

/// Read and parse a single word list from disk.
pub fn load_word_list(path: &Path, comment_prefix: &str) -> std::io::Result<HashSet<String>> {
    let bytes = fs::read(path)?;
    Ok(parse_word_list(&decode_text(bytes), comment_prefix))
}

/// Parse word-list text into a set of lowercase entries.
pub fn parse_word_list(content: &str, comment_prefix: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| comment_prefix.is_empty() || !line.starts_with(comment_prefix))
        .map(str::to_lowercase)
        .collect()
}

/// Decode bytes as UTF-8, falling back to Latin-1 (every byte maps to U+0000..U+00FF).
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    }
}
