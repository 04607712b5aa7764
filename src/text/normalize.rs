//! Raw text normalization.
//!
//! The steps run in a fixed order. Punctuation is padded with spaces before
//! the character-class filter runs, otherwise `word.Next` would fuse into a
//! single token once the period is isolated.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Punctuation that gets its own token.
    static ref PUNCTUATION: Regex = Regex::new(r"([.,!?:;])").unwrap();

    /// Anything that is not an ASCII letter, whitespace, or a kept terminator.
    static ref NOISE: Regex = Regex::new(r"[^a-zA-Z\s.,!?]").unwrap();
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Produce normalized text from raw document text.
///
/// The result contains only ASCII letters, single spaces and `. , ! ?`,
/// is lowercase, and is a fixed point: normalizing it again yields the
/// same string.
pub fn normalize(raw: &str) -> String {
    let text = raw.replace('\n', " ");
    let text = collapse_whitespace(&text);
    let text = PUNCTUATION.replace_all(&text, " $1 ");
    let text = NOISE.replace_all(&text, " ");
    collapse_whitespace(&text).to_lowercase()
}
