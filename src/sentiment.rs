//! Lexicon-matching sentiment scores.

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;

/// Positive and negative match counts for one token sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub positive: usize,
    pub negative: usize,
    /// Matched positive tokens, in document order (with repeats).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positive_matches: Vec<String>,
    /// Matched negative tokens, in document order (with repeats).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub negative_matches: Vec<String>,
}

impl SentimentScore {
    /// Tokens that matched either list.
    pub fn charged(&self) -> usize {
        self.positive + self.negative
    }
}

/// Count tokens found in each lexicon list.
///
/// Membership is tested independently, so a token listed as both positive
/// and negative counts toward both scores.
pub fn score(tokens: &[String], lexicon: &Lexicon) -> SentimentScore {
    let mut result = SentimentScore::default();

    for token in tokens {
        if lexicon.is_positive(token) {
            result.positive_matches.push(token.clone());
        }
        if lexicon.is_negative(token) {
            result.negative_matches.push(token.clone());
        }
    }

    result.positive = result.positive_matches.len();
    result.negative = result.negative_matches.len();
    result
}
