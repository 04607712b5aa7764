//! Word tokenization over normalized text.

use super::lemma::Lemmatizer;

/// Punctuation stripped from every token, wherever it occurs.
const STRIP: &[char] = &['.', ',', '!', '?', ':', ';'];

/// Split normalized text into purely alphabetic tokens, without lemmatizing.
pub fn raw_words(normalized: &str) -> impl Iterator<Item = String> + '_ {
    normalized
        .split_whitespace()
        .map(|token| token.replace(STRIP, ""))
        .filter(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_alphabetic()))
}

/// Produce the lemma-form token sequence for normalized text.
///
/// This one sequence feeds both the word count and the sentiment match, so
/// the two always agree on what a word is.
pub fn tokenize(normalized: &str, lemmatizer: &dyn Lemmatizer) -> Vec<String> {
    raw_words(normalized)
        .map(|word| lemmatizer.lemmatize(&word))
        .collect()
}
