//! Sentence segmentation over normalized text.
//!
//! Normalized text carries `.`, `!` and `?` as standalone tokens, so a
//! sentence boundary is a terminator token. A period does not end a
//! sentence when it follows a known abbreviation or a single letter
//! (initials, `u . s .`, `e . g .`). The words `i` and `a` are not initials.

use std::collections::HashSet;

/// Abbreviations that take a trailing period without ending a sentence.
pub const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "inc", "ltd",
    "co", "corp", "dept", "univ", "nos", "fig", "figs", "approx", "est", "vol",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
    "gov", "govt", "rs", "sq", "ft", "av", "ave",
];

/// Splits normalized text into sentences.
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    abbreviations: HashSet<String>,
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self {
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SentenceSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add abbreviations to the default set. Entries are lowercased and any
    /// trailing period is dropped.
    pub fn with_abbreviations<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.abbreviations.extend(
            extra
                .into_iter()
                .map(|s| s.as_ref().trim().trim_end_matches('.').to_lowercase())
                .filter(|s| !s.is_empty()),
        );
        self
    }

    fn is_abbreviation(&self, token: &str) -> bool {
        is_initial(token) || self.abbreviations.contains(token)
    }

    /// Split normalized text into sentences. Sentences with no alphabetic
    /// word are dropped, so punctuation-only input yields an empty list.
    pub fn split(&self, normalized: &str) -> Vec<String> {
        let mut sentences: Vec<String> = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for token in normalized.split_whitespace() {
            let terminator = matches!(token, "." | "!" | "?");
            if !terminator {
                current.push(token);
                continue;
            }

            // A run like "! ?" or ". . ." closes a single sentence.
            if current.is_empty() {
                if let Some(last) = sentences.last_mut() {
                    last.push(' ');
                    last.push_str(token);
                }
                continue;
            }

            let previous = current.last().copied().unwrap_or("");
            current.push(token);
            if token == "." && self.is_abbreviation(previous) {
                continue;
            }
            flush(&mut current, &mut sentences);
        }
        flush(&mut current, &mut sentences);

        sentences
    }
}

/// A single letter other than the words `i` and `a`.
fn is_initial(token: &str) -> bool {
    token.len() == 1
        && token.chars().all(|c| c.is_ascii_alphabetic())
        && !matches!(token, "i" | "a")
}

fn flush(current: &mut Vec<&str>, sentences: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let has_word = current
        .iter()
        .any(|t| t.chars().any(|c| c.is_ascii_alphabetic()));
    if has_word {
        sentences.push(current.join(" "));
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalize;

    fn split(raw: &str) -> Vec<String> {
        SentenceSegmenter::new().split(&normalize(raw))
    }

    #[test]
    fn test_basic_split() {
        let s = split("This is good. This is very bad and bad again.");
        assert_eq!(s, vec!["this is good .", "this is very bad and bad again ."]);
    }

    #[test]
    fn test_question_and_exclamation() {
        assert_eq!(split("Really? Yes! Fine.").len(), 3);
    }

    #[test]
    fn test_terminator_runs_close_one_sentence() {
        let s = split("What?! No way... Okay.");
        assert_eq!(s.len(), 3);
        assert_eq!(s[0], "what ? !");
        assert_eq!(s[1], "no way . . .");
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        let s = split("Dr. Smith met Mr. Jones. They talked.");
        assert_eq!(s.len(), 2);
        assert_eq!(s[0], "dr . smith met mr . jones .");
    }

    #[test]
    fn test_initials_do_not_split() {
        let s = split("The U.S. economy grew, e.g. in exports. It slowed later.");
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_pronoun_i_ends_sentence() {
        let s = split("So did I. Then we left.");
        assert_eq!(s, vec!["so did i .", "then we left ."]);
    }

    #[test]
    fn test_word_no_ends_sentence() {
        assert_eq!(split("The answer is no. We left anyway.").len(), 2);
    }

    #[test]
    fn test_letter_a_ends_sentence() {
        assert_eq!(split("I took vitamin A. It helped.").len(), 2);
        // Other single letters are still initials.
        assert_eq!(split("Ask J. Smith. He knows.").len(), 2);
    }

    #[test]
    fn test_trailing_text_without_terminator() {
        let s = split("First sentence. and a fragment");
        assert_eq!(s, vec!["first sentence .", "and a fragment"]);
    }

    #[test]
    fn test_no_sentences() {
        assert!(split("").is_empty());
        assert!(split("... !!! ???").is_empty());
        assert!(split("123 456.").is_empty());
    }

    #[test]
    fn test_extra_abbreviations() {
        let seg = SentenceSegmenter::new().with_abbreviations(["Cf.", "ibid"]);
        let s = seg.split(&normalize("See cf. the notes. Done."));
        assert_eq!(s.len(), 2);
    }
}
