//! Per-document analysis.

use crate::lexicon::Lexicon;
use crate::metrics::ReadabilityMetrics;
use crate::sentiment;
use crate::text::{self, Lemmatizer, SentenceSegmenter};

use super::{Document, DocumentMetrics, SkipReason};

/// The pure per-document pipeline.
///
/// Holds only shared, read-only collaborators, so one analyzer can serve any
/// number of threads.
pub struct Analyzer<'a> {
    lexicon: &'a Lexicon,
    lemmatizer: &'a dyn Lemmatizer,
    segmenter: &'a SentenceSegmenter,
    show_matches: bool,
}

impl<'a> Analyzer<'a> {
    pub fn new(
        lexicon: &'a Lexicon,
        lemmatizer: &'a dyn Lemmatizer,
        segmenter: &'a SentenceSegmenter,
    ) -> Self {
        Self {
            lexicon,
            lemmatizer,
            segmenter,
            show_matches: false,
        }
    }

    /// Log matched sentiment words at `info` instead of `debug`.
    pub fn show_matches(mut self, show: bool) -> Self {
        self.show_matches = show;
        self
    }

    /// Analyze one document.
    pub fn analyze(&self, doc: &Document) -> Result<DocumentMetrics, SkipReason> {
        let normalized = text::normalize(&doc.text);
        let tokens = text::tokenize(&normalized, self.lemmatizer);
        if tokens.is_empty() {
            return Err(SkipReason::NoValidWords);
        }
        let sentences = self.segmenter.split(&normalized);

        let sentiment = sentiment::score(&tokens, self.lexicon);
        if self.show_matches {
            tracing::info!(
                id = %doc.id,
                positive = ?sentiment.positive_matches,
                negative = ?sentiment.negative_matches,
                "sentiment matches"
            );
        } else {
            tracing::debug!(
                id = %doc.id,
                positive = ?sentiment.positive_matches,
                negative = ?sentiment.negative_matches,
                "sentiment matches"
            );
        }

        let readability =
            ReadabilityMetrics::compute(&tokens, sentences.len(), &sentiment, &doc.text);
        if let Some(metric) = readability.first_non_finite() {
            return Err(SkipReason::NonFiniteMetric(metric.to_string()));
        }

        Ok(DocumentMetrics {
            id: doc.id.clone(),
            sentiment,
            readability,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::FOG_FACTOR;
    use crate::text::RuleLemmatizer;

    fn run(text: &str) -> Result<DocumentMetrics, SkipReason> {
        let lexicon = Lexicon::from_words(["good", "great"], ["bad"]);
        let lemmatizer = RuleLemmatizer::new().with_vocabulary(lexicon.vocabulary().map(String::from));
        let segmenter = SentenceSegmenter::new();
        Analyzer::new(&lexicon, &lemmatizer, &segmenter).analyze(&Document::new("doc", text))
    }

    #[test]
    fn test_end_to_end_example() {
        let m = run("This is good. This is very bad and bad again.").unwrap();
        let r = &m.readability;

        assert_eq!(m.sentiment.positive, 1);
        assert_eq!(m.sentiment.negative, 2);
        assert_eq!(r.word_count, 10);
        assert_eq!(r.sentence_count, 2);
        assert_eq!(r.complex_word_count, 0);
        assert!((r.avg_sentence_length - 5.0).abs() < 1e-9);
        assert!((r.fog_index - FOG_FACTOR * 5.0).abs() < 1e-9);
        assert!(r.polarity_score < 0.0);
    }

    #[test]
    fn test_no_valid_words_is_skipped() {
        assert_eq!(run("1234 5678 !!! ... $$$"), Err(SkipReason::NoValidWords));
        assert_eq!(run(""), Err(SkipReason::NoValidWords));
    }

    #[test]
    fn test_pronouns_use_raw_text() {
        let m = run("US sent troops; we are ready").unwrap();
        assert_eq!(m.readability.personal_pronouns, 1);
        // Normalized tokens still include "us" as a word.
        assert_eq!(m.readability.word_count, 6);
    }

    #[test]
    fn test_text_without_terminator_is_one_sentence() {
        let m = run("good words without an ending").unwrap();
        assert_eq!(m.readability.sentence_count, 1);
    }
}
