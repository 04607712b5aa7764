//! Shared analysis components, built once per run.

use crate::analyze::Analyzer;
use crate::config::Config;
use crate::lexicon::{Lexicon, LexiconError};
use crate::text::{RuleLemmatizer, SentenceSegmenter};

/// The read-only state every document analysis borrows.
///
/// The lemmatizer's vocabulary is seeded from the lexicon, so a lexicon
/// entry is never reduced to some other form before matching.
pub struct Pipeline {
    lexicon: Lexicon,
    lemmatizer: RuleLemmatizer,
    segmenter: SentenceSegmenter,
    show_matches: bool,
}

impl Pipeline {
    pub fn new(lexicon: Lexicon) -> Self {
        let lemmatizer =
            RuleLemmatizer::new().with_vocabulary(lexicon.vocabulary().map(String::from));
        Self {
            lexicon,
            lemmatizer,
            segmenter: SentenceSegmenter::new(),
            show_matches: false,
        }
    }

    /// Load the lexicon named by `config` and apply its analysis options.
    pub fn from_config(config: &Config) -> Result<Self, LexiconError> {
        let lexicon = Lexicon::load_with_prefix(
            &config.lexicon.positive,
            &config.lexicon.negative,
            &config.lexicon.comment_prefix,
        )?;
        let overlap = lexicon.overlap();
        if !overlap.is_empty() {
            tracing::info!(
                count = overlap.len(),
                "words listed as both positive and negative count toward both scores"
            );
        }
        Ok(Self::new(lexicon)
            .with_abbreviations(&config.analysis.extra_abbreviations)
            .show_matches(config.analysis.show_matches))
    }

    pub fn with_abbreviations<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.segmenter = self.segmenter.with_abbreviations(extra);
        self
    }

    pub fn show_matches(mut self, show: bool) -> Self {
        self.show_matches = show;
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn analyzer(&self) -> Analyzer<'_> {
        Analyzer::new(&self.lexicon, &self.lemmatizer, &self.segmenter)
            .show_matches(self.show_matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::Document;

    #[test]
    fn test_lexicon_words_survive_lemmatization() {
        // "loving" would otherwise reduce to "love" and miss the list.
        let pipeline = Pipeline::new(Lexicon::from_words(["loving"], ["worse"]));
        let metrics = pipeline
            .analyzer()
            .analyze(&Document::new("1", "A loving gesture."))
            .unwrap();
        assert_eq!(metrics.sentiment.positive, 1);
    }

    #[test]
    fn test_extra_abbreviations() {
        let text = "Prices incl. tax went up. That is good.";
        let lexicon = || Lexicon::from_words(["good"], ["bad"]);

        let plain = Pipeline::new(lexicon());
        let metrics = plain.analyzer().analyze(&Document::new("1", text)).unwrap();
        assert_eq!(metrics.readability.sentence_count, 3);

        let extended = Pipeline::new(lexicon()).with_abbreviations(["incl."]);
        let metrics = extended.analyzer().analyze(&Document::new("1", text)).unwrap();
        assert_eq!(metrics.readability.sentence_count, 2);
    }
}
