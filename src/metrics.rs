//! Readability, complexity and sentiment-ratio metrics.
//!
//! All ratios are guarded: a zero denominator yields 0 rather than a
//! division fault. The two sentiment ratios add [`EPSILON`] to the
//! denominator instead.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::sentiment::SentimentScore;
use crate::text::count_syllables;

/// Denominator offset for polarity and subjectivity.
pub const EPSILON: f64 = 1e-6;

/// A word with more syllables than this is complex.
pub const COMPLEX_SYLLABLES: usize = 2;

/// Gunning fog multiplier.
pub const FOG_FACTOR: f64 = 0.4;

lazy_static! {
    static ref PERSONAL_PRONOUN: Regex = Regex::new(r"(?i)\b(i|we|my|ours|us)\b").unwrap();
}

/// Every numeric metric computed for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub complex_word_count: usize,
    pub syllable_count: usize,
    pub avg_sentence_length: f64,
    pub percentage_complex_words: f64,
    pub fog_index: f64,
    pub syllable_per_word: f64,
    pub avg_word_length: f64,
    pub polarity_score: f64,
    pub subjectivity_score: f64,
    pub personal_pronouns: usize,
}

/// `numerator / denominator`, or 0 when the denominator is 0.
pub fn guarded_ratio(numerator: f64, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}

/// Net sentiment direction in (-1, 1).
pub fn polarity(positive: usize, negative: usize) -> f64 {
    (positive as f64 - negative as f64) / ((positive + negative) as f64 + EPSILON)
}

/// Share of words carrying sentiment.
pub fn subjectivity(positive: usize, negative: usize, word_count: usize) -> f64 {
    (positive + negative) as f64 / (word_count as f64 + EPSILON)
}

/// Count first-person pronouns in raw (unnormalized) text.
///
/// Matching is case-insensitive, except that an all-caps `US` is the
/// country, not the pronoun, and is not counted.
pub fn count_personal_pronouns(raw: &str) -> usize {
    PERSONAL_PRONOUN
        .find_iter(raw)
        .filter(|m| m.as_str() != "US")
        .count()
}

impl ReadabilityMetrics {
    /// Compute all metrics with the built-in syllable counter.
    pub fn compute(
        tokens: &[String],
        sentence_count: usize,
        sentiment: &SentimentScore,
        raw: &str,
    ) -> Self {
        Self::compute_with(tokens, sentence_count, sentiment, raw, count_syllables)
    }

    /// Compute all metrics using `syllables` as the per-word counter.
    pub fn compute_with<F>(
        tokens: &[String],
        sentence_count: usize,
        sentiment: &SentimentScore,
        raw: &str,
        syllables: F,
    ) -> Self
    where
        F: Fn(&str) -> usize,
    {
        let word_count = tokens.len();

        let mut complex_word_count = 0;
        let mut syllable_count = 0;
        let mut letters = 0;
        for token in tokens {
            let s = syllables(token);
            if s > COMPLEX_SYLLABLES {
                complex_word_count += 1;
            }
            syllable_count += s;
            letters += token.chars().count();
        }

        let avg_sentence_length = guarded_ratio(word_count as f64, sentence_count);
        let percentage_complex_words = guarded_ratio(complex_word_count as f64, word_count) * 100.0;

        Self {
            word_count,
            sentence_count,
            complex_word_count,
            syllable_count,
            avg_sentence_length,
            percentage_complex_words,
            fog_index: FOG_FACTOR * (avg_sentence_length + percentage_complex_words),
            syllable_per_word: guarded_ratio(syllable_count as f64, word_count),
            avg_word_length: guarded_ratio(letters as f64, word_count),
            polarity_score: polarity(sentiment.positive, sentiment.negative),
            subjectivity_score: subjectivity(sentiment.positive, sentiment.negative, word_count),
            personal_pronouns: count_personal_pronouns(raw),
        }
    }

    /// Name of the first floating-point metric that is NaN or infinite.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("avg_sentence_length", self.avg_sentence_length),
            ("percentage_complex_words", self.percentage_complex_words),
            ("fog_index", self.fog_index),
            ("syllable_per_word", self.syllable_per_word),
            ("avg_word_length", self.avg_word_length),
            ("polarity_score", self.polarity_score),
            ("subjectivity_score", self.subjectivity_score),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_zero_words_all_zero() {
        let m = ReadabilityMetrics::compute(&[], 0, &SentimentScore::default(), "");
        assert_eq!(m.word_count, 0);
        assert_eq!(m.avg_sentence_length, 0.0);
        assert_eq!(m.percentage_complex_words, 0.0);
        assert_eq!(m.syllable_per_word, 0.0);
        assert_eq!(m.avg_word_length, 0.0);
        assert_eq!(m.fog_index, 0.0);
        assert_eq!(m.polarity_score, 0.0);
        assert_eq!(m.subjectivity_score, 0.0);
        assert!(m.first_non_finite().is_none());
    }

    #[test]
    fn test_zero_sentences_guarded() {
        let m = ReadabilityMetrics::compute(&tokens(&["word"]), 0, &SentimentScore::default(), "");
        assert_eq!(m.avg_sentence_length, 0.0);
        assert!(m.first_non_finite().is_none());
    }

    #[test]
    fn test_formulas_with_fixed_syllables() {
        // Syllables = length / 2, so "abcdef" (3) is the only complex word.
        let toks = tokens(&["ab", "abcd", "abcdef", "ab"]);
        let sentiment = SentimentScore {
            positive: 1,
            negative: 0,
            ..Default::default()
        };
        let m = ReadabilityMetrics::compute_with(&toks, 2, &sentiment, "", |w| w.len() / 2);

        assert_eq!(m.word_count, 4);
        assert_eq!(m.complex_word_count, 1);
        assert_eq!(m.syllable_count, 1 + 2 + 3 + 1);
        assert!(approx(m.avg_sentence_length, 2.0));
        assert!(approx(m.percentage_complex_words, 25.0));
        assert!(approx(m.fog_index, 0.4 * 27.0));
        assert!(approx(m.syllable_per_word, 7.0 / 4.0));
        assert!(approx(m.avg_word_length, 14.0 / 4.0));
        assert!(approx(m.polarity_score, 1.0 / (1.0 + EPSILON)));
        assert!(approx(m.subjectivity_score, 1.0 / (4.0 + EPSILON)));
    }

    #[test]
    fn test_polarity_bounds() {
        for (p, n) in [(0, 0), (1, 0), (0, 1), (1000, 0), (0, 1000), (7, 3), (3, 7)] {
            let v = polarity(p, n);
            assert!(v > -1.0 && v < 1.0, "polarity({}, {}) = {}", p, n, v);
        }
        assert!(polarity(5, 1) > 0.0);
        assert!(polarity(1, 5) < 0.0);
        assert_eq!(polarity(0, 0), 0.0);
    }

    #[test]
    fn test_pronouns_exclude_country() {
        assert_eq!(count_personal_pronouns("US sent troops; we are ready"), 1);
    }

    #[test]
    fn test_pronouns_case_insensitive() {
        assert_eq!(count_personal_pronouns("I think My plan suits us. OURS is best, We agree."), 5);
        assert_eq!(count_personal_pronouns("Us and uS count"), 2);
    }

    #[test]
    fn test_pronouns_need_word_boundaries() {
        assert_eq!(count_personal_pronouns("mystery users wear ourselves thin; iPhone"), 0);
        assert_eq!(count_personal_pronouns(""), 0);
    }

    #[test]
    fn test_non_finite_detected() {
        let mut m = ReadabilityMetrics::compute(&tokens(&["word"]), 1, &SentimentScore::default(), "");
        m.fog_index = f64::NAN;
        assert_eq!(m.first_non_finite(), Some("fog_index"));
    }
}
