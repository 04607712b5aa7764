//! Text processing: normalization, tokenization, lemmatization, sentence
//! segmentation and syllable counting.

pub mod lemma;
pub mod normalize;
pub mod sentence;
pub mod syllable;
pub mod tokenize;

pub use lemma::{Lemmatizer, RuleLemmatizer};
pub use normalize::{collapse_whitespace, normalize};
pub use sentence::{SentenceSegmenter, DEFAULT_ABBREVIATIONS};
pub use syllable::count_syllables;
pub use tokenize::{raw_words, tokenize};
