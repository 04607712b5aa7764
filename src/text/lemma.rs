//! Rule-based lemmatization.
//!
//! [`RuleLemmatizer`] reduces inflected English word forms to a dictionary
//! form: plurals to singular, `-ing`/`-ed`/`-s` verb forms to the base verb.
//! It is deliberately conservative. Irregular forms come from a fixed table,
//! a list of uninflected words is never touched, and words of three letters
//! or fewer pass through unchanged.
//!
//! When a known-word vocabulary is attached, words already in it are treated
//! as lemmas, and a rule candidate that appears in it is preferred over the
//! heuristic choice.

use std::collections::HashSet;

use phf::{phf_map, phf_set};

/// Maps a lowercase alphabetic word to its lemma.
///
/// Implementations must be stateless with respect to the words they see so a
/// single instance can be shared across threads.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, word: &str) -> String;
}

/// Irregular inflections that suffix rules cannot recover.
static IRREGULAR: phf::Map<&'static str, &'static str> = phf_map! {
    // nouns
    "children" => "child",
    "men" => "man",
    "women" => "woman",
    "feet" => "foot",
    "teeth" => "tooth",
    "geese" => "goose",
    "mice" => "mouse",
    "lives" => "life",
    "wives" => "wife",
    "knives" => "knife",
    "leaves" => "leaf",
    "halves" => "half",
    "selves" => "self",
    "shelves" => "shelf",
    "thieves" => "thief",
    "wolves" => "wolf",
    "data" => "datum",
    "criteria" => "criterion",
    "phenomena" => "phenomenon",
    "analyses" => "analysis",
    "crises" => "crisis",
    "theses" => "thesis",
    // verbs
    "am" => "be",
    "is" => "be",
    "are" => "be",
    "was" => "be",
    "were" => "be",
    "been" => "be",
    "being" => "be",
    "has" => "have",
    "had" => "have",
    "having" => "have",
    "does" => "do",
    "did" => "do",
    "done" => "do",
    "doing" => "do",
    "went" => "go",
    "gone" => "go",
    "goes" => "go",
    "made" => "make",
    "said" => "say",
    "took" => "take",
    "taken" => "take",
    "gave" => "give",
    "given" => "give",
    "came" => "come",
    "saw" => "see",
    "seen" => "see",
    "knew" => "know",
    "known" => "know",
    "thought" => "think",
    "brought" => "bring",
    "bought" => "buy",
    "caught" => "catch",
    "taught" => "teach",
    "found" => "find",
    "told" => "tell",
    "felt" => "feel",
    "kept" => "keep",
    "left" => "leave",
    "meant" => "mean",
    "built" => "build",
    "sent" => "send",
    "spent" => "spend",
    "held" => "hold",
    "stood" => "stand",
    "understood" => "understand",
    "began" => "begin",
    "begun" => "begin",
    "wrote" => "write",
    "written" => "write",
    "chose" => "choose",
    "chosen" => "choose",
    "grew" => "grow",
    "grown" => "grow",
    "drove" => "drive",
    "driven" => "drive",
    "rose" => "rise",
    "risen" => "rise",
    "fell" => "fall",
    "fallen" => "fall",
    "led" => "lead",
    "paid" => "pay",
    "lost" => "lose",
    "won" => "win",
    "ran" => "run",
    "became" => "become",
    "lying" => "lie",
    "dying" => "die",
    "died" => "die",
    "lied" => "lie",
    "tied" => "tie",
    "used" => "use",
    "using" => "use",
    "added" => "add",
    "adding" => "add",
};

/// Words that look inflected but are not.
static UNINFLECTED: phf::Set<&'static str> = phf_set! {
    "news", "series", "species", "means", "physics", "economics", "politics",
    "mathematics", "statistics", "ethics", "always", "perhaps", "whereas",
    "towards", "afterwards", "sometimes", "besides", "thus", "various",
    "bias", "alias", "canvas", "atlas", "gas", "lens", "process", "business",
    "success", "access", "address", "progress", "express", "wellness",
    "nothing", "something", "anything", "everything", "morning", "evening",
    "during", "ceiling", "bring", "spring", "string", "thing", "sing", "king",
    "wing", "ring", "swing", "sting", "cling", "fling", "sling",
    "hundred", "indeed", "naked", "wicked", "sacred", "kindred", "bred",
    "shed", "speed", "seed", "feed", "need", "greed", "breed", "bleed", "steed",
    "exceed", "succeed", "proceed",
    "united", "limited", "sophisticated", "dedicated", "embed",
    "themselves", "ourselves", "yourselves", "christmas",
    // nouns in -ling and -ding
    "sibling", "darling", "duckling", "seedling", "sapling", "starling", "yearling",
    "inkling", "underling", "weakling", "dumpling", "earthling", "fledgling",
    "gosling", "shilling", "sterling", "stripling", "pudding", "wedding", "bedding",
};

/// Doubled final consonants that are kept when undoubling (`fall`, `miss`).
const KEEP_DOUBLE: &[char] = &['l', 's', 'z', 'f'];

/// The fixed rule set.
#[derive(Debug, Clone, Default)]
pub struct RuleLemmatizer {
    vocabulary: HashSet<String>,
}

impl RuleLemmatizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach known lemmas. Known words are returned unchanged, and known
    /// candidates beat the heuristic choice.
    pub fn with_vocabulary<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vocabulary.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        if self.vocabulary.contains(word) {
            return word.to_string();
        }
        if let Some(lemma) = IRREGULAR.get(word) {
            return (*lemma).to_string();
        }
        if UNINFLECTED.contains(word) || word.len() <= 3 {
            return word.to_string();
        }

        let candidates = candidates(word);
        if let Some(known) = candidates
            .iter()
            .find(|c| self.vocabulary.contains(c.as_str()))
        {
            return known.clone();
        }
        candidates
            .into_iter()
            .next()
            .unwrap_or_else(|| word.to_string())
    }
}

/// Rule candidates for `word`, most plausible first. Empty when no rule applies.
fn candidates(word: &str) -> Vec<String> {
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() >= 2 {
            return vec![format!("{}y", stem), format!("{}ie", stem)];
        }
    }
    if let Some(stem) = word.strip_suffix("ied") {
        if stem.len() >= 2 {
            return vec![format!("{}y", stem), format!("{}ie", stem)];
        }
    }
    if word.ends_with("sses") {
        return vec![word[..word.len() - 2].to_string()];
    }
    if let Some(stem) = word.strip_suffix("es") {
        if ["x", "ch", "sh", "zz", "ss"].iter().any(|s| stem.ends_with(s)) {
            return vec![stem.to_string(), format!("{}e", stem)];
        }
    }
    if let Some(stem) = word.strip_suffix('s') {
        if ["s", "u", "i"].iter().any(|s| stem.ends_with(s)) {
            return Vec::new();
        }
        return vec![stem.to_string()];
    }
    if let Some(stem) = word.strip_suffix("ing") {
        return verb_stem_candidates(stem);
    }
    if let Some(stem) = word.strip_suffix("eed") {
        // agreed -> agree
        return vec![format!("{}ee", stem)];
    }
    if let Some(stem) = word.strip_suffix("ed") {
        return verb_stem_candidates(stem);
    }
    Vec::new()
}

/// Candidates for the stem left after removing `-ing` or `-ed`.
fn verb_stem_candidates(stem: &str) -> Vec<String> {
    if stem.len() < 2 || !stem.chars().any(is_vowel) {
        return Vec::new();
    }

    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();

    // running -> run, stopped -> stop
    if n >= 3 && chars[n - 1] == chars[n - 2] && !is_vowel(chars[n - 1]) {
        let undoubled: String = chars[..n - 1].iter().collect();
        if KEEP_DOUBLE.contains(&chars[n - 1]) {
            return vec![stem.to_string(), undoubled];
        }
        return vec![undoubled, stem.to_string()];
    }

    let with_e = format!("{}e", stem);
    if needs_silent_e(&chars) {
        vec![with_e, stem.to_string()]
    } else {
        vec![stem.to_string(), with_e]
    }
}

/// Whether a stripped verb stem most likely lost a silent `e`.
fn needs_silent_e(chars: &[char]) -> bool {
    let n = chars.len();
    let last = chars[n - 1];
    let prev = chars[n - 2];
    let before = if n >= 3 { Some(chars[n - 3]) } else { None };
    let after_consonant = before.map(|c| !is_vowel(c)).unwrap_or(false);
    let after_vowel = before.map(is_vowel).unwrap_or(false);

    match last {
        // English words do not end in these (giving, reducing, continued).
        'v' | 'c' | 'u' => true,
        // organizing, analysing, raised
        'z' | 's' if matches!(prev, 'i' | 'y') => true,
        // based, released, proposed
        's' if matches!(prev, 'a' | 'o') => true,
        // caused
        's' if prev == 'u' && after_vowel => true,
        // relating, generated, created
        't' if prev == 'a' && (after_consonant || chars.ends_with(&['c', 'r', 'e', 'a', 't'])) => {
            true
        }
        // handling, settled, cycled
        'l' if !is_vowel(prev) && !matches!(prev, 'l' | 'r' | 'w' | 'y') => true,
        // provided, included
        'd' if matches!(prev, 'i' | 'u') && after_consonant => true,
        // required, secured, compared
        'r' if matches!(prev, 'i' | 'u') || (prev == 'a' && after_consonant) => true,
        // described
        'b' if prev == 'i' => true,
        // managed, charged, judged, changed
        'g' if matches!(prev, 'a' | 'r' | 'd' | 'u') || (prev == 'n' && before == Some('a')) => {
            true
        }
        // making, hoping, writing: single-syllable consonant-vowel-consonant stem
        _ => {
            n >= 3
                && !is_vowel(last)
                && !matches!(last, 'w' | 'x' | 'y')
                && is_vowel(prev)
                && after_consonant
                && vowel_groups(chars) == 1
        }
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn vowel_groups(chars: &[char]) -> usize {
    let mut groups = 0;
    let mut prev = false;
    for &c in chars {
        let v = is_vowel(c);
        if v && !prev {
            groups += 1;
        }
        prev = v;
    }
    groups
}
