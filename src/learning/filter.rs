//! Heuristics deciding whether a diff candidate is worth learning.
//!
//! Genuine mis-transcriptions are phonetically and visually close to what
//! the user meant.  The rules below keep ordinary editing (swapping one
//! common word for another, rewriting a word entirely) out of the learned
//! dictionary.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::learning::diff::{levenshtein_distance, CorrectionCandidate};

/// Normalized edit distance above which two words are considered unrelated.
const MAX_EDIT_RATIO: f64 = 0.6;

static FUNCTION_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // articles, determiners
        "a", "an", "the", "this", "that", "these", "those", "some", "any", "each",
        "every", "either", "neither", "no", "all", "both", "few", "many", "much",
        "more", "most", "other", "another", "such", "what", "which", "whose",
        // pronouns
        "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "he",
        "him", "his", "himself", "she", "her", "hers", "herself", "it", "its",
        "itself", "we", "us", "our", "ours", "they", "them", "their", "theirs",
        "who", "whom", "someone", "something", "anyone", "anything", "everyone",
        "everything", "nothing",
        // prepositions
        "in", "on", "at", "to", "for", "from", "of", "with", "by", "about", "into",
        "onto", "over", "under", "up", "down", "out", "off", "through", "after",
        "before", "between", "during", "without", "within", "against", "around",
        "near", "across", "behind", "beyond", "since", "until", "upon", "toward",
        // conjunctions
        "and", "or", "but", "so", "yet", "nor", "if", "then", "than", "because",
        "while", "when", "where", "why", "how", "although", "though", "unless",
        "whether",
        // auxiliaries
        "is", "am", "are", "was", "were", "be", "been", "being", "do", "does", "did",
        "have", "has", "had", "will", "would", "shall", "should", "can", "could",
        "may", "might", "must",
        // adverbs and fillers
        "not", "just", "also", "very", "really", "too", "only", "even", "still",
        "already", "now", "here", "there", "again", "ever", "never", "always",
        "well", "quite", "maybe", "yes", "ok", "okay", "like", "actually",
        "basically", "probably",
        // contractions (apostrophes stripped)
        "im", "ive", "id", "ill", "youre", "dont", "doesnt", "didnt", "isnt", "wasnt",
        "cant", "wont", "its", "thats", "theres", "lets",
    ]
    .into_iter()
    .collect()
});

/// Return `true` when `candidate` looks like a transcription fix rather than
/// an editorial change.
///
/// ```rust
/// use voice_text_refine::learning::{is_likely_correction, CorrectionCandidate};
///
/// assert!(!is_likely_correction(&CorrectionCandidate::new("the", "a")));
/// assert!(is_likely_correction(&CorrectionCandidate::new("anthropick", "Anthropic")));
/// ```
pub fn is_likely_correction(candidate: &CorrectionCandidate) -> bool {
    let original = trim_punctuation(&candidate.original);
    let corrected = trim_punctuation(&candidate.corrected);
    if original.is_empty() || corrected.is_empty() {
        return false;
    }

    let a = original.to_lowercase();
    let b = corrected.to_lowercase();

    // Same word: only a proper-noun capitalization fix is interesting.
    if a == b {
        return starts_lowercase(original) && starts_uppercase(corrected);
    }

    // "cant" -> "can't"
    if strip_apostrophes(&a) == strip_apostrophes(&b) {
        return true;
    }

    if is_function_word(&a) && is_function_word(&b) {
        return false;
    }

    let distance = levenshtein_distance(&a, &b) as f64;
    let longest = a.chars().count().max(b.chars().count()) as f64;
    distance / longest <= MAX_EDIT_RATIO
}

fn trim_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| c.is_ascii_punctuation() || is_typographic_punctuation(c))
}

fn is_typographic_punctuation(c: char) -> bool {
    matches!(
        c,
        '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' | '\u{2026}' | '\u{2013}' | '\u{2014}'
    )
}

fn strip_apostrophes(word: &str) -> String {
    word.chars()
        .filter(|c| !matches!(c, '\'' | '\u{2018}' | '\u{2019}'))
        .collect()
}

fn is_function_word(word: &str) -> bool {
    FUNCTION_WORDS.contains(strip_apostrophes(word).as_str())
}

fn starts_lowercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_lowercase)
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
