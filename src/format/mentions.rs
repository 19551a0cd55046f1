//! Spoken hashtags and @-mentions for work chat and social apps.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::code::has_known_extension;

static HASHTAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bhash(?:\s*tag)?\s+([A-Za-z0-9_][A-Za-z0-9_\-]*)").unwrap());

static MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bat\s+([A-Za-z0-9_][A-Za-z0-9_\-.]*[A-Za-z0-9_])").unwrap());

/// Words that follow a spoken "at" in ordinary prose.
const NOT_HANDLES: &[&str] = &[
    "a", "an", "the", "all", "least", "most", "last", "first", "once", "home", "work", "school",
    "noon", "night", "midnight", "lunch", "dinner", "breakfast", "this", "that", "these", "those",
    "my", "your", "his", "her", "our", "their", "its", "it", "me", "him", "them", "us", "which",
    "what", "where", "some", "any", "best", "worst", "times", "length", "ease", "risk", "hand",
    "play", "sea", "war", "peace", "one", "church", "about", "around",
];

/// "hashtag launch day" → "#launch day"; "ping at sarah" → "ping @sarah".
///
/// "at" followed by a common word, a number or a file name is left alone.
pub fn apply_mentions(text: &str) -> String {
    let tagged = HASHTAG.replace_all(text, "#$1");
    MENTION
        .replace_all(&tagged, |caps: &Captures| {
            let handle = &caps[1];
            if is_handle(handle) {
                format!("@{handle}")
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

fn is_handle(word: &str) -> bool {
    let lower = word.to_ascii_lowercase();
    !word.starts_with(|c: char| c.is_ascii_digit())
        && !NOT_HANDLES.contains(&lower.as_str())
        && !has_known_extension(word)
        && !word.contains('.')
}
