//! Spoken emoji names → emoji, for chat apps.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// Cheap pre-check: if none of these occur, no replacement can match.
const KEYWORDS: &[&str] = &[
    "emoji", "face", "thumbs", "heart", "smiley", "laugh", "crying", "party", "fire", "rocket",
    "eyes", "clap", "skull", "shrug", "star", "sparkles", "muscle", "hundred", "100", "check",
    "thinking", "sunglasses", "wink", "pray", "wave", "ok hand",
];

/// Phrase → emoji.  Sorted by word count at load so multi-word phrases are
/// replaced before any single word they contain.
const PHRASES: &[(&str, &str)] = &[
    ("thumbs up emoji", "👍"),
    ("thumbs down emoji", "👎"),
    ("thumbs up", "👍"),
    ("thumbs down", "👎"),
    ("heart eyes emoji", "😍"),
    ("heart eyes", "😍"),
    ("red heart emoji", "❤️"),
    ("heart emoji", "❤️"),
    ("broken heart emoji", "💔"),
    ("smiley face emoji", "😊"),
    ("smiley face", "😊"),
    ("smiley emoji", "😊"),
    ("sad face emoji", "😢"),
    ("sad face", "😢"),
    ("crying laughing emoji", "😂"),
    ("crying laughing", "😂"),
    ("laughing emoji", "😂"),
    ("crying emoji", "😭"),
    ("winking face", "😉"),
    ("wink emoji", "😉"),
    ("thinking face", "🤔"),
    ("thinking emoji", "🤔"),
    ("party popper emoji", "🎉"),
    ("party popper", "🎉"),
    ("party emoji", "🎉"),
    ("fire emoji", "🔥"),
    ("rocket emoji", "🚀"),
    ("eyes emoji", "👀"),
    ("clapping emoji", "👏"),
    ("clap emoji", "👏"),
    ("skull emoji", "💀"),
    ("shrug emoji", "🤷"),
    ("star emoji", "⭐"),
    ("muscle emoji", "💪"),
    ("hundred emoji", "💯"),
    ("100 emoji", "💯"),
    ("check mark emoji", "✅"),
    ("check mark", "✅"),
    ("sunglasses emoji", "😎"),
    ("praying hands emoji", "🙏"),
    ("praying hands", "🙏"),
    ("pray emoji", "🙏"),
    ("waving hand emoji", "👋"),
    ("wave emoji", "👋"),
    ("ok hand emoji", "👌"),
    ("ok hand", "👌"),
    ("sparkles emoji", "✨"),
    ("sparkles", "✨"),
];

static REPLACEMENTS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    let mut phrases = PHRASES.to_vec();
    phrases.sort_by_key(|(phrase, _)| std::cmp::Reverse(phrase.split_whitespace().count()));
    phrases
        .into_iter()
        .map(|(phrase, emoji)| {
            let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
            let pattern = format!(r"(?i)\b{}\b", words.join(r"\s+"));
            (Regex::new(&pattern).unwrap(), emoji)
        })
        .collect()
});

/// Replace spoken emoji names with the emoji itself.
pub fn apply_emoji_names(text: &str) -> String {
    let lower = text.to_lowercase();
    if !KEYWORDS.iter().any(|k| lower.contains(k)) {
        return text.to_string();
    }

    let mut out = text.to_string();
    for (pattern, emoji) in REPLACEMENTS.iter() {
        if pattern.is_match(&out) {
            out = pattern.replace_all(&out, NoExpand(emoji)).into_owned();
        }
    }
    out
}
