//! Very-casual rewrite: no sentence periods, lowercase line starts.

use once_cell::sync::Lazy;
use regex::Regex;

/// List prefixes produced by earlier stages; they survive untouched.
static LIST_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\d+\.|- \[ \]|[-*•])\s+").unwrap());

/// Drop sentence-ending periods (keeping `!`, `?` and ellipses) and
/// lowercase the first letter of every line.
pub fn apply_very_casual(text: &str) -> String {
    text.split('\n')
        .map(casual_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn casual_line(line: &str) -> String {
    let prefix_len = LIST_PREFIX.find(line).map_or(0, |m| m.end());
    let (prefix, body) = line.split_at(prefix_len);
    let body = lowercase_first(&drop_sentence_periods(body));
    format!("{prefix}{body}")
}

/// A period is dropped when it ends a sentence: followed by whitespace or the
/// end of the line, and not part of an ellipsis.
fn drop_sentence_periods(body: &str) -> String {
    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(body.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '.' {
            let prev_dot = i > 0 && chars[i - 1] == '.';
            let next = chars.get(i + 1).copied();
            let ends_sentence = next.map_or(true, char::is_whitespace);
            if ends_sentence && !prev_dot && next != Some('.') {
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Lowercase the first letter unless the word looks like an acronym.
fn lowercase_first(body: &str) -> String {
    let mut chars = body.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            let rest = chars.as_str();
            if rest.chars().next().is_some_and(char::is_uppercase) {
                return body.to_string();
            }
            first.to_lowercase().chain(rest.chars()).collect()
        }
        _ => body.to_string(),
    }
}
