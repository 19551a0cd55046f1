//! Editor-facing stages: `@file` tagging and backtick-wrapping identifiers.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

/// Extensions recognised as source or config files.  Longer extensions come
/// before their prefixes (`tsx` before `ts`).
pub const FILE_EXTENSIONS: &[&str] = &[
    "tsx", "ts", "jsx", "json", "js", "mjs", "py", "rs", "go", "swift", "java", "kt", "rb",
    "cpp", "hpp", "c", "h", "cs", "php", "html", "css", "scss", "vue", "svelte", "sql", "sh",
    "yaml", "yml", "toml", "md", "txt", "xml", "lock", "env",
];

static EXTENSION_ALTERNATION: Lazy<String> = Lazy::new(|| FILE_EXTENSIONS.join("|"));

/// "at main.py" (spoken reference to a file).
static AT_FILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\bat\s+([A-Za-z0-9_\-/]+\.(?:{}))\b",
        *EXTENSION_ALTERNATION
    ))
    .unwrap()
});

/// A bare "name.ext" token.
static BARE_FILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)[A-Za-z0-9_\-/]+\.(?:{})\b",
        *EXTENSION_ALTERNATION
    ))
    .unwrap()
});

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:[a-z][a-z0-9]*[A-Z][A-Za-z0-9]*|[a-z][a-z0-9]*(?:_[a-z0-9]+)+)\b").unwrap()
});

/// Brand names that look like camelCase but are prose.
const CAMEL_CASE_WORDS: &[&str] = &[
    "iPhone", "iPad", "iPod", "iMac", "iOS", "iPadOS", "iCloud", "iTunes", "macOS", "watchOS",
    "tvOS", "visionOS", "eBay", "eCommerce", "eMail",
];

/// Whether `name` ends in a known file extension.
pub fn has_known_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(stem, ext)| {
        !stem.is_empty() && FILE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
    })
}

// ---------------------------------------------------------------------------
// Stage 5: file tagging
// ---------------------------------------------------------------------------

/// "look at main.py" → "look @main.py"; bare "notes.ts" → "@notes.ts".
///
/// Tokens already prefixed with `@` or a backtick are left alone, as are
/// dotted identifiers such as `com.apple.Mail`.
pub fn apply_file_tagging(text: &str) -> String {
    let tagged = AT_FILE.replace_all(text, "@$1");

    let mut out = String::with_capacity(tagged.len() + 8);
    let mut last = 0;
    for m in BARE_FILE.find_iter(&tagged) {
        if is_taggable(&tagged, m.range()) {
            out.push_str(&tagged[last..m.start()]);
            out.push('@');
            out.push_str(m.as_str());
            last = m.end();
        }
    }
    out.push_str(&tagged[last..]);
    out
}

fn is_taggable(text: &str, range: Range<usize>) -> bool {
    let before = text[..range.start].chars().last();
    if before.is_some_and(|c| c == '@' || c == '`' || c == '.' || c.is_alphanumeric()) {
        return false;
    }
    // "file.ts.bak", "com.foo.ts.Widget": part of a longer dotted token.
    let mut after = text[range.end..].chars();
    !(after.next() == Some('.') && after.next().is_some_and(char::is_alphanumeric))
}

// ---------------------------------------------------------------------------
// Stage 6: code tokens
// ---------------------------------------------------------------------------

/// Wrap camelCase and snake_case identifiers in backticks.
///
/// Skips identifiers already inside backticks, `@file` tags, paths, URLs and
/// dotted names.
pub fn apply_code_token_wrapping(text: &str) -> String {
    let spans = backtick_spans(text);

    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for m in IDENTIFIER.find_iter(text) {
        let inside_code = spans.iter().any(|s| s.start <= m.start() && m.end() <= s.end);
        if inside_code || CAMEL_CASE_WORDS.contains(&m.as_str()) || !is_standalone(text, m.range())
        {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push('`');
        out.push_str(m.as_str());
        out.push('`');
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

/// Byte ranges covered by backtick pairs, delimiters included.
fn backtick_spans(text: &str) -> Vec<Range<usize>> {
    let ticks: Vec<usize> = text.match_indices('`').map(|(i, _)| i).collect();
    ticks.chunks_exact(2).map(|pair| pair[0]..pair[1] + 1).collect()
}

/// The identifier is a word of its own, not part of a path, URL, tag or
/// dotted name.
fn is_standalone(text: &str, range: Range<usize>) -> bool {
    let word_start = text[..range.start]
        .rfind(char::is_whitespace)
        .map_or(0, |i| i + 1);
    let word_end = text[range.end..]
        .find(char::is_whitespace)
        .map_or(text.len(), |i| range.end + i);
    let word = &text[word_start..word_end];
    if word.contains("://") || word.contains('@') {
        return false;
    }

    let before = text[..range.start].chars().last();
    if before.is_some_and(|c| matches!(c, '.' | '/' | '\\' | '-' | '#' | '$')) {
        return false;
    }
    let mut after = text[range.end..].chars();
    match after.next() {
        Some('/') | Some('\\') | Some('-') => false,
        Some('.') => !after.next().is_some_and(char::is_alphanumeric),
        _ => true,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
