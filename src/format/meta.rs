//! Spoken retractions ("scratch that") applied to raw transcripts.

use once_cell::sync::Lazy;
use regex::Regex;

const COMMANDS: &[&str] = &["scratch that", "delete that", "cancel that", "never mind"];

static TRAILING_COMMAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i),?\s*\b(?:scratch that|delete that|cancel that|never mind)[.!]?\s*$").unwrap()
});

/// Remove a trailing meta-command together with the sentence it retracts.
///
/// * A transcript that is only a command becomes empty.
/// * The text before the command is split into sentences; the fragment
///   after the last terminator always counts as the final sentence, even
///   when it is empty.
/// * One sentence: everything is discarded.  Two or more: only the final
///   one is dropped.
///
/// So "Send it. Then call Ana, scratch that" keeps "Send it.", while a
/// command spoken after a finished sentence ("A. B. Scratch that.") only
/// retracts the empty fragment and keeps "A. B.".
pub fn strip_meta_commands(text: &str) -> String {
    let whole = text.trim().to_lowercase();
    if COMMANDS.contains(&whole.trim_end_matches(['.', '!'])) {
        return String::new();
    }

    let Some(m) = TRAILING_COMMAND.find(text) else {
        return text.to_string();
    };

    let mut sentences = split_sentences(&text[..m.start()]);
    if sentences.len() < 2 {
        return String::new();
    }
    sentences.pop();
    sentences.join(" ")
}

/// Terminated sentences plus the trailing fragment (possibly empty).
fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let ends = matches!(c, '.' | '!' | '?')
            && chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
        if ends {
            let end = i + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                out.push(sentence);
            }
            start = end;
        }
    }
    out.push(text[start..].trim());
    out
}
