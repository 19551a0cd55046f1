//! Spoken to-do intents → markdown checkboxes, for note-taking apps.

use once_cell::sync::Lazy;
use regex::Regex;

use super::capitalize_first;

static TODO_INTENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:remember to|don't forget to|don’t forget to|do not forget to|i need to|i have to|i've got to|i must|to-do:?|todo:?|to do:|add (?:a )?task:?)\s+(.+)$",
    )
    .unwrap()
});

/// "Remember to call mom." → "- [ ] Call mom"
///
/// Each sentence (and each line) is checked on its own; non-task sentences
/// are kept as prose.  Text without any task intent is returned unchanged.
pub fn apply_todo_conversion(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut converted = false;

    for line in text.split('\n') {
        let mut prose = String::new();
        for sentence in split_sentences(line) {
            match as_todo(sentence) {
                Some(item) => {
                    if !prose.is_empty() {
                        lines.push(std::mem::take(&mut prose));
                    }
                    lines.push(item);
                    converted = true;
                }
                None => {
                    if !prose.is_empty() {
                        prose.push(' ');
                    }
                    prose.push_str(sentence);
                }
            }
        }
        if !prose.is_empty() || line.trim().is_empty() {
            lines.push(prose);
        }
    }

    if converted {
        lines.join("\n")
    } else {
        text.to_string()
    }
}

fn as_todo(sentence: &str) -> Option<String> {
    let body = sentence
        .strip_prefix("- ")
        .filter(|rest| !rest.starts_with('['))
        .unwrap_or(sentence);
    let caps = TODO_INTENT.captures(body.trim())?;
    let task = caps[1].trim().trim_end_matches(['.', '!', ',', ';']).trim_end();
    if task.is_empty() {
        return None;
    }
    Some(format!("- [ ] {}", capitalize_first(task)))
}

/// Sentences of one line, terminators kept, whitespace trimmed.
fn split_sentences(line: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    for (idx, &(i, c)) in chars.iter().enumerate() {
        let at_break = matches!(c, '.' | '!' | '?')
            && chars.get(idx + 1).map_or(true, |&(_, next)| next.is_whitespace());
        if at_break {
            let end = i + c.len_utf8();
            let sentence = line[start..end].trim();
            if !sentence.is_empty() {
                out.push(sentence);
            }
            start = end;
        }
    }
    let tail = line[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_single_intent() {
        assert_eq!(apply_todo_conversion("Remember to call mom."), "- [ ] Call mom");
    }

    #[test]
    fn mixes_prose_and_tasks() {
        assert_eq!(
            apply_todo_conversion(
                "Meeting went fine. Don't forget to send the notes. I need to book a room."
            ),
            "Meeting went fine.\n- [ ] Send the notes\n- [ ] Book a room"
        );
    }

    #[test]
    fn converts_bullet_lines() {
        assert_eq!(
            apply_todo_conversion("Today\n- todo: water plants\n- buy bread"),
            "Today\n- [ ] Water plants\n- buy bread"
        );
    }

    #[test]
    fn leaves_plain_prose() {
        let text = "I went to the store. It was closed.";
        assert_eq!(apply_todo_conversion(text), text);
    }

    #[test]
    fn keeps_decimals_inside_sentences() {
        assert_eq!(
            apply_todo_conversion("I have to pay 3.50 today."),
            "- [ ] Pay 3.50 today"
        );
    }

    #[test]
    fn idempotent() {
        let once = apply_todo_conversion("Notes. Add task: renew passport");
        assert_eq!(once, "Notes.\n- [ ] Renew passport");
        assert_eq!(apply_todo_conversion(&once), once);
    }
}
