//! Email layout: greeting line, paragraph breaks and sign-off block.

use once_cell::sync::Lazy;
use regex::Regex;

/// Only look for an existing paragraph break this close to the greeting.
const GREETING_WINDOW: usize = 80;

static GREETING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?i:hi|hello|hey|dear|good morning|good afternoon|good evening|greetings)\b[^,!\n]{0,40}[,!]",
    )
    .unwrap()
});

static SIGN_OFF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:^|[.!?]\s+|\n\s*)((?i:thanks|thank you|many thanks|best regards|kind regards|warm regards|regards|all the best|best|cheers|sincerely|talk soon|take care)),?\s+([A-Z][\w'\-]*(?:\s+[A-Z][\w'\-]*)?)\s*\.?\s*$",
    )
    .unwrap()
});

static TRANSITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([.!?]) +(However|Additionally|Also|Furthermore|Moreover|In addition|On another note|Separately|Meanwhile|That said|Lastly|Finally)\b",
    )
    .unwrap()
});

static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?](?:\s|$)").unwrap());

/// Break a dictated email into greeting, paragraphs and sign-off.
pub fn apply_email_formatting(text: &str) -> String {
    let text = break_after_greeting(text);
    let text = break_before_sign_off(&text);
    break_at_transitions(&text)
}

fn break_after_greeting(text: &str) -> String {
    let Some(m) = GREETING.find(text) else {
        return text.to_string();
    };
    let window_end = text
        .char_indices()
        .nth(GREETING_WINDOW)
        .map_or(text.len(), |(i, _)| i);
    if text[..window_end].contains("\n\n") {
        return text.to_string();
    }
    let body = text[m.end()..].trim_start();
    if body.is_empty() {
        return text.to_string();
    }
    format!("{}\n\n{}", m.as_str(), body)
}

fn break_before_sign_off(text: &str) -> String {
    let Some(caps) = SIGN_OFF.captures(text) else {
        return text.to_string();
    };
    let (Some(whole), Some(sign_off), Some(name)) = (caps.get(0), caps.get(1), caps.get(2))
    else {
        return text.to_string();
    };

    // Keep the sentence terminator consumed by the prefix with the body.
    let prefix = &text[whole.start()..sign_off.start()];
    let terminator = prefix.trim_end();
    let body = format!("{}{}", &text[..whole.start()], terminator);
    let body = body.trim_end();
    if body.is_empty() {
        return text.to_string();
    }
    format!("{}\n\n{},\n{}", body, sign_off.as_str(), name.as_str())
}

fn break_at_transitions(text: &str) -> String {
    if SENTENCE_END.find_iter(text).count() < 2 {
        return text.to_string();
    }
    TRANSITION.replace_all(text, "$1\n\n$2").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_full_email() {
        assert_eq!(
            apply_email_formatting(
                "Hi John, I finished the report. Let me know if you have questions. Thanks, Sandeep"
            ),
            "Hi John,\n\nI finished the report. Let me know if you have questions.\n\nThanks,\nSandeep"
        );
    }

    #[test]
    fn sign_off_with_full_name() {
        assert_eq!(
            apply_email_formatting("The deck is attached. Best regards, Maria Lopez."),
            "The deck is attached.\n\nBest regards,\nMaria Lopez"
        );
    }

    #[test]
    fn transition_starts_paragraph() {
        assert_eq!(
            apply_email_formatting("The launch went well. However, support volume doubled."),
            "The launch went well.\n\nHowever, support volume doubled."
        );
    }

    #[test]
    fn single_sentence_has_no_transition_break() {
        let text = "Also please review";
        assert_eq!(apply_email_formatting(text), text);
    }

    #[test]
    fn lowercase_name_is_not_a_sign_off() {
        let text = "I wanted to say thanks everyone";
        assert_eq!(apply_email_formatting(text), text);
    }

    #[test]
    fn existing_break_is_respected() {
        let text = "Hello team,\n\nQuick update on the release.";
        assert_eq!(apply_email_formatting(text), text);
    }

    #[test]
    fn idempotent() {
        let once = apply_email_formatting(
            "Dear Alex, thanks for the call. Also, I sent the invoice. Cheers, Sam",
        );
        assert_eq!(
            once,
            "Dear Alex,\n\nthanks for the call.\n\nAlso, I sent the invoice.\n\nCheers,\nSam"
        );
        assert_eq!(apply_email_formatting(&once), once);
    }
}
