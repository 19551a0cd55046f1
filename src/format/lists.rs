//! List detection: spoken ordinals, colon-introduced lists and bullets.

use once_cell::sync::Lazy;
use regex::{Match, Regex};

use super::capitalize_first;

/// Colon lists whose items run longer than this are prose, not lists.
const MAX_ITEM_WORDS: usize = 8;

/// Without commas, "X and Y" after a colon is a list only for short items.
const MAX_PAIR_ITEM_WORDS: usize = 2;

static ORDINAL_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth|number\s+(?:one|two|three|four|five|six|seven|eight|nine|ten)),\s*",
    )
    .unwrap()
});

static BULLET_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:bullet(?:\s+point)?|dash)\b[,:]?\s+").unwrap());

// ---------------------------------------------------------------------------
// Stage 1: list safety net
// ---------------------------------------------------------------------------

/// Ordinal lists take priority; otherwise try a colon list.
pub fn apply_list_safety_net(text: &str) -> String {
    if ORDINAL_MARKER.find_iter(text).nth(1).is_some() {
        apply_list_formatting(text)
    } else {
        apply_colon_list_formatting(text)
    }
}

/// "First, call bob. Second, call sue." → "1. Call bob.\n2. Call sue."
///
/// Needs at least two ordinal markers; text before the first marker becomes
/// an intro line.
pub fn apply_list_formatting(text: &str) -> String {
    let markers: Vec<Match> = ORDINAL_MARKER.find_iter(text).collect();
    if markers.len() < 2 {
        return text.to_string();
    }

    let items: Vec<String> = segments_after(text, &markers)
        .into_iter()
        .map(capitalize_first)
        .collect();
    if items.len() < 2 {
        return text.to_string();
    }

    let intro = text[..markers[0].start()].trim();
    render_numbered(intro, &items)
}

/// "Need: milk, eggs, and bread." → "Need:\n1. Milk\n2. Eggs\n3. Bread"
///
/// Only fires for exactly one qualifying colon (not a clock time, not a URL
/// scheme) followed by at least two comma-separated items, or by a single
/// "X and Y" / "X or Y" pair of short items.
pub fn apply_colon_list_formatting(text: &str) -> String {
    if text.contains('\n') {
        return text.to_string();
    }

    let colons = qualifying_colons(text);
    let [colon] = colons.as_slice() else {
        return text.to_string();
    };

    let intro = text[..=*colon].trim();
    if intro.len() < 2 {
        return text.to_string();
    }

    let rest = text[colon + 1..].trim().trim_end_matches(['.', '!']);
    if [". ", "! ", "? "].iter().any(|s| rest.contains(s)) {
        return text.to_string();
    }

    let items = if rest.contains(',') {
        split_list_items(rest)
    } else {
        // "Need: milk and eggs": only a pair of short items counts.
        match split_on_conjunction(rest) {
            Some((left, right))
                if [left, right]
                    .iter()
                    .all(|item| item.split_whitespace().count() <= MAX_PAIR_ITEM_WORDS) =>
            {
                vec![left.to_string(), right.to_string()]
            }
            _ => return text.to_string(),
        }
    };
    if items.len() < 2
        || items
            .iter()
            .any(|item| item.split_whitespace().count() > MAX_ITEM_WORDS)
    {
        return text.to_string();
    }

    let items: Vec<String> = items.iter().map(|i| capitalize_first(i)).collect();
    render_numbered(intro, &items)
}

/// Split "a, b, and c" / "a, b or c" / "a and b" into items.
///
/// A comma segment led by "and"/"or" is the final item (conjunction
/// dropped).  Without one, the last segment is split on its first
/// standalone "and"/"or".
pub fn split_list_items(text: &str) -> Vec<String> {
    let segments: Vec<&str> = text
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut items: Vec<String> = Vec::with_capacity(segments.len() + 1);
    for (idx, segment) in segments.iter().enumerate() {
        if idx > 0 {
            if let Some(stripped) = strip_leading_conjunction(segment) {
                let mut last = stripped.to_string();
                for tail in &segments[idx + 1..] {
                    last.push_str(", ");
                    last.push_str(tail);
                }
                items.push(last);
                return items;
            }
        }
        items.push(segment.to_string());
    }

    if let Some(last) = items.pop() {
        match split_on_conjunction(&last) {
            Some((left, right)) => {
                items.push(left.to_string());
                items.push(right.to_string());
            }
            None => items.push(last),
        }
    }
    items
}

// ---------------------------------------------------------------------------
// Stage 2: bullets
// ---------------------------------------------------------------------------

/// "Groceries bullet milk bullet point eggs" → "Groceries\n- milk\n- eggs"
pub fn apply_bullet_formatting(text: &str) -> String {
    let markers: Vec<Match> = BULLET_MARKER.find_iter(text).collect();
    if markers.len() < 2 {
        return text.to_string();
    }

    let items: Vec<&str> = segments_after(text, &markers)
        .into_iter()
        .map(|item| item.trim_end_matches([',', ';', '.']).trim_end())
        .filter(|item| !item.is_empty())
        .collect();
    if items.len() < 2 {
        return text.to_string();
    }

    let mut lines = Vec::with_capacity(items.len() + 1);
    let intro = text[..markers[0].start()].trim();
    if !intro.is_empty() {
        lines.push(intro.to_string());
    }
    lines.extend(items.iter().map(|item| format!("- {item}")));
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Non-empty, trimmed text following each marker up to the next one.
fn segments_after<'t>(text: &'t str, markers: &[Match]) -> Vec<&'t str> {
    markers
        .iter()
        .enumerate()
        .map(|(idx, m)| {
            let end = markers.get(idx + 1).map_or(text.len(), |next| next.start());
            text[m.end()..end].trim()
        })
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn render_numbered(intro: &str, items: &[String]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    if !intro.is_empty() {
        lines.push(intro.to_string());
    }
    for (n, item) in items.iter().enumerate() {
        lines.push(format!("{}. {}", n + 1, item));
    }
    lines.join("\n")
}

/// Byte offsets of colons that can introduce a list.
fn qualifying_colons(text: &str) -> Vec<usize> {
    text.char_indices()
        .filter(|&(i, c)| {
            if c != ':' {
                return false;
            }
            let before = &text[..i];
            let prev_is_digit = before.chars().last().is_some_and(|p| p.is_ascii_digit());
            let lower = before.to_ascii_lowercase();
            let is_scheme = lower.ends_with("http") || lower.ends_with("https");
            let next_is_slash = text[i + 1..].starts_with('/');
            !prev_is_digit && !is_scheme && !next_is_slash
        })
        .map(|(i, _)| i)
        .collect()
}

fn strip_leading_conjunction(segment: &str) -> Option<&str> {
    let lower = segment.to_ascii_lowercase();
    ["and ", "or "]
        .iter()
        .find(|c| lower.starts_with(*c))
        .map(|c| segment[c.len()..].trim_start())
}

fn split_on_conjunction(segment: &str) -> Option<(&str, &str)> {
    let lower = segment.to_ascii_lowercase();
    let at = [" and ", " or "]
        .iter()
        .filter_map(|c| lower.find(c).map(|pos| (pos, c.len())))
        .min_by_key(|(pos, _)| *pos)?;
    let (left, right) = (segment[..at.0].trim(), segment[at.0 + at.1..].trim());
    if left.is_empty() || right.is_empty() {
        None
    } else {
        Some((left, right))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_list() {
        assert_eq!(
            apply_list_formatting("First, call bob. Second, call sue."),
            "1. Call bob.\n2. Call sue."
        );
    }

    #[test]
    fn ordinal_list_keeps_intro() {
        assert_eq!(
            apply_list_formatting("Two things. Number one, ship it. Number two, celebrate."),
            "Two things.\n1. Ship it.\n2. Celebrate."
        );
    }

    #[test]
    fn single_ordinal_is_not_a_list() {
        let text = "First, let me say thanks.";
        assert_eq!(apply_list_formatting(text), text);
        assert_eq!(apply_list_safety_net(text), text);
    }

    #[test]
    fn colon_list_with_oxford_comma() {
        assert_eq!(
            apply_colon_list_formatting("Need: milk, eggs, and bread."),
            "Need:\n1. Milk\n2. Eggs\n3. Bread"
        );
    }

    #[test]
    fn colon_list_without_oxford_comma() {
        assert_eq!(
            apply_colon_list_formatting("Bring these: tents, stoves or lamps"),
            "Bring these:\n1. Tents\n2. Stoves\n3. Lamps"
        );
    }

    #[test]
    fn colon_pair_without_commas() {
        assert_eq!(
            apply_colon_list_formatting("Need: milk and eggs"),
            "Need:\n1. Milk\n2. Eggs"
        );
        assert_eq!(
            apply_colon_list_formatting("Drinks: green tea or coffee."),
            "Drinks:\n1. Green tea\n2. Coffee"
        );
    }

    #[test]
    fn colon_prose_without_commas_is_untouched() {
        let text = "Note: I went home and slept";
        assert_eq!(apply_colon_list_formatting(text), text);
        let text = "Status: done";
        assert_eq!(apply_colon_list_formatting(text), text);
    }

    #[test]
    fn clock_times_and_urls_do_not_qualify() {
        let time = "Meet at 10:30, bring snacks, and drinks";
        assert_eq!(apply_colon_list_formatting(time), time);

        let url = "See https://example.com, the docs, and the wiki";
        assert_eq!(apply_colon_list_formatting(url), url);
    }

    #[test]
    fn multiple_colons_are_ambiguous() {
        let text = "Agenda: intro, demo. Notes: later, maybe";
        assert_eq!(apply_colon_list_formatting(text), text);
    }

    #[test]
    fn long_items_are_prose() {
        let text = "Update: we shipped the new onboarding flow to everyone last night, and it went well";
        assert_eq!(apply_colon_list_formatting(text), text);
    }

    #[test]
    fn split_items_conjunction_aware() {
        assert_eq!(split_list_items("milk, eggs, and bread"), ["milk", "eggs", "bread"]);
        assert_eq!(split_list_items("milk, eggs and bread"), ["milk", "eggs", "bread"]);
        assert_eq!(split_list_items("tea or coffee"), ["tea", "coffee"]);
        assert_eq!(split_list_items("a, b"), ["a", "b"]);
    }

    #[test]
    fn bullets() {
        assert_eq!(
            apply_bullet_formatting("Groceries bullet milk, bullet point eggs, dash bread."),
            "Groceries\n- milk\n- eggs\n- bread"
        );
    }

    #[test]
    fn single_bullet_is_ignored() {
        let text = "I'll dash off a reply";
        assert_eq!(apply_bullet_formatting(text), text);
    }

    #[test]
    fn list_output_is_stable() {
        let once = apply_list_safety_net("Need: milk, eggs, and bread.");
        assert_eq!(apply_list_safety_net(&once), once);
    }
}
