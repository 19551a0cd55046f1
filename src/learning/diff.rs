//! Word-level alignment between pasted and edited text.
//!
//! [`diff`] aligns two word sequences through their longest common
//! subsequence and reports only one-for-one substitutions.  Insertions and
//! deletions are dropped: they are far more likely to be rephrasing than a
//! mis-transcribed word.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CorrectionCandidate
// ---------------------------------------------------------------------------

/// A word the user replaced with another word at the same position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionCandidate {
    pub original: String,
    pub corrected: String,
}

impl CorrectionCandidate {
    pub fn new(original: impl Into<String>, corrected: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            corrected: corrected.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// diff
// ---------------------------------------------------------------------------

/// Return the aligned word substitutions turning `original` into `corrected`.
///
/// Word equality is case-sensitive, so a capitalization-only change shows up
/// as a substitution.
///
/// ```rust
/// use voice_text_refine::learning::{diff, CorrectionCandidate};
///
/// assert_eq!(diff("I seen it", "I saw it"), vec![CorrectionCandidate::new("seen", "saw")]);
/// assert!(diff("send to john", "send to john and mary").is_empty());
/// ```
pub fn diff(original: &str, corrected: &str) -> Vec<CorrectionCandidate> {
    let a: Vec<&str> = original.split_whitespace().collect();
    let b: Vec<&str> = corrected.split_whitespace().collect();
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let lcs = longest_common_subsequence(&a, &b);

    let mut out = Vec::new();
    let (mut i, mut j, mut k) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        let next = lcs.get(k).copied();
        let a_hits = next == Some(a[i]);
        let b_hits = next == Some(b[j]);

        match (a_hits, b_hits) {
            (true, true) => {
                i += 1;
                j += 1;
                k += 1;
            }
            // Extra word in `corrected`.
            (true, false) => j += 1,
            // Word dropped from `original`.
            (false, true) => i += 1,
            (false, false) => {
                out.push(CorrectionCandidate::new(a[i], b[j]));
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Classic O(m·n) LCS table followed by a backtrack.
fn longest_common_subsequence<'a>(a: &[&'a str], b: &[&str]) -> Vec<&'a str> {
    let (m, n) = (a.len(), b.len());
    let mut table = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            table[i][j] = if a[i - 1] == b[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    let mut seq = Vec::with_capacity(table[m][n]);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            seq.push(a[i - 1]);
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] >= table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    seq.reverse();
    seq
}

// ---------------------------------------------------------------------------
// levenshtein_distance
// ---------------------------------------------------------------------------

/// Edit distance between `a` and `b` counted in chars.
///
/// Uses a single rolling row sized to the shorter input.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, lc) in long.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(lc != sc);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }
    row[short.len()]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
