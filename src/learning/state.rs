//! Correction-monitor session states.

/// States of one post-paste monitoring session.
///
/// ```text
/// Idle ──paste──▶ Polling ──edit accepted──▶ Learned ─┐
///                    │  ▲                     │  ▲     │
///                    │  └─────────────────────┘  └─────┘   (keeps polling)
///                    ├──field unreadable / region lost──▶ FieldLost
///                    └──poll budget spent──────────────▶ TimedOut
/// ```
///
/// `Learned` is still an active state: the user may fix more words in the
/// same region, so only `TimedOut` and `FieldLost` end a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing pasted yet, or the paste was blank.
    Idle,
    /// Watching the field; no correction learned so far.
    Polling,
    /// Watching the field; at least one correction has been learned.
    Learned,
    /// Poll budget exhausted.
    TimedOut,
    /// The field could not be read or the pasted region disappeared.
    FieldLost,
}

impl SessionState {
    /// Returns `true` while the session still polls.
    ///
    /// ```
    /// use voice_text_refine::learning::SessionState;
    ///
    /// assert!(!SessionState::Idle.is_active());
    /// assert!(SessionState::Polling.is_active());
    /// assert!(SessionState::Learned.is_active());
    /// assert!(!SessionState::TimedOut.is_active());
    /// assert!(!SessionState::FieldLost.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Polling | SessionState::Learned)
    }

    /// Returns `true` once the session has stopped for good.
    pub fn is_finished(&self) -> bool {
        matches!(self, SessionState::TimedOut | SessionState::FieldLost)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Polling => "Polling",
            SessionState::Learned => "Learned",
            SessionState::TimedOut => "Timed out",
            SessionState::FieldLost => "Field lost",
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle
    }
}
