//! Post-paste correction monitor.
//!
//! After text is pasted, [`CorrectionMonitor`] re-reads the focused field on
//! a timer, finds the pasted region again and compares it with what was
//! pasted.  Word substitutions that pass the correction filter are learned
//! into the shared [`CorrectionStore`], scoped to the destination app.
//!
//! # Session flow
//!
//! ```text
//! paste ─▶ begin()  snapshot baseline, locate paste in it
//!            │
//!            ▼
//!   ┌──▶ clock.sleep(poll_interval)
//!   │        │
//!   │        ▼
//!   │     poll()   read field ── unreadable ─────────────▶ FieldLost
//!   │        │     cut window ── missing 3× in a row ────▶ FieldLost
//!   │        │     window == pasted → nothing to do
//!   │        │     window changed  → diff → filter → learn
//!   │        ▼
//!   └── still active?  ── poll budget spent ─────────────▶ TimedOut
//! ```
//!
//! The field reader and the clock are injected so sessions can be driven in
//! tests without a UI or real time.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tokio::task::JoinHandle;

use crate::config::LearningConfig;
use crate::learning::diff::{diff, CorrectionCandidate};
use crate::learning::filter::is_likely_correction;
use crate::learning::state::SessionState;
use crate::learning::store::{CorrectionSource, CorrectionStore};

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Reads the text of the currently focused input field.
///
/// Implemented by the accessibility layer.  `None` means the field cannot be
/// read (focus moved, secure field, permission revoked, ...).
pub trait FieldReader: Send + Sync {
    fn read_focused_text(&self) -> Option<String>;
}

/// Waits between polls.
#[async_trait]
pub trait PollClock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production clock backed by the tokio timer.
pub struct TokioClock;

#[async_trait]
impl PollClock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

// ---------------------------------------------------------------------------
// PollSession
// ---------------------------------------------------------------------------

/// State of one monitoring session.  Transient; never persisted.
#[derive(Debug, Clone)]
pub struct PollSession {
    pub pasted_text: String,
    pub baseline_field_snapshot: String,
    pub poll_count: u32,
    pub app_name: Option<String>,
    pub state: SessionState,
    /// Char offset of the paste inside the baseline, if it was found there.
    baseline_offset: Option<usize>,
    consecutive_misses: u32,
    last_window: Option<String>,
    learned: Vec<CorrectionCandidate>,
}

impl PollSession {
    fn new(pasted_text: String, baseline: String, app_name: Option<String>) -> Self {
        Self {
            pasted_text,
            baseline_field_snapshot: baseline,
            poll_count: 0,
            app_name,
            state: SessionState::Idle,
            baseline_offset: None,
            consecutive_misses: 0,
            last_window: None,
            learned: Vec::new(),
        }
    }

    /// Corrections learned so far, in the order they were found.
    pub fn learned(&self) -> &[CorrectionCandidate] {
        &self.learned
    }

    pub fn into_report(self) -> SessionReport {
        SessionReport {
            state: self.state,
            polls: self.poll_count,
            learned: self.learned,
        }
    }
}

/// Outcome of a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    /// Final state: `Idle` for blank pastes, otherwise `TimedOut` or
    /// `FieldLost`.
    pub state: SessionState,
    pub polls: u32,
    pub learned: Vec<CorrectionCandidate>,
}

impl SessionReport {
    pub fn learned_any(&self) -> bool {
        !self.learned.is_empty()
    }
}

// ---------------------------------------------------------------------------
// CorrectionMonitor
// ---------------------------------------------------------------------------

/// Watches pasted text and learns the user's corrections.
pub struct CorrectionMonitor {
    store: Arc<CorrectionStore>,
    reader: Arc<dyn FieldReader>,
    clock: Arc<dyn PollClock>,
    config: LearningConfig,
}

impl CorrectionMonitor {
    /// Create a monitor polling on the tokio timer.
    pub fn new(
        store: Arc<CorrectionStore>,
        reader: Arc<dyn FieldReader>,
        config: LearningConfig,
    ) -> Self {
        Self {
            store,
            reader,
            clock: Arc::new(TokioClock),
            config,
        }
    }

    /// Replace the clock (tests use one that returns immediately).
    pub fn with_clock(mut self, clock: Arc<dyn PollClock>) -> Self {
        self.clock = clock;
        self
    }

    // -----------------------------------------------------------------------
    // State machine
    // -----------------------------------------------------------------------

    /// Start a session for freshly pasted text.
    ///
    /// Blank pastes produce an `Idle` session that never polls; an unreadable
    /// field produces a `FieldLost` one.
    pub fn begin(&self, pasted_text: &str, app_name: Option<&str>) -> PollSession {
        let pasted = pasted_text.trim().to_string();
        let app_name = app_name.map(str::to_string);
        if pasted.is_empty() {
            return PollSession::new(pasted, String::new(), app_name);
        }

        let Some(baseline) = self.reader.read_focused_text() else {
            log::debug!("correction monitor: field unreadable at paste time");
            let mut session = PollSession::new(pasted, String::new(), app_name);
            session.state = SessionState::FieldLost;
            return session;
        };

        let mut session = PollSession::new(pasted, baseline, app_name);
        session.baseline_offset = locate(
            &session.pasted_text,
            &session.baseline_field_snapshot,
            self.config.fuzzy_anchor_words,
        );
        session.state = SessionState::Polling;
        log::debug!(
            "correction monitor: watching {} chars (offset {:?})",
            session.pasted_text.chars().count(),
            session.baseline_offset
        );
        session
    }

    /// Run one poll and return the resulting state.
    pub fn poll(&self, session: &mut PollSession) -> SessionState {
        if !session.state.is_active() {
            return session.state;
        }
        session.poll_count += 1;

        let Some(current) = self.reader.read_focused_text() else {
            log::debug!("correction monitor: field became unreadable");
            session.state = SessionState::FieldLost;
            return session.state;
        };

        match self.extract_window(session, &current) {
            None => {
                session.consecutive_misses += 1;
                if session.consecutive_misses >= self.config.max_consecutive_misses {
                    log::debug!("correction monitor: pasted region is gone");
                    session.state = SessionState::FieldLost;
                    return session.state;
                }
            }
            Some(window) => {
                session.consecutive_misses = 0;
                if window != session.pasted_text
                    && session.last_window.as_deref() != Some(window.as_str())
                {
                    self.learn_from(session, &window);
                    session.last_window = Some(window);
                }
            }
        }

        if session.poll_count >= self.config.max_polls {
            session.state = SessionState::TimedOut;
        }
        session.state
    }

    /// Drive a whole session to completion.
    pub async fn watch(&self, pasted_text: &str, app_name: Option<&str>) -> SessionReport {
        let mut session = self.begin(pasted_text, app_name);
        let interval = Duration::from_millis(self.config.poll_interval_ms);

        while session.state.is_active() {
            self.clock.sleep(interval).await;
            self.poll(&mut session);
        }

        log::info!(
            "correction monitor: session ended ({}) after {} poll(s), {} learned",
            session.state.label(),
            session.poll_count,
            session.learned.len()
        );
        session.into_report()
    }

    /// Run [`watch`](Self::watch) as a background tokio task.
    pub fn spawn(
        self: &Arc<Self>,
        pasted_text: String,
        app_name: Option<String>,
    ) -> JoinHandle<SessionReport> {
        let monitor = Arc::clone(self);
        tokio::spawn(async move { monitor.watch(&pasted_text, app_name.as_deref()).await })
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Cut the region of `current` that corresponds to the paste.
    ///
    /// The window is 1.5× the paste length (configurable) so words the user
    /// inserted do not push the tail of the paste out of view.
    fn extract_window(&self, session: &PollSession, current: &str) -> Option<String> {
        let offset = session.baseline_offset.or_else(|| {
            locate(&session.pasted_text, current, self.config.fuzzy_anchor_words)
        })?;

        let field_len = current.chars().count();
        if offset >= field_len {
            return None;
        }
        let pasted_len = session.pasted_text.chars().count() as f64;
        let budget = (pasted_len * self.config.window_buffer).round() as usize;
        let len = budget.min(field_len - offset);

        let window: String = current.chars().skip(offset).take(len).collect();
        let window = window.trim();
        if window.is_empty() {
            None
        } else {
            Some(window.to_string())
        }
    }

    fn learn_from(&self, session: &mut PollSession, window: &str) {
        for candidate in diff(&session.pasted_text, window) {
            if !is_likely_correction(&candidate) || session.learned.contains(&candidate) {
                continue;
            }
            self.store.learn_correction(
                &candidate.original,
                &candidate.corrected,
                CorrectionSource::AutoLearned,
                session.app_name.as_deref(),
            );
            session.learned.push(candidate);
            session.state = SessionState::Learned;
        }
    }
}

/// Char offset of `pasted` inside `haystack`.
///
/// Exact substring first; otherwise a case-insensitive match on the leading
/// `anchor_words` words (all of them for shorter pastes), tolerant of
/// whitespace changes.
fn locate(pasted: &str, haystack: &str, anchor_words: usize) -> Option<usize> {
    if let Some(byte) = haystack.find(pasted) {
        return Some(haystack[..byte].chars().count());
    }

    let words: Vec<String> = pasted
        .split_whitespace()
        .take(anchor_words.max(1))
        .map(regex::escape)
        .collect();
    if words.is_empty() {
        return None;
    }
    let pattern = Regex::new(&format!("(?i){}", words.join(r"\s+"))).ok()?;
    let found = pattern.find(haystack)?;
    Some(haystack[..found.start()].chars().count())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Replays a script of field contents; the last one repeats forever.
    struct ScriptedField {
        frames: Mutex<VecDeque<Option<String>>>,
        last: Mutex<Option<String>>,
        reads: AtomicUsize,
    }

    impl ScriptedField {
        fn new(frames: &[Option<&str>]) -> Arc<Self> {
            Arc::new(Self {
                frames: Mutex::new(frames.iter().map(|f| f.map(str::to_string)).collect()),
                last: Mutex::new(None),
                reads: AtomicUsize::new(0),
            })
        }

        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    impl FieldReader for ScriptedField {
        fn read_focused_text(&self) -> Option<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            let mut last = self.last.lock().unwrap();
            if let Some(frame) = self.frames.lock().unwrap().pop_front() {
                *last = frame;
            }
            last.clone()
        }
    }

    /// Returns immediately and counts how often it was asked to wait.
    #[derive(Default)]
    struct InstantClock {
        sleeps: AtomicUsize,
    }

    #[async_trait]
    impl PollClock for InstantClock {
        async fn sleep(&self, _duration: Duration) {
            self.sleeps.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn config(max_polls: u32) -> LearningConfig {
        LearningConfig {
            max_polls,
            ..LearningConfig::default()
        }
    }

    fn monitor(
        field: Arc<ScriptedField>,
        max_polls: u32,
    ) -> (CorrectionMonitor, Arc<CorrectionStore>, Arc<InstantClock>) {
        let _ = env_logger::builder().is_test(true).try_init();
        let store = Arc::new(CorrectionStore::in_memory());
        let clock = Arc::new(InstantClock::default());
        let monitor = CorrectionMonitor::new(Arc::clone(&store), field, config(max_polls))
            .with_clock(clock.clone());
        (monitor, store, clock)
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn learns_time_reformatting() {
        let field = ScriptedField::new(&[Some("Meeting at 3pm"), Some("Meeting at 3:00pm")]);
        let (monitor, store, _clock) = monitor(field, 5);

        let report = monitor.watch("Meeting at 3pm", Some("Notes")).await;

        assert_eq!(report.state, SessionState::TimedOut);
        assert_eq!(report.learned, vec![CorrectionCandidate::new("3pm", "3:00pm")]);
        let entry = store.get("3pm::Notes").expect("scoped entry");
        assert_eq!(entry.corrected, "3:00pm");
        assert_eq!(entry.source, CorrectionSource::AutoLearned);
    }

    #[tokio::test]
    async fn unchanged_text_times_out() {
        let field = ScriptedField::new(&[Some("hello world")]);
        let (monitor, store, clock) = monitor(field.clone(), 4);

        let report = monitor.watch("hello world", None).await;

        assert_eq!(report.state, SessionState::TimedOut);
        assert_eq!(report.polls, 4);
        assert!(!report.learned_any());
        assert!(store.is_empty());
        assert_eq!(clock.sleeps.load(Ordering::SeqCst), 4);
        // Baseline read plus one read per poll.
        assert_eq!(field.reads(), 5);
    }

    #[tokio::test]
    async fn unreadable_field_ends_session() {
        let field = ScriptedField::new(&[Some("hello world"), None]);
        let (monitor, _store, _clock) = monitor(field, 60);

        let report = monitor.watch("hello world", None).await;
        assert_eq!(report.state, SessionState::FieldLost);
        assert_eq!(report.polls, 1);
    }

    #[tokio::test]
    async fn unreadable_baseline_never_polls() {
        let field = ScriptedField::new(&[None]);
        let (monitor, _store, clock) = monitor(field, 60);

        let report = monitor.watch("hello world", None).await;
        assert_eq!(report.state, SessionState::FieldLost);
        assert_eq!(report.polls, 0);
        assert_eq!(clock.sleeps.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_paste_is_ignored() {
        let field = ScriptedField::new(&[Some("anything")]);
        let (monitor, _store, _clock) = monitor(field.clone(), 60);

        let report = monitor.watch("   ", None).await;
        assert_eq!(report.state, SessionState::Idle);
        assert_eq!(field.reads(), 0);
    }

    #[tokio::test]
    async fn deleted_paste_is_lost_after_three_misses() {
        let field = ScriptedField::new(&[Some("Notes: buy milk"), Some("")]);
        let (monitor, _store, _clock) = monitor(field, 60);

        let report = monitor.watch("buy milk", None).await;
        assert_eq!(report.state, SessionState::FieldLost);
        assert_eq!(report.polls, 3);
    }

    #[test]
    fn a_found_region_resets_the_miss_counter() {
        let field = ScriptedField::new(&[
            Some("buy milk"),
            Some(""),
            Some(""),
            Some("buy milk"),
            Some(""),
            Some(""),
        ]);
        let (monitor, _store, _clock) = monitor(field, 60);

        let mut session = monitor.begin("buy milk", None);
        for _ in 0..5 {
            monitor.poll(&mut session);
        }
        assert_eq!(session.state, SessionState::Polling);
        assert_eq!(monitor.poll(&mut session), SessionState::FieldLost);
    }

    #[tokio::test]
    async fn keeps_polling_after_learning() {
        let field = ScriptedField::new(&[
            Some("I saw jon and mery"),
            Some("I saw John and mery"),
            Some("I saw John and Mary"),
        ]);
        let (monitor, store, _clock) = monitor(field, 6);

        let report = monitor.watch("I saw jon and mery", Some("Messages")).await;

        assert_eq!(report.state, SessionState::TimedOut);
        assert_eq!(
            report.learned,
            vec![
                CorrectionCandidate::new("jon", "John"),
                CorrectionCandidate::new("mery", "Mary"),
            ]
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn learned_state_is_still_active() {
        let field = ScriptedField::new(&[Some("call anthropick"), Some("call Anthropic")]);
        let (monitor, _store, _clock) = monitor(field, 60);

        let mut session = monitor.begin("call anthropick", None);
        assert_eq!(monitor.poll(&mut session), SessionState::Learned);
        assert!(session.state.is_active());
        assert_eq!(session.learned().len(), 1);
    }

    #[tokio::test]
    async fn rephrasing_is_not_learned() {
        let field = ScriptedField::new(&[
            Some("send the file to the team"),
            Some("send a file to my team"),
        ]);
        let (monitor, store, _clock) = monitor(field, 3);

        let report = monitor.watch("send the file to the team", None).await;
        assert!(!report.learned_any());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn fuzzy_locates_paste_with_different_case() {
        let field = ScriptedField::new(&[
            Some("Hi Bob, send the reprot by friday"),
            Some("Hi Bob, send the report by friday"),
        ]);
        let (monitor, _store, _clock) = monitor(field, 3);

        let report = monitor.watch("Send the reprot by friday", None).await;
        assert_eq!(report.learned, vec![CorrectionCandidate::new("reprot", "report")]);
    }

    #[tokio::test]
    async fn tolerates_added_words() {
        let field = ScriptedField::new(&[
            Some("please send the reprot to finance"),
            Some("please quickly send the report to finance"),
        ]);
        let (monitor, _store, _clock) = monitor(field, 3);

        let report = monitor
            .watch("please send the reprot to finance", None)
            .await;
        assert_eq!(report.learned, vec![CorrectionCandidate::new("reprot", "report")]);
    }

    #[tokio::test]
    async fn spawned_session_reports_back() {
        let field = ScriptedField::new(&[Some("ask anthropick"), Some("ask Anthropic")]);
        let store = Arc::new(CorrectionStore::in_memory());
        let monitor = Arc::new(
            CorrectionMonitor::new(Arc::clone(&store), field, config(2))
                .with_clock(Arc::new(InstantClock::default())),
        );

        let report = monitor
            .spawn("ask anthropick".into(), None)
            .await
            .expect("task");
        assert!(report.learned_any());
        assert_eq!(
            store.apply_corrections("tell anthropick", None),
            "tell Anthropic"
        );
    }

    #[test]
    fn locate_exact_and_fuzzy() {
        assert_eq!(locate("world", "hello world", 3), Some(6));
        assert_eq!(locate("Hello World", "say hello  world!", 3), Some(4));
        assert_eq!(locate("one two three four", "x ONE two THREE five", 3), Some(2));
        assert_eq!(locate("missing", "hello world", 3), None);
    }

    #[test]
    fn locate_counts_chars_not_bytes() {
        assert_eq!(locate("café au lait", "un café au lait", 3), Some(3));
        assert_eq!(locate("Café au", "déjà café au lait", 3), Some(5));
    }
}
