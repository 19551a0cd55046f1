//! Text-quality layer for offline dictation.
//!
//! Two subsystems live here:
//!
//! * [`format`]: a deterministic, rule-based formatting pipeline applied to
//!   cleaned transcripts right before they are pasted into the destination
//!   app.
//! * [`learning`]: a closed loop that watches what the user does to the
//!   pasted text, extracts word-level corrections and feeds them back into
//!   future dictations.
//!
//! [`pipeline::DictationPipeline`] is the composition root that wires both
//! together with a [`cleanup::TextCleaner`] standing in for the LLM pass.
//!
//! ```text
//! raw STT ─▶ strip_meta_commands ─▶ CorrectionStore::apply_corrections
//!         ─▶ TextCleaner::cleanup ─▶ format() ─▶ paste
//!                                                  │
//!          CorrectionStore::learn_correction ◀── CorrectionMonitor
//! ```

pub mod cleanup;
pub mod config;
pub mod context;
pub mod format;
pub mod learning;
pub mod pipeline;
