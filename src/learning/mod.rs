//! Correction learning.
//!
//! This module provides:
//! * [`diff`] / [`levenshtein_distance`]: word alignment between what was
//!   pasted and what the user settled on.
//! * [`is_likely_correction`]: heuristics separating transcription fixes
//!   from ordinary editing.
//! * [`CorrectionStore`]: persistent dictionary applied to future
//!   transcripts.
//! * [`CorrectionMonitor`]: polls the destination field after a paste and
//!   feeds accepted corrections into the store.
//!
//! # Quick start
//!
//! ```rust
//! use voice_text_refine::learning::{CorrectionSource, CorrectionStore};
//!
//! let store = CorrectionStore::in_memory();
//! store.learn_correction("anthropick", "Anthropic", CorrectionSource::Manual, None);
//!
//! let fixed = store.apply_corrections("I work at anthropick", None);
//! assert_eq!(fixed, "I work at Anthropic");
//! ```

pub mod diff;
pub mod filter;
pub mod monitor;
pub mod state;
pub mod store;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use diff::{diff, levenshtein_distance, CorrectionCandidate};
pub use filter::is_likely_correction;
pub use monitor::{
    CorrectionMonitor, FieldReader, PollClock, PollSession, SessionReport, TokioClock,
};
pub use state::SessionState;
pub use store::{storage_key, CorrectionEntry, CorrectionSource, CorrectionStore, StoreError};
