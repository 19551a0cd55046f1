//! Core `TextCleaner` trait and the no-op `PassthroughCleaner`.
//!
//! The cleanup pass (filler removal, punctuation, casing) is owned by an
//! external collaborator, usually a local LLM.  This crate only needs the
//! seam: corrected text goes in, cleaned text comes out.

use async_trait::async_trait;
use thiserror::Error;

use crate::context::AppContext;

// ---------------------------------------------------------------------------
// CleanupError
// ---------------------------------------------------------------------------

/// Errors a cleanup backend can report.
#[derive(Debug, Error)]
pub enum CleanupError {
    /// The backend could not be reached or refused the request.
    #[error("cleanup backend unavailable: {0}")]
    Unavailable(String),

    /// The backend did not answer within the allotted time.
    #[error("cleanup timed out")]
    Timeout,

    /// The backend answered with nothing usable.
    #[error("cleanup returned an empty response")]
    EmptyResponse,
}

// ---------------------------------------------------------------------------
// TextCleaner trait
// ---------------------------------------------------------------------------

/// Async cleanup pass run between correction and formatting.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn TextCleaner>`).
///
/// # Arguments
/// * `text`    – Transcript with learned corrections already applied.
/// * `context` – Destination app, for tone-aware backends.
#[async_trait]
pub trait TextCleaner: Send + Sync {
    async fn cleanup(&self, text: &str, context: &AppContext) -> Result<String, CleanupError>;
}

// ---------------------------------------------------------------------------
// PassthroughCleaner
// ---------------------------------------------------------------------------

/// Returns the text unchanged.  Used when no cleanup backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCleaner;

#[async_trait]
impl TextCleaner for PassthroughCleaner {
    async fn cleanup(&self, text: &str, _context: &AppContext) -> Result<String, CleanupError> {
        Ok(text.to_string())
    }
}
