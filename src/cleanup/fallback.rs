//! Fallback cleaner: wraps any [`TextCleaner`] and returns its input on error.
//!
//! When the backend fails, times out or answers with blank text,
//! [`FallbackCleaner`] hands back the corrected transcript instead of
//! propagating the error, so dictation keeps working without an LLM.

use std::time::Duration;

use async_trait::async_trait;

use crate::cleanup::cleaner::{CleanupError, TextCleaner};
use crate::context::AppContext;

// ---------------------------------------------------------------------------
// FallbackCleaner
// ---------------------------------------------------------------------------

/// A transparent wrapper around any [`TextCleaner`] that never returns an
/// error.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use voice_text_refine::cleanup::{FallbackCleaner, PassthroughCleaner};
///
/// let cleaner = FallbackCleaner::new(PassthroughCleaner).with_timeout(Duration::from_secs(2));
/// assert_eq!(cleaner.timeout(), Some(Duration::from_secs(2)));
/// ```
pub struct FallbackCleaner<C: TextCleaner> {
    inner: C,
    timeout: Option<Duration>,
}

impl<C: TextCleaner> FallbackCleaner<C> {
    /// Wrap `inner` with fallback behaviour and no deadline.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            timeout: None,
        }
    }

    /// Give up on the backend after `timeout` and use the input instead.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Return a reference to the wrapped cleaner.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    async fn try_cleanup(&self, text: &str, context: &AppContext) -> Result<String, CleanupError> {
        let cleaned = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.inner.cleanup(text, context))
                .await
                .map_err(|_| CleanupError::Timeout)??,
            None => self.inner.cleanup(text, context).await?,
        };
        if cleaned.trim().is_empty() && !text.trim().is_empty() {
            return Err(CleanupError::EmptyResponse);
        }
        Ok(cleaned)
    }
}

#[async_trait]
impl<C: TextCleaner + Send + Sync> TextCleaner for FallbackCleaner<C> {
    /// Attempt cleanup; return `text` unchanged if anything goes wrong.
    ///
    /// This implementation **never** returns `Err(_)`.
    async fn cleanup(&self, text: &str, context: &AppContext) -> Result<String, CleanupError> {
        match self.try_cleanup(text, context).await {
            Ok(cleaned) => Ok(cleaned),
            Err(err) => {
                log::warn!("cleanup failed ({err}), using corrected transcript (len={})", text.len());
                Ok(text.to_string())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Always succeeds with a fixed string.
    struct AlwaysOk(String);

    #[async_trait]
    impl TextCleaner for AlwaysOk {
        async fn cleanup(&self, _text: &str, _ctx: &AppContext) -> Result<String, CleanupError> {
            Ok(self.0.clone())
        }
    }

    /// Always returns the given error.
    struct AlwaysFails(ErrorKind);

    enum ErrorKind {
        Unavailable,
        Timeout,
        Empty,
    }

    #[async_trait]
    impl TextCleaner for AlwaysFails {
        async fn cleanup(&self, _text: &str, _ctx: &AppContext) -> Result<String, CleanupError> {
            Err(match self.0 {
                ErrorKind::Unavailable => CleanupError::Unavailable("connection refused".into()),
                ErrorKind::Timeout => CleanupError::Timeout,
                ErrorKind::Empty => CleanupError::EmptyResponse,
            })
        }
    }

    /// Never finishes within any reasonable deadline.
    struct Stalls;

    #[async_trait]
    impl TextCleaner for Stalls {
        async fn cleanup(&self, text: &str, _ctx: &AppContext) -> Result<String, CleanupError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(text.to_uppercase())
        }
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    fn ctx() -> AppContext {
        AppContext::default()
    }

    #[tokio::test]
    async fn passes_through_success() {
        let cleaner = FallbackCleaner::new(AlwaysOk("Hello there.".into()));
        let result = cleaner.cleanup("um hello there", &ctx()).await.unwrap();
        assert_eq!(result, "Hello there.");
    }

    #[tokio::test]
    async fn returns_input_on_unavailable() {
        let cleaner = FallbackCleaner::new(AlwaysFails(ErrorKind::Unavailable));
        let result = cleaner.cleanup("original text", &ctx()).await.unwrap();
        assert_eq!(result, "original text");
    }

    #[tokio::test]
    async fn returns_input_on_backend_timeout() {
        let cleaner = FallbackCleaner::new(AlwaysFails(ErrorKind::Timeout));
        let result = cleaner.cleanup("original text", &ctx()).await.unwrap();
        assert_eq!(result, "original text");
    }

    #[tokio::test]
    async fn returns_input_on_empty_error() {
        let cleaner = FallbackCleaner::new(AlwaysFails(ErrorKind::Empty));
        let result = cleaner.cleanup("original text", &ctx()).await.unwrap();
        assert_eq!(result, "original text");
    }

    #[tokio::test]
    async fn blank_answer_is_rejected() {
        let cleaner = FallbackCleaner::new(AlwaysOk("   ".into()));
        let result = cleaner.cleanup("original text", &ctx()).await.unwrap();
        assert_eq!(result, "original text");
    }

    #[tokio::test]
    async fn deadline_falls_back() {
        let cleaner = FallbackCleaner::new(Stalls).with_timeout(Duration::from_millis(50));
        let result = cleaner.cleanup("original text", &ctx()).await.unwrap();
        assert_eq!(result, "original text");
    }

    #[tokio::test]
    async fn never_returns_err() {
        let cleaner = FallbackCleaner::new(AlwaysFails(ErrorKind::Timeout));
        assert!(cleaner.cleanup("test", &ctx()).await.is_ok());
    }

    /// FallbackCleaner<C> must itself be a valid TextCleaner (object-safe).
    #[test]
    fn fallback_is_object_safe() {
        let _: Box<dyn TextCleaner> = Box::new(FallbackCleaner::new(AlwaysOk("ok".into())));
    }
}
