//! Seam for the cleanup pass that sits between correction and formatting.
//!
//! This module provides:
//! * [`TextCleaner`]: async trait implemented by cleanup backends.
//! * [`PassthroughCleaner`]: no-op backend.
//! * [`FallbackCleaner`]: wraps any cleaner; returns its input on failure.
//! * [`CleanupError`]: error variants for cleanup backends.

pub mod cleaner;
pub mod fallback;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use cleaner::{CleanupError, PassthroughCleaner, TextCleaner};
pub use fallback::FallbackCleaner;
