//! Composition root wiring correction, cleanup, formatting and learning.
//!
//! # Architecture
//!
//! ```text
//! raw STT ──▶ DictationPipeline::process(raw, &AppContext)   (async)
//!                │
//!                ├─ strip_meta_commands
//!                ├─ CorrectionStore::apply_corrections     ◀──┐
//!                ├─ TextCleaner::cleanup (fallback on error)  │
//!                └─ format()                                  │
//!                                                             │
//! paste ────▶ DictationPipeline::on_pasted(text)              │
//!                └─ tokio::spawn(CorrectionMonitor::watch) ───┘ learn_correction
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use voice_text_refine::cleanup::{FallbackCleaner, PassthroughCleaner};
//! use voice_text_refine::config::AppConfig;
//! use voice_text_refine::learning::{CorrectionMonitor, CorrectionStore, FieldReader};
//! use voice_text_refine::pipeline::DictationPipeline;
//!
//! struct Accessibility;
//! impl FieldReader for Accessibility {
//!     fn read_focused_text(&self) -> Option<String> { None }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     let store = Arc::new(CorrectionStore::load_or_default());
//!     let monitor = CorrectionMonitor::new(
//!         Arc::clone(&store),
//!         Arc::new(Accessibility),
//!         config.learning.clone(),
//!     );
//!
//!     let pipeline = DictationPipeline::new(
//!         &config,
//!         store,
//!         Arc::new(FallbackCleaner::new(PassthroughCleaner)),
//!     )
//!     .with_monitor(monitor);
//!
//!     let context = pipeline.detect_context("com.apple.mail", "Mail", None);
//!     let text = pipeline.process("hi sam, see you friday. thanks, alex", &context).await;
//!     // ...paste `text`, then:
//!     if let Some(session) = pipeline.on_pasted(&text, Some(&context.app_name)) {
//!         let _report = session.await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod runner;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::DictationPipeline;
