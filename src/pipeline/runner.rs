//! Dictation pipeline: drives raw STT text through correction, cleanup and
//! formatting, then watches the paste for corrections.
//!
//! # Pipeline flow
//!
//! ```text
//! raw STT text
//!   └─▶ strip_meta_commands                         ("scratch that")
//!         └─▶ CorrectionStore::apply_corrections    (learned vocabulary)
//!               └─▶ TextCleaner::cleanup (async)
//!                     ├─ Ok  → cleaned text
//!                     └─ Err → warn + corrected text
//!                           └─▶ format(text, AppContext, StyleSettings)
//!
//! on_pasted(text)
//!   └─▶ CorrectionMonitor::spawn → SessionReport   (when learning enabled)
//! ```

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::cleanup::TextCleaner;
use crate::config::{AppConfig, StyleSettings};
use crate::context::{AppContext, ContextDetector};
use crate::format::{format, strip_meta_commands};
use crate::learning::{CorrectionMonitor, CorrectionStore, SessionReport};

// ---------------------------------------------------------------------------
// DictationPipeline
// ---------------------------------------------------------------------------

/// Composition root for the text-quality layer.
///
/// The store is injected rather than global so several pipelines (or tests)
/// can run side by side.
///
/// ```rust
/// use std::sync::Arc;
/// use voice_text_refine::cleanup::PassthroughCleaner;
/// use voice_text_refine::config::AppConfig;
/// use voice_text_refine::learning::CorrectionStore;
/// use voice_text_refine::pipeline::DictationPipeline;
///
/// # async fn example() {
/// let pipeline = DictationPipeline::new(
///     &AppConfig::default(),
///     Arc::new(CorrectionStore::in_memory()),
///     Arc::new(PassthroughCleaner),
/// );
/// let context = pipeline.detect_context("com.apple.Terminal", "Terminal", None);
/// assert_eq!(pipeline.process("ls -la.", &context).await, "ls -la");
/// # }
/// ```
pub struct DictationPipeline {
    store: Arc<CorrectionStore>,
    cleaner: Arc<dyn TextCleaner>,
    settings: StyleSettings,
    detector: ContextDetector,
    monitor: Option<Arc<CorrectionMonitor>>,
    learning_enabled: bool,
}

impl DictationPipeline {
    /// Create a pipeline without correction monitoring.
    ///
    /// Attach a monitor with [`with_monitor`](Self::with_monitor).
    pub fn new(
        config: &AppConfig,
        store: Arc<CorrectionStore>,
        cleaner: Arc<dyn TextCleaner>,
    ) -> Self {
        Self {
            store,
            cleaner,
            settings: config.style.clone(),
            detector: ContextDetector::new(),
            monitor: None,
            learning_enabled: config.learning.enabled,
        }
    }

    /// Watch pasted text with `monitor` (only used while learning is enabled).
    pub fn with_monitor(mut self, monitor: CorrectionMonitor) -> Self {
        self.monitor = Some(Arc::new(monitor));
        self
    }

    pub fn store(&self) -> &Arc<CorrectionStore> {
        &self.store
    }

    pub fn settings(&self) -> &StyleSettings {
        &self.settings
    }

    /// Swap in new style settings (e.g. after the user edits preferences).
    pub fn update_settings(&mut self, settings: StyleSettings) {
        self.settings = settings;
    }

    /// Classify the destination app using the current style settings.
    pub fn detect_context(
        &self,
        bundle_id: &str,
        app_name: &str,
        window_title: Option<&str>,
    ) -> AppContext {
        self.detector.detect(bundle_id, app_name, window_title, &self.settings)
    }

    // -----------------------------------------------------------------------
    // Stages
    // -----------------------------------------------------------------------

    /// Pre-cleanup pass: drop retracted sentences, then apply learned
    /// corrections so the cleanup backend already sees the right words.
    pub fn prepare(&self, raw: &str, app_name: Option<&str>) -> String {
        let stripped = strip_meta_commands(raw);
        if stripped.trim().is_empty() {
            return String::new();
        }
        self.store.apply_corrections(&stripped, app_name)
    }

    /// Full pass from raw STT text to the text that should be pasted.
    ///
    /// A cleanup failure never fails the pass: the corrected transcript is
    /// formatted instead.  Input that a meta-command erased entirely yields
    /// an empty string without calling the cleaner.
    pub async fn process(&self, raw: &str, context: &AppContext) -> String {
        let app_name = Some(context.app_name.as_str()).filter(|name| !name.is_empty());
        let prepared = self.prepare(raw, app_name);
        if prepared.is_empty() {
            log::debug!("pipeline: nothing left to paste after meta-command stripping");
            return prepared;
        }

        let cleaned = match self.cleaner.cleanup(&prepared, context).await {
            Ok(cleaned) => cleaned,
            Err(e) => {
                log::warn!("pipeline: cleanup failed ({e}), formatting corrected text");
                prepared
            }
        };

        format(&cleaned, context, &self.settings)
    }

    /// Start watching `pasted` for user corrections.
    ///
    /// Returns `None` when learning is disabled, no monitor is attached or
    /// the paste is blank.
    pub fn on_pasted(
        &self,
        pasted: &str,
        app_name: Option<&str>,
    ) -> Option<JoinHandle<SessionReport>> {
        if !self.learning_enabled || pasted.trim().is_empty() {
            return None;
        }
        let monitor = self.monitor.as_ref()?;
        Some(monitor.spawn(pasted.to_string(), app_name.map(str::to_string)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
