//! Persistent dictionary of learned and manual word corrections.
//!
//! [`CorrectionStore`] keeps one [`CorrectionEntry`] per storage key and
//! persists the whole map as a single JSON document:
//!
//! ```json
//! {
//!   "anthropick": { "spoken": "anthropick", "corrected": "Anthropic", ... },
//!   "jon::Slack": { "spoken": "jon", "corrected": "John", "appName": "Slack", ... }
//! }
//! ```
//!
//! Older builds stored a flat `{"spoken": "corrected"}` map.  Such files are
//! migrated on load and immediately rewritten in the current shape.
//!
//! All reads and writes go through one mutex, so hit-count updates from
//! [`apply_corrections`](CorrectionStore::apply_corrections) and inserts from
//! the correction monitor never interleave.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppPaths;

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// Errors raised while reading or writing the correction file.
///
/// They never escape the public API: persistence is best-effort and failures
/// are logged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("correction file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("correction file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// CorrectionEntry
// ---------------------------------------------------------------------------

/// Where an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CorrectionSource {
    /// Picked up by the correction monitor from a post-paste edit.
    AutoLearned,
    /// Added by the user (or migrated from the legacy format).
    Manual,
}

/// A single `spoken → corrected` substitution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionEntry {
    /// Lowercased form as produced by STT.
    pub spoken: String,
    /// Replacement text.
    pub corrected: String,
    pub date_added: DateTime<Utc>,
    /// Times this entry actually changed a transcript.
    pub hit_count: u32,
    pub is_enabled: bool,
    pub source: CorrectionSource,
    /// Restricts the entry to one destination app.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
}

impl CorrectionEntry {
    pub fn storage_key(&self) -> String {
        storage_key(&self.spoken, self.app_name.as_deref())
    }
}

/// Key under which an entry is stored: `spoken` or `spoken::app`.
pub fn storage_key(spoken: &str, app_name: Option<&str>) -> String {
    match app_name {
        Some(app) => format!("{spoken}::{app}"),
        None => spoken.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Compiled pattern cache
// ---------------------------------------------------------------------------

struct CompiledCorrection {
    key: String,
    pattern: Regex,
    replacement: String,
    app_name: Option<String>,
}

/// Case-insensitive whole-word pattern for `spoken`.
///
/// `\b` is only added on sides that start or end with a word character;
/// a boundary next to punctuation would never match.
fn compile_pattern(spoken: &str) -> Result<Regex, regex::Error> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let lead = if spoken.chars().next().is_some_and(is_word) { r"\b" } else { "" };
    let tail = if spoken.chars().last().is_some_and(is_word) { r"\b" } else { "" };
    Regex::new(&format!("(?i){lead}{}{tail}", regex::escape(spoken)))
}

struct Inner {
    entries: BTreeMap<String, CorrectionEntry>,
    compiled: Vec<CompiledCorrection>,
}

impl Inner {
    fn new(entries: BTreeMap<String, CorrectionEntry>) -> Self {
        let mut inner = Self {
            entries,
            compiled: Vec::new(),
        };
        inner.rebuild_cache();
        inner
    }

    /// Recompile patterns for all enabled entries.  App-scoped entries come
    /// first so they win over a global entry for the same word.
    fn rebuild_cache(&mut self) {
        let mut compiled = Vec::with_capacity(self.entries.len());
        for (key, entry) in self.entries.iter().filter(|(_, e)| e.is_enabled) {
            match compile_pattern(&entry.spoken) {
                Ok(pattern) => compiled.push(CompiledCorrection {
                    key: key.clone(),
                    pattern,
                    replacement: entry.corrected.clone(),
                    app_name: entry.app_name.clone(),
                }),
                Err(e) => log::warn!("skipping correction {key:?}: {e}"),
            }
        }
        compiled.sort_by_key(|c| c.app_name.is_none());
        self.compiled = compiled;
    }
}

// ---------------------------------------------------------------------------
// CorrectionStore
// ---------------------------------------------------------------------------

/// Thread-safe correction dictionary.  Share it as `Arc<CorrectionStore>`.
pub struct CorrectionStore {
    inner: Mutex<Inner>,
    /// `None` keeps everything in memory.
    path: Option<PathBuf>,
}

impl CorrectionStore {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Open the store at the platform config path.
    pub fn load_or_default() -> Self {
        Self::open(AppPaths::new().corrections_file)
    }

    /// Open the store backed by `path`.
    ///
    /// A missing file yields an empty store.  A corrupt file is logged and
    /// also yields an empty store; it is overwritten on the next mutation.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (entries, migrated) = match Self::read_entries(&path) {
            Ok(loaded) => loaded,
            Err(e) => {
                log::warn!(
                    "could not load corrections from {}: {e}; starting empty",
                    path.display()
                );
                (BTreeMap::new(), false)
            }
        };

        let store = Self {
            inner: Mutex::new(Inner::new(entries)),
            path: Some(path),
        };

        if migrated {
            log::info!("migrated legacy correction file to current format");
            store.persist(&store.lock());
        }
        store
    }

    /// A store that never touches the disk.
    pub fn in_memory() -> Self {
        Self {
            inner: Mutex::new(Inner::new(BTreeMap::new())),
            path: None,
        }
    }

    /// Parse the current schema, falling back to the legacy flat map.
    /// The flag is `true` when the legacy shape was read.
    fn read_entries(
        path: &Path,
    ) -> Result<(BTreeMap<String, CorrectionEntry>, bool), StoreError> {
        if !path.exists() {
            return Ok((BTreeMap::new(), false));
        }
        let data = std::fs::read_to_string(path)?;
        if data.trim().is_empty() {
            return Ok((BTreeMap::new(), false));
        }

        match serde_json::from_str::<BTreeMap<String, CorrectionEntry>>(&data) {
            Ok(entries) => Ok((entries, false)),
            Err(current_err) => match serde_json::from_str::<BTreeMap<String, String>>(&data) {
                Ok(legacy) => Ok((migrate_legacy(legacy), true)),
                Err(_) => Err(current_err.into()),
            },
        }
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Substitute every enabled correction into `text`.
    ///
    /// App-scoped entries only apply when `active_app` matches.  Each entry
    /// that changes the text has its hit count bumped, and hits are
    /// persisted.
    pub fn apply_corrections(&self, text: &str, active_app: Option<&str>) -> String {
        let mut inner = self.lock();
        if inner.compiled.is_empty() || text.trim().is_empty() {
            return text.to_string();
        }

        let mut out = text.to_string();
        let mut hits: Vec<String> = Vec::new();
        for c in &inner.compiled {
            if c.app_name.is_some() && c.app_name.as_deref() != active_app {
                continue;
            }
            let replaced = match c.pattern.replace_all(&out, NoExpand(&c.replacement)) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(s) => s,
            };
            if replaced != out {
                hits.push(c.key.clone());
                out = replaced;
            }
        }

        if !hits.is_empty() {
            for key in &hits {
                if let Some(entry) = inner.entries.get_mut(key) {
                    entry.hit_count = entry.hit_count.saturating_add(1);
                }
            }
            log::debug!("applied {} correction(s)", hits.len());
            self.persist(&inner);
        }
        out
    }

    /// Snapshot of all entries, ordered by storage key.
    pub fn entries(&self) -> Vec<CorrectionEntry> {
        self.lock().entries.values().cloned().collect()
    }

    pub fn get(&self, key: &str) -> Option<CorrectionEntry> {
        self.lock().entries.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Number of compiled patterns (enabled entries).
    pub fn active_pattern_count(&self) -> usize {
        self.lock().compiled.len()
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Insert or update a correction.
    ///
    /// An existing entry keeps its hit count, date and enabled flag; only its
    /// replacement and source change.  Blank or no-op corrections are ignored.
    pub fn learn_correction(
        &self,
        spoken: &str,
        corrected: &str,
        source: CorrectionSource,
        app_name: Option<&str>,
    ) {
        let spoken = spoken.trim().to_lowercase();
        let corrected = corrected.trim();
        let app_name = app_name.map(str::trim).filter(|a| !a.is_empty());
        if spoken.is_empty() || corrected.is_empty() || spoken == corrected {
            return;
        }

        let key = storage_key(&spoken, app_name);
        let mut inner = self.lock();
        match inner.entries.get_mut(&key) {
            Some(existing) => {
                existing.corrected = corrected.to_string();
                existing.source = source;
            }
            None => {
                log::info!("learned correction {spoken:?} -> {corrected:?}");
                inner.entries.insert(
                    key,
                    CorrectionEntry {
                        spoken,
                        corrected: corrected.to_string(),
                        date_added: Utc::now(),
                        hit_count: 0,
                        is_enabled: true,
                        source,
                        app_name: app_name.map(str::to_string),
                    },
                );
            }
        }
        inner.rebuild_cache();
        self.persist(&inner);
    }

    /// Delete an entry.  Returns `false` when `key` is unknown.
    pub fn remove_correction(&self, key: &str) -> bool {
        let mut inner = self.lock();
        if inner.entries.remove(key).is_none() {
            return false;
        }
        inner.rebuild_cache();
        self.persist(&inner);
        true
    }

    /// Enable or disable an entry.  Returns `false` when `key` is unknown.
    pub fn toggle_correction(&self, key: &str, enabled: bool) -> bool {
        let mut inner = self.lock();
        match inner.entries.get_mut(key) {
            Some(entry) => entry.is_enabled = enabled,
            None => return false,
        }
        inner.rebuild_cache();
        self.persist(&inner);
        true
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, inner: &Inner) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = write_entries(path, &inner.entries) {
            log::warn!("could not save corrections to {}: {e}", path.display());
        }
    }
}

fn write_entries(path: &Path, entries: &BTreeMap<String, CorrectionEntry>) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(entries)?;
    std::fs::write(path, data)?;
    Ok(())
}

fn migrate_legacy(legacy: BTreeMap<String, String>) -> BTreeMap<String, CorrectionEntry> {
    let now = Utc::now();
    legacy
        .into_iter()
        .filter_map(|(spoken, corrected)| {
            let spoken = spoken.trim().to_lowercase();
            if spoken.is_empty() || corrected.trim().is_empty() {
                return None;
            }
            let entry = CorrectionEntry {
                spoken,
                corrected,
                date_added: now,
                hit_count: 0,
                is_enabled: true,
                source: CorrectionSource::Manual,
                app_name: None,
            };
            Some((entry.storage_key(), entry))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn store_in_temp() -> (CorrectionStore, PathBuf, tempfile::TempDir) {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("corrections.json");
        let store = CorrectionStore::open(path.clone());
        (store, path, dir)
    }

    #[test]
    fn starts_empty() {
        let (store, path, _dir) = store_in_temp();
        assert!(store.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn learn_creates_entry() {
        let store = CorrectionStore::in_memory();
        store.learn_correction("Anthropick", "Anthropic", CorrectionSource::AutoLearned, None);

        let entry = store.get("anthropick").expect("entry");
        assert_eq!(entry.spoken, "anthropick");
        assert_eq!(entry.corrected, "Anthropic");
        assert_eq!(entry.hit_count, 0);
        assert!(entry.is_enabled);
        assert_eq!(entry.source, CorrectionSource::AutoLearned);
    }

    #[test]
    fn app_scoped_key() {
        let store = CorrectionStore::in_memory();
        store.learn_correction("jon", "John", CorrectionSource::Manual, Some("Slack"));
        assert!(store.get("jon::Slack").is_some());
        assert!(store.get("jon").is_none());
    }

    #[test]
    fn ignores_blank_and_noop_corrections() {
        let store = CorrectionStore::in_memory();
        store.learn_correction("  ", "x", CorrectionSource::Manual, None);
        store.learn_correction("x", " ", CorrectionSource::Manual, None);
        store.learn_correction("same", "same", CorrectionSource::Manual, None);
        assert!(store.is_empty());
    }

    #[test]
    fn relearn_keeps_counters() {
        let store = CorrectionStore::in_memory();
        store.learn_correction("teh", "the", CorrectionSource::AutoLearned, None);
        store.apply_corrections("teh end", None);
        store.toggle_correction("teh", false);
        let before = store.get("teh").unwrap();

        store.learn_correction("teh", "the", CorrectionSource::Manual, None);
        let after = store.get("teh").unwrap();

        assert_eq!(after.hit_count, 1);
        assert_eq!(after.date_added, before.date_added);
        assert!(!after.is_enabled);
        assert_eq!(after.source, CorrectionSource::Manual);
    }

    #[test]
    fn applies_case_insensitive_whole_words() {
        let store = CorrectionStore::in_memory();
        store.learn_correction("cat", "Kat", CorrectionSource::Manual, None);

        assert_eq!(store.apply_corrections("Cat and CAT", None), "Kat and Kat");
        assert_eq!(
            store.apply_corrections("concatenate the catalog", None),
            "concatenate the catalog"
        );
    }

    #[test]
    fn hit_count_only_advances_on_change() {
        let store = CorrectionStore::in_memory();
        store.learn_correction("anthropick", "Anthropic", CorrectionSource::Manual, None);

        store.apply_corrections("nothing to see", None);
        assert_eq!(store.get("anthropick").unwrap().hit_count, 0);

        store.apply_corrections("anthropick and anthropick", None);
        assert_eq!(store.get("anthropick").unwrap().hit_count, 1);

        store.apply_corrections("ask anthropick", None);
        assert_eq!(store.get("anthropick").unwrap().hit_count, 2);
    }

    #[test]
    fn app_scoped_entries_need_matching_app() {
        let store = CorrectionStore::in_memory();
        store.learn_correction("jon", "John", CorrectionSource::Manual, Some("Slack"));

        assert_eq!(store.apply_corrections("hi jon", None), "hi jon");
        assert_eq!(store.apply_corrections("hi jon", Some("Mail")), "hi jon");
        assert_eq!(store.apply_corrections("hi jon", Some("Slack")), "hi John");
    }

    #[test]
    fn app_scoped_entry_wins_over_global() {
        let store = CorrectionStore::in_memory();
        store.learn_correction("jon", "Jon Snow", CorrectionSource::Manual, None);
        store.learn_correction("jon", "John", CorrectionSource::Manual, Some("Slack"));

        assert_eq!(store.apply_corrections("hi jon", Some("Slack")), "hi John");
        assert_eq!(store.apply_corrections("hi jon", None), "hi Jon Snow");
    }

    #[test]
    fn disabled_entries_are_not_applied() {
        let store = CorrectionStore::in_memory();
        store.learn_correction("teh", "the", CorrectionSource::Manual, None);
        assert_eq!(store.active_pattern_count(), 1);

        assert!(store.toggle_correction("teh", false));
        assert_eq!(store.active_pattern_count(), 0);
        assert_eq!(store.apply_corrections("teh end", None), "teh end");

        assert!(store.toggle_correction("teh", true));
        assert_eq!(store.apply_corrections("teh end", None), "the end");
    }

    #[test]
    fn remove_and_toggle_unknown_keys() {
        let store = CorrectionStore::in_memory();
        assert!(!store.remove_correction("missing"));
        assert!(!store.toggle_correction("missing", true));

        store.learn_correction("teh", "the", CorrectionSource::Manual, None);
        assert!(store.remove_correction("teh"));
        assert!(store.is_empty());
        assert_eq!(store.active_pattern_count(), 0);
    }

    #[test]
    fn replacement_is_literal() {
        let store = CorrectionStore::in_memory();
        store.learn_correction("dollars", "$5", CorrectionSource::Manual, None);
        assert_eq!(store.apply_corrections("five dollars", None), "five $5");
    }

    #[test]
    fn punctuated_spoken_form_still_matches() {
        let store = CorrectionStore::in_memory();
        store.learn_correction("3pm.", "3:00pm.", CorrectionSource::Manual, None);
        assert_eq!(store.apply_corrections("at 3pm.", None), "at 3:00pm.");
    }

    #[test]
    fn persists_and_reloads() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("corrections.json");

        let learned = {
            let store = CorrectionStore::open(path.clone());
            store.learn_correction("anthropick", "Anthropic", CorrectionSource::AutoLearned, None);
            store.learn_correction("jon", "John", CorrectionSource::Manual, Some("Slack"));
            store.entries()
        };

        let reloaded = CorrectionStore::open(path);
        assert_eq!(reloaded.entries(), learned);
        assert_eq!(reloaded.active_pattern_count(), 2);
    }

    #[test]
    fn hit_counts_are_persisted() {
        let (store, path, _dir) = store_in_temp();
        store.learn_correction("teh", "the", CorrectionSource::Manual, None);
        store.apply_corrections("teh", None);
        drop(store);

        let reloaded = CorrectionStore::open(path);
        assert_eq!(reloaded.get("teh").unwrap().hit_count, 1);
    }

    #[test]
    fn migrates_legacy_flat_map() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("corrections.json");
        std::fs::write(&path, r#"{"Anthropick": "Anthropic", "kubernetis": "Kubernetes"}"#)
            .unwrap();

        let store = CorrectionStore::open(path.clone());
        assert_eq!(store.len(), 2);
        let entry = store.get("anthropick").expect("migrated entry");
        assert_eq!(entry.corrected, "Anthropic");
        assert_eq!(entry.source, CorrectionSource::Manual);
        assert_eq!(entry.hit_count, 0);

        // Rewritten in the current schema right away.
        let on_disk = std::fs::read_to_string(&path).unwrap();
        let parsed: BTreeMap<String, CorrectionEntry> =
            serde_json::from_str(&on_disk).expect("current schema");
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn reloading_migrated_file_is_a_noop() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("corrections.json");
        std::fs::write(&path, r#"{"teh": "the"}"#).unwrap();

        let first = CorrectionStore::open(path.clone()).entries();
        let after_migration = std::fs::read_to_string(&path).unwrap();

        let second = CorrectionStore::open(path.clone()).entries();
        let after_reload = std::fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(after_migration, after_reload);
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("corrections.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = CorrectionStore::open(path.clone());
        assert!(store.is_empty());

        store.learn_correction("teh", "the", CorrectionSource::Manual, None);
        assert_eq!(CorrectionStore::open(path).len(), 1);
    }

    #[test]
    fn unwritable_path_is_not_fatal() {
        let dir = tempdir().expect("temp dir");
        // A directory where the file should be makes every write fail.
        let path = dir.path().join("corrections.json");
        std::fs::create_dir_all(&path).unwrap();

        let store = CorrectionStore::open(path);
        store.learn_correction("teh", "the", CorrectionSource::Manual, None);
        assert_eq!(store.apply_corrections("teh", None), "the");
    }

    #[test]
    fn concurrent_apply_and_learn_serialize() {
        let store = Arc::new(CorrectionStore::in_memory());
        store.learn_correction("teh", "the", CorrectionSource::Manual, None);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        store.apply_corrections("teh", None);
                        store.learn_correction(
                            &format!("w{t}x{i}"),
                            "word",
                            CorrectionSource::AutoLearned,
                            None,
                        );
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.get("teh").unwrap().hit_count, 100);
        assert_eq!(store.len(), 101);
    }
}
