//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::context::{AppCategory, WritingStyle};

// ---------------------------------------------------------------------------
// CategoryStyles
// ---------------------------------------------------------------------------

/// The writing style chosen for each app category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryStyles {
    pub personal_messaging: WritingStyle,
    pub work_messaging: WritingStyle,
    pub email: WritingStyle,
    pub code_editor: WritingStyle,
    pub browser: WritingStyle,
    pub documents: WritingStyle,
    pub ai_chat: WritingStyle,
    pub terminal: WritingStyle,
    pub notes: WritingStyle,
    pub social: WritingStyle,
    pub other: WritingStyle,
}

impl CategoryStyles {
    pub fn get(&self, category: AppCategory) -> WritingStyle {
        match category {
            AppCategory::PersonalMessaging => self.personal_messaging,
            AppCategory::WorkMessaging => self.work_messaging,
            AppCategory::Email => self.email,
            AppCategory::CodeEditor => self.code_editor,
            AppCategory::Browser => self.browser,
            AppCategory::Documents => self.documents,
            AppCategory::AiChat => self.ai_chat,
            AppCategory::Terminal => self.terminal,
            AppCategory::Notes => self.notes,
            AppCategory::Social => self.social,
            AppCategory::Other => self.other,
        }
    }

    pub fn set(&mut self, category: AppCategory, style: WritingStyle) {
        let slot = match category {
            AppCategory::PersonalMessaging => &mut self.personal_messaging,
            AppCategory::WorkMessaging => &mut self.work_messaging,
            AppCategory::Email => &mut self.email,
            AppCategory::CodeEditor => &mut self.code_editor,
            AppCategory::Browser => &mut self.browser,
            AppCategory::Documents => &mut self.documents,
            AppCategory::AiChat => &mut self.ai_chat,
            AppCategory::Terminal => &mut self.terminal,
            AppCategory::Notes => &mut self.notes,
            AppCategory::Social => &mut self.social,
            AppCategory::Other => &mut self.other,
        };
        *slot = style;
    }
}

impl Default for CategoryStyles {
    fn default() -> Self {
        Self {
            personal_messaging: WritingStyle::Casual,
            work_messaging: WritingStyle::Casual,
            email: WritingStyle::Formal,
            code_editor: WritingStyle::Formal,
            browser: WritingStyle::Casual,
            documents: WritingStyle::Formal,
            ai_chat: WritingStyle::Casual,
            terminal: WritingStyle::Casual,
            notes: WritingStyle::Casual,
            social: WritingStyle::Excited,
            other: WritingStyle::Casual,
        }
    }
}

// ---------------------------------------------------------------------------
// StyleSettings
// ---------------------------------------------------------------------------

/// Formatting preferences: per-category style plus feature toggles.
///
/// Read-only to the formatting pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    /// Style per app category.
    pub styles: CategoryStyles,
    /// Wrap camelCase / snake_case identifiers in backticks inside editors.
    pub ide_variable_recognition: bool,
    /// Turn spoken file names into `@file.ext` tags for IDE assistants.
    pub ide_file_tagging: bool,
    /// Turn "remember to …" sentences into checklist items in notes.
    pub notes_todo_conversion: bool,
}

impl StyleSettings {
    pub fn style_for(&self, category: AppCategory) -> WritingStyle {
        self.styles.get(category)
    }
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            styles: CategoryStyles::default(),
            ide_variable_recognition: true,
            ide_file_tagging: true,
            notes_todo_conversion: true,
        }
    }
}

// ---------------------------------------------------------------------------
// LearningConfig
// ---------------------------------------------------------------------------

/// Settings for the post-paste correction monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Whether pasted text is watched for user corrections at all.
    pub enabled: bool,
    /// Delay between two reads of the focused field.
    pub poll_interval_ms: u64,
    /// Polls before the session times out.
    pub max_polls: u32,
    /// Consecutive polls the pasted region may go missing before the
    /// session gives up.
    pub max_consecutive_misses: u32,
    /// Window length as a multiple of the pasted text length; the slack
    /// absorbs words the user adds while editing.
    pub window_buffer: f64,
    /// Leading words used when the pasted text is not found verbatim.
    pub fuzzy_anchor_words: usize,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_ms: 1_000,
            max_polls: 60,
            max_consecutive_misses: 3,
            window_buffer: 1.5,
            fuzzy_anchor_words: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use voice_text_refine::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Formatting pipeline preferences.
    pub style: StyleSettings,
    /// Correction-learning settings.
    pub learning: LearningConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
