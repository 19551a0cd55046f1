//! App-aware formatting of cleaned-up dictation.
//!
//! This module provides:
//! * [`format`]: runs the fixed sequence of [`Stage`]s that apply to the
//!   destination app.
//! * [`strip_meta_commands`]: removes spoken retractions ("scratch that")
//!   from raw transcripts before cleanup.
//! * The individual stage functions, usable on their own.
//!
//! Every stage is a pure `&str -> String` transform.  Order matters: later
//! stages assume earlier ones already consumed their patterns (code-token
//! wrapping must not re-wrap a file the tagging stage already turned into
//! `@file.ext`).
//!
//! # Quick start
//!
//! ```rust
//! use voice_text_refine::config::StyleSettings;
//! use voice_text_refine::context::{AppCategory, AppContext, WritingStyle};
//! use voice_text_refine::format::format;
//!
//! let settings = StyleSettings::default();
//! let context = AppContext::for_category(AppCategory::Terminal, WritingStyle::Casual);
//!
//! assert_eq!(format("git status.", &context, &settings), "git status");
//! ```

pub mod casual;
pub mod code;
pub mod email;
pub mod emoji;
pub mod lists;
pub mod mentions;
pub mod meta;
pub mod todo;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use casual::apply_very_casual;
pub use code::{apply_code_token_wrapping, apply_file_tagging};
pub use email::apply_email_formatting;
pub use emoji::apply_emoji_names;
pub use lists::{apply_bullet_formatting, apply_list_safety_net, split_list_items};
pub use mentions::apply_mentions;
pub use meta::strip_meta_commands;
pub use todo::apply_todo_conversion;

use crate::config::StyleSettings;
use crate::context::{AppCategory, AppContext, WritingStyle};

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// One formatting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ListSafetyNet,
    Bullets,
    VeryCasual,
    EmojiNames,
    FileTagging,
    CodeTokens,
    Mentions,
    Email,
    Todos,
    Terminal,
    Social,
}

impl Stage {
    /// Execution order.
    pub const ORDER: [Stage; 11] = [
        Stage::ListSafetyNet,
        Stage::Bullets,
        Stage::VeryCasual,
        Stage::EmojiNames,
        Stage::FileTagging,
        Stage::CodeTokens,
        Stage::Mentions,
        Stage::Email,
        Stage::Todos,
        Stage::Terminal,
        Stage::Social,
    ];

    /// Whether this stage runs for the given destination and settings.
    pub fn applies(&self, context: &AppContext, settings: &StyleSettings) -> bool {
        let category = context.category;
        match self {
            Stage::ListSafetyNet => true,
            Stage::Bullets => category.is_note_taking(),
            Stage::VeryCasual => context.style == WritingStyle::VeryCasual,
            Stage::EmojiNames => category.is_messaging(),
            Stage::FileTagging => {
                settings.ide_file_tagging
                    && (context.is_ide_chat_panel
                        || matches!(category, AppCategory::CodeEditor | AppCategory::AiChat))
            }
            Stage::CodeTokens => {
                settings.ide_variable_recognition && category == AppCategory::CodeEditor
            }
            Stage::Mentions => category == AppCategory::WorkMessaging,
            Stage::Email => category == AppCategory::Email,
            Stage::Todos => settings.notes_todo_conversion && category.is_note_taking(),
            Stage::Terminal => category == AppCategory::Terminal,
            Stage::Social => category == AppCategory::Social,
        }
    }

    /// Run the stage unconditionally.
    pub fn apply(&self, text: &str) -> String {
        match self {
            Stage::ListSafetyNet => apply_list_safety_net(text),
            Stage::Bullets => apply_bullet_formatting(text),
            Stage::VeryCasual => apply_very_casual(text),
            Stage::EmojiNames => apply_emoji_names(text),
            Stage::FileTagging => apply_file_tagging(text),
            Stage::CodeTokens => apply_code_token_wrapping(text),
            Stage::Mentions | Stage::Social => apply_mentions(text),
            Stage::Email => apply_email_formatting(text),
            Stage::Todos => apply_todo_conversion(text),
            Stage::Terminal => apply_terminal_formatting(text),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::ListSafetyNet => "list safety net",
            Stage::Bullets => "bullets",
            Stage::VeryCasual => "very casual",
            Stage::EmojiNames => "emoji names",
            Stage::FileTagging => "file tagging",
            Stage::CodeTokens => "code tokens",
            Stage::Mentions => "mentions",
            Stage::Email => "email",
            Stage::Todos => "todos",
            Stage::Terminal => "terminal",
            Stage::Social => "social",
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Format cleaned-up text for the app described by `context`.
///
/// Blank input is returned unchanged.
pub fn format(text: &str, context: &AppContext, settings: &StyleSettings) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    let mut out = text.to_string();
    for stage in Stage::ORDER.iter().filter(|s| s.applies(context, settings)) {
        let next = stage.apply(&out);
        if next != out {
            log::debug!(
                "format: {} stage rewrote text for {}",
                stage.label(),
                context.category.label()
            );
            out = next;
        }
    }
    out
}

/// Shell prompts don't want a sentence period; an ellipsis is kept.
pub fn apply_terminal_formatting(text: &str) -> String {
    match text.strip_suffix('.') {
        Some(stripped) if !stripped.ends_with('.') => stripped.to_string(),
        _ => text.to_string(),
    }
}

/// Uppercase the first character.
pub(crate) fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
