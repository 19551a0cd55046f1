//! Destination-app description consumed by the formatting pipeline.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AppCategory
// ---------------------------------------------------------------------------

/// Classification bucket of the app receiving the dictated text.
///
/// The category decides which formatting stages run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppCategory {
    PersonalMessaging,
    WorkMessaging,
    Email,
    CodeEditor,
    Browser,
    Documents,
    AiChat,
    Terminal,
    Notes,
    Social,
    Other,
}

impl AppCategory {
    /// Every category, in declaration order.
    pub const ALL: [AppCategory; 11] = [
        AppCategory::PersonalMessaging,
        AppCategory::WorkMessaging,
        AppCategory::Email,
        AppCategory::CodeEditor,
        AppCategory::Browser,
        AppCategory::Documents,
        AppCategory::AiChat,
        AppCategory::Terminal,
        AppCategory::Notes,
        AppCategory::Social,
        AppCategory::Other,
    ];

    /// Chat apps where emoji names are converted.
    pub fn is_messaging(&self) -> bool {
        matches!(
            self,
            AppCategory::PersonalMessaging | AppCategory::WorkMessaging | AppCategory::Social
        )
    }

    /// Long-form writing surfaces (bullets, todos).
    pub fn is_note_taking(&self) -> bool {
        matches!(self, AppCategory::Notes | AppCategory::Documents)
    }

    /// A short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            AppCategory::PersonalMessaging => "Personal messaging",
            AppCategory::WorkMessaging => "Work messaging",
            AppCategory::Email => "Email",
            AppCategory::CodeEditor => "Code editor",
            AppCategory::Browser => "Browser",
            AppCategory::Documents => "Documents",
            AppCategory::AiChat => "AI chat",
            AppCategory::Terminal => "Terminal",
            AppCategory::Notes => "Notes",
            AppCategory::Social => "Social",
            AppCategory::Other => "Other",
        }
    }
}

impl Default for AppCategory {
    fn default() -> Self {
        Self::Other
    }
}

// ---------------------------------------------------------------------------
// WritingStyle
// ---------------------------------------------------------------------------

/// Tone the user picked for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WritingStyle {
    VeryCasual,
    Casual,
    Excited,
    Formal,
}

impl Default for WritingStyle {
    fn default() -> Self {
        Self::Casual
    }
}

// ---------------------------------------------------------------------------
// AppContext
// ---------------------------------------------------------------------------

/// Snapshot of the destination app for one `format` call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppContext {
    pub bundle_id: String,
    pub app_name: String,
    pub category: AppCategory,
    pub style: WritingStyle,
    pub window_title: Option<String>,
    pub focused_field_text: Option<String>,
    /// The focused field is an assistant chat panel inside an IDE.
    pub is_ide_chat_panel: bool,
}

impl AppContext {
    /// Minimal context for a category, mostly useful in tests and for
    /// callers that already know what they are talking to.
    pub fn for_category(category: AppCategory, style: WritingStyle) -> Self {
        Self {
            category,
            style,
            ..Self::default()
        }
    }
}
