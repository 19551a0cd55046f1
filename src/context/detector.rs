//! Bundle-identifier based app classification.
//!
//! [`ContextDetector`] maps the frontmost app's bundle identifier (or, as a
//! fallback, its display name) onto an [`AppCategory`] using a static table,
//! then resolves the user's [`WritingStyle`] for that category.

use crate::config::StyleSettings;
use crate::context::app::{AppCategory, AppContext};

// ---------------------------------------------------------------------------
// Internal types
// ---------------------------------------------------------------------------

struct CategoryRule {
    category: AppCategory,
    /// Lowercase fragments matched against the bundle id.
    bundle_fragments: &'static [&'static str],
    /// Lowercase fragments matched against the app name.
    name_fragments: &'static [&'static str],
}

// ---------------------------------------------------------------------------
// Static category table
// ---------------------------------------------------------------------------

// Order matters: the first rule with a matching fragment wins.
static RULES: &[CategoryRule] = &[
    CategoryRule {
        category: AppCategory::Terminal,
        bundle_fragments: &[
            "com.apple.terminal",
            "com.googlecode.iterm2",
            "dev.warp",
            "net.kovidgoyal.kitty",
            "io.alacritty",
            "com.github.wez.wezterm",
            "com.mitchellh.ghostty",
        ],
        name_fragments: &["terminal", "iterm", "warp", "kitty", "alacritty", "ghostty"],
    },
    CategoryRule {
        category: AppCategory::CodeEditor,
        bundle_fragments: &[
            "com.microsoft.vscode",
            "com.todesktop.230313mzl4w4u92", // Cursor
            "com.exafunction.windsurf",
            "com.apple.dt.xcode",
            "com.jetbrains",
            "dev.zed.zed",
            "com.sublimetext",
            "com.panic.nova",
        ],
        name_fragments: &["code", "cursor", "windsurf", "xcode", "intellij", "zed", "sublime"],
    },
    CategoryRule {
        category: AppCategory::AiChat,
        bundle_fragments: &["com.anthropic.claude", "com.openai.chat", "ai.perplexity"],
        name_fragments: &["claude", "chatgpt", "perplexity"],
    },
    CategoryRule {
        category: AppCategory::WorkMessaging,
        bundle_fragments: &[
            "com.tinyspeck.slackmacgap",
            "com.microsoft.teams",
            "com.hnc.discord",
            "ru.keepcoder.telegram",
        ],
        name_fragments: &["slack", "teams", "discord"],
    },
    CategoryRule {
        category: AppCategory::PersonalMessaging,
        bundle_fragments: &[
            "com.apple.mobilesms",
            "net.whatsapp.whatsapp",
            "org.whispersystems.signal-desktop",
            "com.facebook.archon",
        ],
        name_fragments: &["messages", "whatsapp", "signal", "messenger", "telegram"],
    },
    CategoryRule {
        category: AppCategory::Email,
        bundle_fragments: &[
            "com.apple.mail",
            "com.microsoft.outlook",
            "com.readdle.smartemail",
            "com.superhuman",
            "com.mimestream",
        ],
        name_fragments: &["mail", "outlook", "spark", "superhuman"],
    },
    CategoryRule {
        category: AppCategory::Notes,
        bundle_fragments: &[
            "com.apple.notes",
            "md.obsidian",
            "com.agiletortoise.drafts",
            "net.shinyfrog.bear",
            "com.apple.reminders",
        ],
        name_fragments: &["notes", "obsidian", "drafts", "bear"],
    },
    CategoryRule {
        category: AppCategory::Documents,
        bundle_fragments: &[
            "com.microsoft.word",
            "com.apple.iwork.pages",
            "notion.id",
            "com.apple.textedit",
        ],
        name_fragments: &["word", "pages", "notion", "textedit", "docs"],
    },
    CategoryRule {
        category: AppCategory::Social,
        bundle_fragments: &["com.twitter", "com.atebits.tweetie2", "com.linkedin"],
        name_fragments: &["twitter", "linkedin", "mastodon", "threads"],
    },
    CategoryRule {
        category: AppCategory::Browser,
        bundle_fragments: &[
            "com.apple.safari",
            "com.google.chrome",
            "org.mozilla.firefox",
            "company.thebrowser.browser",
            "com.brave.browser",
            "com.microsoft.edgemac",
        ],
        name_fragments: &["safari", "chrome", "firefox", "arc", "brave", "edge"],
    },
];

/// Window-title fragments identifying an assistant chat panel inside an IDE.
const IDE_CHAT_TITLE_HINTS: &[&str] = &["chat", "composer", "copilot", "cascade", "agent"];

// ---------------------------------------------------------------------------
// AppCategory classification
// ---------------------------------------------------------------------------

impl AppCategory {
    /// Classify a bundle identifier; unknown ids map to [`AppCategory::Other`].
    ///
    /// ```rust
    /// use voice_text_refine::context::AppCategory;
    ///
    /// assert_eq!(AppCategory::from_bundle_id("com.apple.mail"), AppCategory::Email);
    /// assert_eq!(AppCategory::from_bundle_id("com.example.unknown"), AppCategory::Other);
    /// ```
    pub fn from_bundle_id(bundle_id: &str) -> Self {
        let id = bundle_id.to_lowercase();
        RULES
            .iter()
            .find(|rule| rule.bundle_fragments.iter().any(|f| id.starts_with(f)))
            .map(|rule| rule.category)
            .unwrap_or(AppCategory::Other)
    }

    /// Classify by app display name.  Matches whole words only so that
    /// "Visual Studio Code" hits `code` but "Barcode Scanner" does not.
    pub fn from_app_name(app_name: &str) -> Self {
        let name = app_name.to_lowercase();
        let words: Vec<&str> = name
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        RULES
            .iter()
            .find(|rule| rule.name_fragments.iter().any(|f| words.contains(f)))
            .map(|rule| rule.category)
            .unwrap_or(AppCategory::Other)
    }
}

// ---------------------------------------------------------------------------
// ContextDetector
// ---------------------------------------------------------------------------

/// Builds an [`AppContext`] from what the OS reports about the frontmost app.
#[derive(Debug, Clone, Copy)]
pub struct ContextDetector;

impl ContextDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect the context for the given app.  The bundle id is authoritative;
    /// the display name is only consulted when the id is unknown.
    pub fn detect(
        &self,
        bundle_id: &str,
        app_name: &str,
        window_title: Option<&str>,
        settings: &StyleSettings,
    ) -> AppContext {
        let mut category = AppCategory::from_bundle_id(bundle_id);
        if category == AppCategory::Other {
            category = AppCategory::from_app_name(app_name);
        }

        let is_ide_chat_panel = category == AppCategory::CodeEditor
            && window_title.is_some_and(is_chat_panel_title);

        AppContext {
            bundle_id: bundle_id.to_string(),
            app_name: app_name.to_string(),
            category,
            style: settings.style_for(category),
            window_title: window_title.map(str::to_string),
            focused_field_text: None,
            is_ide_chat_panel,
        }
    }
}

impl Default for ContextDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn is_chat_panel_title(title: &str) -> bool {
    let title = title.to_lowercase();
    IDE_CHAT_TITLE_HINTS.iter().any(|hint| title.contains(hint))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
