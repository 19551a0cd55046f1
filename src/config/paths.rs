//! Cross-platform application paths using the `dirs` crate.
//!
//! Everything lives in the config dir:
//!   Windows: %APPDATA%\voice-text-refine\
//!   macOS:   ~/Library/Application Support/voice-text-refine/
//!   Linux:   ~/.config/voice-text-refine/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml` and `corrections.json`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Full path to the learned correction dictionary.
    pub corrections_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "voice-text-refine";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let corrections_file = config_dir.join("corrections.json");

        Self {
            config_dir,
            settings_file,
            corrections_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
