//! Configuration module.
//!
//! Provides `AppConfig` (top-level settings), the formatting
//! [`StyleSettings`], the correction-learning [`LearningConfig`], `AppPaths`
//! for cross-platform data directories, and TOML persistence via
//! `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, CategoryStyles, LearningConfig, StyleSettings};
