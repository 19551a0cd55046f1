//! Destination-app context.
//!
//! * [`AppContext`]: what the formatting pipeline knows about the target app.
//! * [`AppCategory`] / [`WritingStyle`]: classification and tone.
//! * [`ContextDetector`]: builds an `AppContext` from a bundle identifier.

pub mod app;
pub mod detector;

pub use app::{AppCategory, AppContext, WritingStyle};
pub use detector::ContextDetector;
