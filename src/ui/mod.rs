//! Terminal presentation: record rendering, decision prompt, progress bar

pub mod progress;
pub mod prompt;
pub mod render;

pub use progress::SessionProgress;
pub use prompt::{DecisionSource, TerminalPrompt};
