// Annotator - resumable category annotation for CSV datasets
// Confirm-or-correct labelling with a durable checkpoint after every row

pub mod cli;
pub mod controller;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
pub mod ui;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use controller::{AnnotationController, Outcome};
pub use error::{AnnotateError, AnnotateResult};
pub use models::{Dataset, Decision, Label, Record};
pub use state::{SessionPhase, SessionState};
