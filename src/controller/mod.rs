//! Annotation controller
//!
//! The only component that mutates records. Each decision is applied, the
//! whole dataset is written out, and session state is rederived before the
//! next decision is accepted.

mod annotate;

pub use annotate::{AnnotationController, Outcome, COMPLETION_MESSAGE};
