use crate::error::{AnnotateError, AnnotateResult};
use crate::models::{Annotation, Dataset, Decision, Record, RecordFields};
use crate::state::SessionState;
use crate::store::{self, Origin};
use std::path::{Path, PathBuf};

/// Message returned once the last unannotated row has been saved
pub const COMPLETION_MESSAGE: &str = "Annotation complete! All rows have been annotated.";

/// Result of applying one decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// State rederived after the write
    pub state: SessionState,
    /// Human-readable progress line
    pub message: String,
    /// Fields of the next record to present; empty once the session is complete
    pub next: RecordFields,
}

/// Applies annotation decisions to a dataset and persists each one.
///
/// Owns the dataset, its output artifact path, and the session state derived
/// from the dataset's latest contents.
pub struct AnnotationController {
    dataset: Dataset,
    output_path: PathBuf,
    state: SessionState,
}

impl AnnotationController {
    pub fn new(dataset: Dataset, output_path: impl Into<PathBuf>) -> Self {
        let state = SessionState::derive(&dataset);
        Self {
            dataset,
            output_path: output_path.into(),
            state,
        }
    }

    /// Load the session dataset (resuming from `output` when it exists)
    pub fn open(input: &Path, output: &Path) -> AnnotateResult<(Self, Origin)> {
        let (dataset, origin) = store::open_session_dataset(input, output)?;
        Ok((Self::new(dataset, output), origin))
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Record at the current position, or `None` when complete
    pub fn current_record(&self) -> Option<&Record> {
        self.state
            .current_position
            .and_then(|position| self.dataset.get(position))
    }

    /// Annotate the record at the current position
    pub fn annotate_current(&mut self, decision: Decision) -> AnnotateResult<Outcome> {
        match self.state.current_position {
            Some(position) => self.annotate(position, decision),
            None => Err(AnnotateError::InvalidPosition {
                position: self.dataset.len(),
            }),
        }
    }

    /// Annotate the record at `position`, persist the dataset, and rederive
    /// state.
    ///
    /// `position` must be currently unannotated. If the write fails the record
    /// is restored to its unannotated form before the error is returned.
    pub fn annotate(&mut self, position: usize, decision: Decision) -> AnnotateResult<Outcome> {
        if !self.state.is_unannotated(position) {
            return Err(AnnotateError::InvalidPosition { position });
        }

        let record = self
            .dataset
            .get_mut(position)
            .ok_or(AnnotateError::InvalidPosition { position })?;
        let annotation = Annotation::from_decision(decision, &record.fields.category);
        let previous = record.annotation.replace(annotation);

        if let Err(e) = store::save(&self.dataset, &self.output_path) {
            if let Some(record) = self.dataset.get_mut(position) {
                record.annotation = previous;
            }
            return Err(e);
        }

        self.state = SessionState::derive(&self.dataset);

        let (message, next) = match self.current_record() {
            Some(record) => (
                format!("Annotation saved. ({})", self.state.summary()),
                record.fields.clone(),
            ),
            None => (COMPLETION_MESSAGE.to_string(), RecordFields::default()),
        };

        Ok(Outcome {
            state: self.state.clone(),
            message,
            next,
        })
    }
}
