//! SessionState - progress derived from a dataset snapshot

use crate::models::Dataset;
use serde::Serialize;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    /// At least one record has no annotation
    InProgress,
    /// Every record is annotated; no further work is offered
    Complete,
}

/// Progress counters and the next unit of work.
///
/// Never persisted. Recomputed from the dataset after every load and every
/// mutation, so it cannot drift from the records it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub total: usize,
    pub completed: usize,
    pub unannotated_positions: Vec<usize>,
    pub current_position: Option<usize>,
    pub phase: SessionPhase,
}

impl SessionState {
    /// Scan every record in order and collect the unannotated positions
    pub fn derive(dataset: &Dataset) -> Self {
        let unannotated_positions: Vec<usize> = dataset
            .records()
            .iter()
            .enumerate()
            .filter(|(_, record)| !record.is_annotated())
            .map(|(position, _)| position)
            .collect();

        let total = dataset.len();
        let completed = total - unannotated_positions.len();
        let current_position = unannotated_positions.first().copied();
        let phase = if current_position.is_some() {
            SessionPhase::InProgress
        } else {
            SessionPhase::Complete
        };

        Self {
            total,
            completed,
            unannotated_positions,
            current_position,
            phase,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    pub fn remaining(&self) -> usize {
        self.unannotated_positions.len()
    }

    /// Whether `position` is waiting for an annotation
    pub fn is_unannotated(&self, position: usize) -> bool {
        self.unannotated_positions.binary_search(&position).is_ok()
    }

    /// Completed share in `0.0..=1.0`; an empty dataset counts as done
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    /// `"<completed> of <total> completed"`
    pub fn summary(&self) -> String {
        format!("{} of {} completed", self.completed, self.total)
    }
}
