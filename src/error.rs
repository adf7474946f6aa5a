//! Error taxonomy for loading, annotating and persisting datasets

use std::path::PathBuf;

/// Result type for dataset and session operations
pub type AnnotateResult<T> = Result<T, AnnotateError>;

/// Errors that can occur while running an annotation session
#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    #[error("Input file {} does not exist.", path.display())]
    MissingFile { path: PathBuf },

    #[error("Schema error in {}: {reason}", path.display())]
    Schema { path: PathBuf, reason: String },

    #[error("Position {position} is not an unannotated row")]
    InvalidPosition { position: usize },

    #[error("Invalid annotator name '{0}': must be non-empty and contain no path separators")]
    InvalidAnnotator(String),

    #[error("Failed to read or write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to persist temp file: {0}")]
    Persist(String),

    #[error("Failed to parse config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl AnnotateError {
    pub(crate) fn schema(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_message() {
        let err = AnnotateError::MissingFile {
            path: PathBuf::from("data/questions.csv"),
        };
        assert_eq!(err.to_string(), "Input file data/questions.csv does not exist.");
    }

    #[test]
    fn test_schema_message_names_column() {
        let err = AnnotateError::schema("q.csv", "Column 'category' is missing");
        assert!(err.to_string().contains("q.csv"));
        assert!(err.to_string().contains("'category'"));
    }
}
