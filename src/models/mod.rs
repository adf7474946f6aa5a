pub mod config;
pub mod dataset;
pub mod record;

pub use config::AnnotatorConfig;
pub use dataset::{Column, Dataset, DiscardedAnnotation};
pub use record::{
    Annotation, Decision, Label, ModifiedFlag, Record, RecordFields, CATEGORY_ANNOTATED_COLUMN,
    MODIFIED_FLAG_COLUMN, REQUIRED_COLUMNS,
};
