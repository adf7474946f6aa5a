//! Record store: CSV artifacts in and out

mod record_store;

pub use record_store::{
    load, load_with_report, open_session_dataset, output_path, save, validate_annotator, Origin,
};
