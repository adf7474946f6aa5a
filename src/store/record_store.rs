//! CSV-backed record store
//!
//! Loads datasets from CSV artifacts and writes them back atomically. Every
//! save rewrites the whole file through a temp file in the destination
//! directory, so a reader never sees a partially written artifact.

use crate::error::{AnnotateError, AnnotateResult};
use crate::models::{Dataset, DiscardedAnnotation};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

const UTF8_BOM: char = '\u{feff}';

/// Where a session's dataset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Loaded from the input artifact; no prior output existed
    Fresh,
    /// Loaded from an existing output artifact
    Resumed,
}

/// Load a dataset from a CSV file.
///
/// Half-annotated rows are loaded unannotated with a warning on stderr.
pub fn load(path: &Path) -> AnnotateResult<Dataset> {
    let (dataset, discarded) = load_with_report(path)?;

    for row in &discarded {
        eprintln!(
            "{}",
            format!(
                "⚠ Row {} in {} has an incomplete annotation (category_annotated='{}', modified_flag='{}'); treating it as unannotated.",
                row.position + 1,
                path.display(),
                row.category_annotated,
                row.modified_flag
            )
            .yellow()
        );
    }

    Ok(dataset)
}

/// Load a dataset and return the rows whose annotation cells were discarded
pub fn load_with_report(path: &Path) -> AnnotateResult<(Dataset, Vec<DiscardedAnnotation>)> {
    if !path.is_file() {
        return Err(AnnotateError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let header: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if i == 0 {
                name.trim_start_matches(UTF8_BOM).to_string()
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut dataset =
        Dataset::with_header(header).map_err(|reason| AnnotateError::schema(path, reason))?;

    let mut discarded = Vec::new();
    for row in reader.records() {
        let row = row?;
        if let Some(report) = dataset
            .push_row(row.iter())
            .map_err(|reason| AnnotateError::schema(path, reason))?
        {
            discarded.push(report);
        }
    }

    Ok((dataset, discarded))
}

/// Save a dataset to a CSV file using atomic write
///
/// Writes to a temporary file first, then renames to prevent corruption.
/// Uses tempfile::NamedTempFile::persist for cross-platform atomic replacement.
pub fn save(dataset: &Dataset, path: &Path) -> AnnotateResult<()> {
    use tempfile::NamedTempFile;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    {
        let mut writer = csv::Writer::from_writer(&mut temp_file);
        writer.write_record(dataset.header())?;
        for record in dataset.records() {
            writer.write_record(dataset.row_values(record))?;
        }
        writer.flush()?;
    }
    temp_file.as_file().sync_all()?;

    temp_file
        .persist(path)
        .map_err(|e| AnnotateError::Persist(e.error.to_string()))?;

    Ok(())
}

/// Output artifact path: `<output_dir>/<input stem>_annotated_<annotator>.csv`
pub fn output_path(input: &Path, annotator: &str, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    output_dir.join(format!("{}_annotated_{}.csv", stem, annotator))
}

/// Check that an annotator name can be embedded in a file name
pub fn validate_annotator(annotator: &str) -> AnnotateResult<()> {
    let trimmed = annotator.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || annotator.contains(['/', '\\'])
    {
        return Err(AnnotateError::InvalidAnnotator(annotator.to_string()));
    }
    Ok(())
}

/// Open the dataset for a session.
///
/// The input is always loaded first so a missing file or missing column is
/// reported even when a prior output exists. The output, if present, is then
/// preferred so the session continues earlier progress.
pub fn open_session_dataset(input: &Path, output: &Path) -> AnnotateResult<(Dataset, Origin)> {
    let input_dataset = load(input)?;

    if output.is_file() {
        return Ok((load(output)?, Origin::Resumed));
    }

    Ok((input_dataset, Origin::Fresh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Annotation, Decision, Label, ModifiedFlag};
    use tempfile::TempDir;

    const INPUT: &str = "title,context,question,extracted_answer,category\n\
        Eiffel,\"Paris, France\",Where?,Paris,place\n\
        Moon landing,In 1969,When?,1969,time\n";

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load(&temp_dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, AnnotateError::MissingFile { .. }));
    }

    #[test]
    fn test_load_directory_is_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, AnnotateError::MissingFile { .. }));
    }

    #[test]
    fn test_load_missing_column_is_schema_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(
            temp_dir.path(),
            "in.csv",
            "title,context,question,category\nT,C,Q,place\n",
        );

        match load(&path).unwrap_err() {
            AnnotateError::Schema { reason, .. } => {
                assert_eq!(reason, "Column 'extracted_answer' is missing in the input CSV.")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_ragged_row_is_schema_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(
            temp_dir.path(),
            "in.csv",
            "title,context,question,extracted_answer,category\nT,C,Q,A\n",
        );

        let err = load(&path).unwrap_err();
        assert!(matches!(err, AnnotateError::Schema { .. }));
    }

    #[test]
    fn test_load_input_adds_annotation_columns() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(temp_dir.path(), "in.csv", INPUT);

        let dataset = load(&path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(0).unwrap().fields.context, "Paris, France");
        assert_eq!(dataset.header().len(), 7);
        assert!(dataset.records().iter().all(|r| !r.is_annotated()));
    }

    #[test]
    fn test_load_strips_byte_order_mark() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(temp_dir.path(), "in.csv", &format!("{}{}", UTF8_BOM, INPUT));

        let dataset = load(&path).unwrap();
        assert_eq!(dataset.header()[0], "title");
    }

    #[test]
    fn test_save_writes_annotation_columns_when_unset() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "in.csv", INPUT);
        let output = temp_dir.path().join("out.csv");

        save(&load(&input).unwrap(), &output).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let first_line = content.lines().next().unwrap();
        assert_eq!(
            first_line,
            "title,context,question,extracted_answer,category,category_annotated,modified_flag"
        );
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(
            temp_dir.path(),
            "in.csv",
            "id,title,context,question,extracted_answer,category,notes\n\
             1,Eiffel,\"Line one\nline two\",Where?,Paris,place,\"has \"\"quotes\"\"\"\n\
             2,Moon,In 1969,When?,1969,time,\n\
             3,Everest,8849 m,How high?,8849,quantity,x\n",
        );
        let output = temp_dir.path().join("out.csv");

        let mut dataset = load(&input).unwrap();
        dataset.get_mut(1).unwrap().annotation = Some(Annotation::from_decision(
            Decision::Relabel(Label::General),
            "time",
        ));
        save(&dataset, &output).unwrap();

        let reloaded = load(&output).unwrap();
        assert_eq!(reloaded, dataset);
        assert_eq!(
            reloaded.get(1).unwrap().annotation.as_ref().unwrap().flag,
            ModifiedFlag::Changed
        );
        assert_eq!(reloaded.get(0).unwrap().fields.context, "Line one\nline two");
        assert_eq!(reloaded.get(0).unwrap().extra[1], "has \"quotes\"");
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "in.csv", INPUT);
        let output = write(temp_dir.path(), "out.csv", "stale content that is longer than the new file will be, by a wide margin, to catch truncation problems\n");

        let dataset = load(&input).unwrap();
        save(&dataset, &output).unwrap();
        save(&dataset, &output).unwrap();

        assert_eq!(load(&output).unwrap(), dataset);
        let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("nested/dir/out.csv");

        save(&Dataset::new(), &output).unwrap();
        assert!(output.exists());
        assert!(load(&output).unwrap().is_empty());
    }

    #[test]
    fn test_load_reports_half_annotated_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(
            temp_dir.path(),
            "out.csv",
            "title,context,question,extracted_answer,category,category_annotated,modified_flag\n\
             T,C,Q,A,place,place,No Change\n\
             T,C,Q,A,time,,Changed\n",
        );

        let (dataset, discarded) = load_with_report(&path).unwrap();
        assert!(dataset.get(0).unwrap().is_annotated());
        assert!(!dataset.get(1).unwrap().is_annotated());
        assert_eq!(discarded.len(), 1);
        assert_eq!(discarded[0].position, 1);
    }

    #[test]
    fn test_output_path() {
        let path = output_path(Path::new("data/questions.csv"), "alice", Path::new("."));
        assert_eq!(path, PathBuf::from("./questions_annotated_alice.csv"));

        let path = output_path(Path::new("/tmp/q.v2.csv"), "bob", Path::new("out"));
        assert_eq!(path, PathBuf::from("out/q.v2_annotated_bob.csv"));
    }

    #[test]
    fn test_validate_annotator() {
        assert!(validate_annotator("alice").is_ok());
        assert!(validate_annotator("Jane Doe").is_ok());
        assert!(validate_annotator("").is_err());
        assert!(validate_annotator("  ").is_err());
        assert!(validate_annotator("..").is_err());
        assert!(validate_annotator("a/b").is_err());
        assert!(validate_annotator("a\\b").is_err());
    }

    #[test]
    fn test_open_session_prefers_existing_output() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "in.csv", INPUT);
        let output = temp_dir.path().join("in_annotated_alice.csv");

        let (dataset, origin) = open_session_dataset(&input, &output).unwrap();
        assert_eq!(origin, Origin::Fresh);

        let mut progressed = dataset.clone();
        progressed.get_mut(0).unwrap().annotation =
            Some(Annotation::from_decision(Decision::Confirm, "place"));
        save(&progressed, &output).unwrap();

        let (resumed, origin) = open_session_dataset(&input, &output).unwrap();
        assert_eq!(origin, Origin::Resumed);
        assert_eq!(resumed, progressed);
    }

    #[test]
    fn test_open_session_requires_input_even_with_output() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.csv");
        let output = write(temp_dir.path(), "in_annotated_alice.csv", INPUT);

        let err = open_session_dataset(&input, &output).unwrap_err();
        assert!(matches!(err, AnnotateError::MissingFile { .. }));
    }
}
