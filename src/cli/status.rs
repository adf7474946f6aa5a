use crate::models::AnnotatorConfig;
use crate::state::{SessionPhase, SessionState};
use crate::store::{self, Origin};
use crate::Result;
use colored::Colorize;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

/// Machine-readable progress report for `status --json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub annotator: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub resumed: bool,
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    pub phase: SessionPhase,
    pub current_position: Option<usize>,
}

impl StatusReport {
    pub fn collect(annotator: &str, input: &Path, output_dir: &Path) -> Result<Self> {
        store::validate_annotator(annotator)?;
        let output = store::output_path(input, annotator, output_dir);
        let (dataset, origin) = store::open_session_dataset(input, &output)?;
        let state = SessionState::derive(&dataset);

        Ok(Self {
            annotator: annotator.to_string(),
            input: input.to_path_buf(),
            output,
            resumed: origin == Origin::Resumed,
            total: state.total,
            completed: state.completed,
            remaining: state.remaining(),
            phase: state.phase,
            current_position: state.current_position,
        })
    }
}

pub fn run(annotator: &str, input: &Path, output_dir: Option<PathBuf>, json: bool) -> Result<()> {
    let project_root = env::current_dir()?;
    let config = AnnotatorConfig::load(&project_root)?;
    let output_dir = output_dir.unwrap_or_else(|| config.output_dir());

    let report = StatusReport::collect(annotator, input, &output_dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("Status for: {} ({})", report.input.display(), report.annotator)
            .cyan()
            .bold()
    );
    println!();

    let (phase_icon, phase) = match report.phase {
        SessionPhase::InProgress => ("📝", "InProgress".yellow()),
        SessionPhase::Complete => ("✅", "Complete".green()),
    };
    println!("   Phase:     {} {}", phase_icon, phase);
    println!(
        "   Progress:  {} of {} completed ({} remaining)",
        report.completed, report.total, report.remaining
    );
    if let Some(position) = report.current_position {
        println!("   Next row:  {}", position + 1);
    }
    let output_note = if report.resumed { "" } else { " (not created yet)" };
    println!("   Output:    {}{}", report.output.display(), output_note);

    Ok(())
}
