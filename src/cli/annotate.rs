use crate::controller::AnnotationController;
use crate::models::AnnotatorConfig;
use crate::store::{self, Origin};
use crate::ui::render::{banner, render_record};
use crate::ui::{DecisionSource, SessionProgress, TerminalPrompt};
use crate::Result;
use colored::Colorize;
use std::env;
use std::path::{Path, PathBuf};

/// Options for an interactive session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub annotator: String,
    pub input: PathBuf,
    /// Overrides the configured output directory
    pub output_dir: Option<PathBuf>,
    /// Force the progress bar off regardless of config
    pub no_progress: bool,
}

/// How a session loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Every row was already annotated when the session started
    AlreadyComplete,
    /// The last row was annotated during this session
    Completed,
    /// The annotator quit with rows remaining
    Quit,
}

pub fn run(options: SessionOptions) -> Result<()> {
    let project_root = env::current_dir()?;
    let config = AnnotatorConfig::load(&project_root)?;

    store::validate_annotator(&options.annotator)?;

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir());
    let output = store::output_path(&options.input, &options.annotator, &output_dir);

    let (mut controller, origin) = AnnotationController::open(&options.input, &output)?;

    println!("{}", banner(&options.annotator));
    if origin == Origin::Resumed {
        println!(
            "{}",
            format!(
                "Resuming annotations using existing output file {}.",
                output.display()
            )
            .yellow()
        );
    }

    let progress = SessionProgress::new(
        controller.state(),
        config.show_progress && !options.no_progress,
    );
    let mut prompt = TerminalPrompt::new();

    let end = drive(&mut controller, &mut prompt, &progress, config.wrap_width)?;
    progress.finish();

    match end {
        SessionEnd::AlreadyComplete => {
            println!("{}", "All rows have been annotated.".green());
        }
        SessionEnd::Completed => {
            println!("\n{}", format!("✅ Output written to {}", output.display()).green());
        }
        SessionEnd::Quit => {
            println!(
                "\n{}",
                format!(
                    "⏸  Stopped with {}. Run again with the same annotator to resume.",
                    controller.state().summary()
                )
                .yellow()
            );
            print_output_hint(&output);
        }
    }

    Ok(())
}

/// Present records and apply decisions until the dataset is complete or the
/// source returns no decision.
pub fn drive<S: DecisionSource>(
    controller: &mut AnnotationController,
    source: &mut S,
    progress: &SessionProgress,
    wrap_width: usize,
) -> Result<SessionEnd> {
    if controller.state().is_complete() {
        return Ok(SessionEnd::AlreadyComplete);
    }

    loop {
        let Some(position) = controller.state().current_position else {
            return Ok(SessionEnd::Completed);
        };
        let Some(record) = controller.dataset().get(position) else {
            return Ok(SessionEnd::Completed);
        };

        let state = controller.state();
        let decision = progress.suspend(|| {
            println!("\n{}", render_record(&record.fields, position, state, wrap_width));
            source.next_decision(record, state)
        })?;

        let Some(decision) = decision else {
            return Ok(SessionEnd::Quit);
        };

        let outcome = controller.annotate(position, decision)?;
        progress.update(&outcome.state);
        progress.suspend(|| println!("{}", outcome.message.green()));
    }
}

fn print_output_hint(output: &Path) {
    println!("   Progress saved in {}", output.display().to_string().cyan());
}
