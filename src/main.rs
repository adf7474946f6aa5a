use annotator::cli::annotate::SessionOptions;
use annotator::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "annotator")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Confirm or correct category labels in a CSV dataset, one row at a time", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Name of the annotator
    #[arg(required = true)]
    annotator_name: Option<String>,

    /// Path to the input CSV file
    #[arg(required = true)]
    input_file_path: Option<PathBuf>,

    /// Directory for the annotated output file
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show annotation progress without starting a session
    Status {
        /// Name of the annotator
        annotator_name: String,

        /// Path to the input CSV file
        input_file_path: PathBuf,

        /// Directory for the annotated output file
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Status {
            annotator_name,
            input_file_path,
            output_dir,
            json,
        }) => {
            annotator::cli::status::run(&annotator_name, &input_file_path, output_dir, json)?;
        }

        Some(Commands::Completions { shell }) => {
            generate(shell, &mut Cli::command(), "annotator", &mut io::stdout());
        }

        None => {
            let (Some(annotator), Some(input)) = (cli.annotator_name, cli.input_file_path) else {
                anyhow::bail!("an annotator name and an input file path are required");
            };
            annotator::cli::annotate::run(SessionOptions {
                annotator,
                input,
                output_dir: cli.output_dir,
                no_progress: cli.no_progress,
            })?;
        }
    }

    Ok(())
}
