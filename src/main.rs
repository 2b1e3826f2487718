use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use docx_pages::EngineOptions;

#[derive(Parser)]
#[command(name = "docx-pages", version, about = "Split DOCX files into HTML pages and estimate page counts")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Label used in table summaries
    #[arg(long, global = true)]
    table_label: Option<String>,

    /// Text emitted for paragraphs that only contain images or objects
    #[arg(long, global = true)]
    non_text_placeholder: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split a DOCX file into one HTML fragment per page
    Split {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Write page-001.html, page-002.html, ... into this directory instead of stdout
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Estimate the page count of a DOCX file
    Count {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the full result, including signals, as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();

    let mut options = EngineOptions::default();
    if let Some(label) = cli.table_label {
        options = options.with_table_label(label);
    }
    if let Some(placeholder) = cli.non_text_placeholder {
        options = options.with_non_text_placeholder(placeholder);
    }

    match run(cli.command, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, options: &EngineOptions) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Split { input, output } => {
            let pages = docx_pages::split_file_into_pages(&input, options)?;
            match output {
                Some(dir) => {
                    std::fs::create_dir_all(&dir)?;
                    for (i, page) in pages.iter().enumerate() {
                        let path = dir.join(format!("page-{:03}.html", i + 1));
                        std::fs::write(&path, page)?;
                    }
                    println!("Wrote {} pages to {}", pages.len(), dir.display());
                }
                None => {
                    for (i, page) in pages.iter().enumerate() {
                        println!("<!-- page {} -->", i + 1);
                        println!("{page}");
                    }
                }
            }
        }
        Command::Count { input, json } => {
            let result = docx_pages::estimate_file_page_count(&input, options)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{} ({})", result.page_count, result.method_used);
            }
        }
    }
    Ok(())
}
