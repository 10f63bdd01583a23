// pprcost CLI - headless campaign cost runs

mod campaign;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;

#[derive(Parser)]
#[command(name = "pprcost")]
#[command(about = "PPR vaccination campaign cost calculator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario against a data source
    #[command(after_help = "\
Examples:
  pprcost run herds.xlsx
  pprcost run herds.xlsx --scenario aggressive.toml --json
  pprcost run herds.csv --output result.json
  pprcost run workbook.xlsx --sheet 'VADEMOS 2026'")]
    Run {
        /// Path to the XLSX or CSV data source
        data: PathBuf,

        /// Scenario TOML file (omit for reference defaults)
        #[arg(long)]
        scenario: Option<PathBuf>,

        /// Sheet name for multi-sheet workbooks (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Output JSON to stdout instead of human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a scenario config without running
    #[command(after_help = "\
Examples:
  pprcost validate aggressive.toml

Exit codes:
  0  Scenario is valid
  4  Parse or validation error")]
    Validate {
        /// Path to the scenario TOML file
        scenario: PathBuf,
    },

    /// Normalize a data source and print the audit report
    #[command(after_help = "\
Examples:
  pprcost normalize herds.xlsx
  pprcost normalize herds.csv --json | jq .report")]
    Normalize {
        /// Path to the XLSX or CSV data source
        data: PathBuf,

        /// Sheet name for multi-sheet workbooks (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Output normalized records and report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            data,
            scenario,
            sheet,
            json,
            output,
        } => campaign::cmd_run(data, scenario, sheet, json, output),
        Commands::Validate { scenario } => campaign::cmd_validate(scenario),
        Commands::Normalize { data, sheet, json } => campaign::cmd_normalize(data, sheet, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError {
            code,
            message,
            hint,
        }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}
