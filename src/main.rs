//! cardid - readout card ID tool
//!
//! Parses and validates card slot identifiers from the command line or from ID files.

use clap::{Parser, Subcommand, ValueEnum};
use readout_card_id::{
    batch::{self, FileReport, LineCheck},
    parse_card_id, CardId, Logger, OutputFormat, ReadoutError, Result, VerbosityLevel,
};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "cardid")]
#[command(about = "Readout card ID parser and validator", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    format: FormatArg,

    /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, short = 'v', default_value = "normal", global = true)]
    verbosity: VerbosityLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse card IDs given as arguments (e.g. "#3" or "3")
    Parse {
        /// Card IDs to parse
        #[arg(value_name = "ID", required = true, allow_negative_numbers = true)]
        ids: Vec<String>,
    },

    /// Validate ID files, or directories of .ids files
    Check {
        /// Files or directories to check
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },

    /// List every valid card slot
    Slots,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = Logger::with_verbosity(cli.verbosity);
    logger.set_output_format(cli.format.into());

    match cli.command {
        Commands::Parse { ids } => run_parse(&logger, &ids)?,
        Commands::Check { paths } => run_check(&logger, &paths).await?,
        Commands::Slots => run_slots(&logger)?,
    }

    Ok(())
}

/// Parse each argument, stopping at the first invalid one
fn run_parse(logger: &Logger, ids: &[String]) -> Result<()> {
    for input in ids {
        let id = parse_card_id(input)?;
        logger.record(
            VerbosityLevel::Minimal,
            "card_id",
            &format!("{input} -> {id}"),
            &json!({ "input": input, "card_id": id }),
        )?;
    }
    Ok(())
}

/// JSON payload for one checked line
#[derive(Serialize)]
struct CheckRecord<'a> {
    #[serde(serialize_with = "batch::serialize_path_lossy")]
    path: &'a Path,
    check: &'a LineCheck,
}

async fn run_check(logger: &Logger, paths: &[PathBuf]) -> Result<()> {
    let reports = batch::check_paths(paths).await?;
    logger.verbose(&format!("Checked {} ID file(s)", reports.len()))?;

    if reports.is_empty() {
        logger.minimal("No .ids files found")?;
        return Ok(());
    }

    let mut invalid_lines = 0;
    let mut invalid_files = 0;
    for report in &reports {
        log_report(logger, report)?;
        let failures = report.failures().count();
        if failures > 0 {
            invalid_lines += failures;
            invalid_files += 1;
        }
    }

    if invalid_lines > 0 {
        return Err(ReadoutError::ParseError(format!(
            "{invalid_lines} invalid card ID(s) in {invalid_files} file(s)"
        )));
    }

    logger.normal(&format!("All card IDs valid in {} file(s)", reports.len()))?;
    Ok(())
}

fn log_report(logger: &Logger, report: &FileReport) -> Result<()> {
    let path = report.path.display();
    for check in &report.checks {
        let payload = CheckRecord {
            path: &report.path,
            check,
        };
        match &check.outcome {
            Ok(id) => logger.record(
                VerbosityLevel::Verbose,
                "check_ok",
                &format!("{path}:{}: {} -> {id}", check.line, check.input),
                &payload,
            )?,
            Err(msg) => logger.record(
                VerbosityLevel::Minimal,
                "check_failure",
                &format!("{path}:{}: {msg}", check.line),
                &payload,
            )?,
        }
    }

    logger.normal(&format!(
        "{path}: {} card ID(s), {} invalid",
        report.checks.len(),
        report.failures().count()
    ))
}

fn run_slots(logger: &Logger) -> Result<()> {
    for id in CardId::all() {
        logger.record(
            VerbosityLevel::Minimal,
            "slot",
            &id.to_string(),
            &json!({ "card_id": id }),
        )?;
    }
    Ok(())
}
