use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bench-report", version, about = "Aggregate extraction benchmark logs into scored reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Aggregate a run directory into detailed_metrics.json and grouped_scores.csv
    Report(ReportArgs),
    /// List values of one expected field for manual review, as CSV
    Pending(PendingArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ReportArgs {
    /// Directory holding the run's logs (searched recursively)
    pub log_dir: PathBuf,
    /// Where to write the reports. Defaults to the log directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Report config JSON (ingest globs, grouping axes, output names)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Concurrent ingestion workers
    #[arg(long, default_value_t = 1)]
    pub jobs: usize,
    /// Skip the console summary and console logging
    #[arg(long)]
    pub quiet: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct PendingArgs {
    /// Directory holding the run's JSON logs
    pub log_dir: PathBuf,
    /// Substring of the log file names to read, e.g. "chat_ja_level1"
    pub pattern: String,
    /// Expected field name, e.g. "title"
    pub field: String,
    /// Include every status, not only pending
    #[arg(long)]
    pub all_items: bool,
    /// Write the CSV here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

impl Command {
    pub fn quiet(&self) -> bool {
        match self {
            Command::Report(args) => args.quiet,
            Command::Pending(_) => false,
        }
    }
}
