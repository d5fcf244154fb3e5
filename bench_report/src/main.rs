use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};

use bench_report::cli::{Cli, Command};
use bench_report::commands::{run_pending, run_report};
use bench_report::console::render_summary;
use common::config::AppConfig;
use common::logger::init_logger;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.command.quiet() {
        AppConfig::set_log_to_stdout(false);
    }
    let config = AppConfig::global().clone();
    let _log_guard = init_logger(&config);

    match &cli.command {
        Command::Report(args) => {
            let outcome = run_report(args).await?;
            if !args.quiet {
                print!("{}", render_summary(&outcome.report, outcome.score_precision));
                println!("Saved {}", outcome.json_path.display());
                println!("Saved {}", outcome.csv_path.display());
            }
        }
        Command::Pending(args) => {
            let outcome = run_pending(args)?;
            if args.out.is_none() {
                let mut stdout = io::stdout().lock();
                stdout.write_all(outcome.csv.as_bytes())?;
                stdout.flush()?;
            }
            eprintln!("{} item(s) found", outcome.items.len());
        }
    }

    Ok(())
}
