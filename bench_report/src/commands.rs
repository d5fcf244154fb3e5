use anyhow::{Context, Result};
use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use evaluator::pending::{PendingItem, PendingQuery, extract_pending_items, to_csv};
use evaluator::report::MetricsReport;
use evaluator::{EvaluationJob, load_report_config};

use crate::cli::{PendingArgs, ReportArgs};

pub struct ReportOutcome {
    pub report: MetricsReport,
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
    pub score_precision: usize,
}

/// Evaluates `args.log_dir` and writes both report files.
pub async fn run_report(args: &ReportArgs) -> Result<ReportOutcome> {
    let config = load_report_config(args.config.as_deref()).context("loading report config")?;
    let score_precision = config.output.score_precision;

    let job = EvaluationJob::new(&args.log_dir, config).with_jobs(args.jobs);
    let report = job
        .evaluate()
        .await
        .with_context(|| format!("evaluating {}", args.log_dir.display()))?;

    let output_dir = args.output_dir.clone().unwrap_or_else(|| args.log_dir.clone());
    let (json_path, csv_path) = job
        .write_reports(&report, &output_dir)
        .with_context(|| format!("writing reports to {}", output_dir.display()))?;

    info!(json = %json_path.display(), csv = %csv_path.display(), "Reports written");
    Ok(ReportOutcome {
        report,
        json_path,
        csv_path,
        score_precision,
    })
}

pub struct PendingOutcome {
    pub items: Vec<PendingItem>,
    pub csv: String,
}

/// Extracts the requested items and writes the CSV to `args.out` when given.
pub fn run_pending(args: &PendingArgs) -> Result<PendingOutcome> {
    let query = PendingQuery {
        pattern: args.pattern.clone(),
        field: args.field.clone(),
        all_items: args.all_items,
    };
    let items = extract_pending_items(&args.log_dir, &query)
        .with_context(|| format!("reading {}", args.log_dir.display()))?;
    let csv = to_csv(&items);

    if let Some(path) = &args.out {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent).with_context(|| format!("creating dir {}", parent.display()))?;
            }
        }
        let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        file.write_all(csv.as_bytes()).context("writing CSV")?;
        info!(path = %path.display(), items = items.len(), "Pending items written");
    }

    Ok(PendingOutcome { items, csv })
}
