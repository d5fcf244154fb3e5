//! # Evaluator Library
//!
//! This crate turns the structured logs of an AI field-extraction benchmark into grouped
//! quality metrics.
//!
//! ## Key Concepts
//! - **EvaluationJob**: Discovers the logs of one run directory and produces a [`MetricsReport`].
//! - **Parsers**: Structured JSON logs, legacy text logs, and identity hints in file names.
//! - **Reconciler**: Repairs each test case's field verdicts into a consistent count tuple.
//! - **Aggregator**: Folds reconciled counts into per-group accumulators for every grouping axis.
//! - **Scorer**: `(correct - wrong - unexpected) / max(expected, 1)` plus status rates.
//! - **Reports**: `detailed_metrics.json`, `grouped_scores.csv`, and pending-item CSV.

pub mod aggregator;
pub mod analysis;
pub mod error;
pub mod evaluation;
pub mod groupings;
pub mod parsers;
pub mod pending;
pub mod reconcile;
pub mod report;
pub mod scorer;
pub mod summary;
pub mod timing;
pub mod traits;
pub mod types;
pub mod utilities;

use std::path::{Path, PathBuf};

use tokio::task::JoinSet;
use tracing::{debug, info};
use util::paths::discover_logs;
use util::report_config::ReportConfig;

use crate::error::EvaluatorError;
use crate::evaluation::{Evaluation, LogFile};
use crate::report::MetricsReport;

/// Loads a report config from `path`, or the defaults when no path is given.
pub fn load_report_config(path: Option<&Path>) -> Result<ReportConfig, EvaluatorError> {
    match path {
        Some(p) => ReportConfig::load(p).map_err(EvaluatorError::InvalidConfig),
        None => Ok(ReportConfig::default_config()),
    }
}

/// A report run over one log directory.
///
/// # Fields
/// - `log_dir`: Directory holding the run's logs (searched recursively).
/// - `config`: Ingest globs, grouping axes and output options.
/// - `jobs`: Number of concurrent ingestion workers; `1` ingests on the caller's thread.
pub struct EvaluationJob {
    log_dir: PathBuf,
    config: ReportConfig,
    jobs: usize,
}

impl EvaluationJob {
    pub fn new(log_dir: impl Into<PathBuf>, config: ReportConfig) -> Self {
        Self {
            log_dir: log_dir.into(),
            config,
            jobs: 1,
        }
    }

    /// Sets the number of ingestion workers. Values below 1 are treated as 1.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Lists the log files to ingest, legacy logs first, each list sorted.
    ///
    /// # Errors
    /// * [`EvaluatorError::LogDirMissing`] if the directory does not exist.
    /// * [`EvaluatorError::InvalidConfig`] if an ingest glob is invalid.
    /// * [`EvaluatorError::NoLogFiles`] if nothing matches.
    pub fn discover(&self) -> Result<Vec<LogFile>, EvaluatorError> {
        if !self.log_dir.is_dir() {
            return Err(EvaluatorError::LogDirMissing(self.log_dir.display().to_string()));
        }
        let mut found = discover_logs(&self.log_dir, &self.config.ingest)
            .map_err(EvaluatorError::InvalidConfig)?;
        // a previous run's report must never be read back as a log
        let metrics_file = self.config.output.metrics_file.as_str();
        found
            .json
            .retain(|p| p.file_name().and_then(|n| n.to_str()) != Some(metrics_file));
        if found.is_empty() {
            return Err(EvaluatorError::NoLogFiles(self.log_dir.display().to_string()));
        }
        debug!(json = found.json.len(), legacy = found.legacy.len(), "Discovered log files");
        Ok(LogFile::from_discovered(&found))
    }

    /// Ingests every discovered file on the current thread.
    pub fn run(&self) -> Result<MetricsReport, EvaluatorError> {
        let files = self.discover()?;
        let evaluation = Evaluation::from_files(&files, &self.config);
        Ok(self.finish(evaluation))
    }

    /// Splits the discovered files into `jobs` chunks, ingests each chunk on the
    /// blocking pool, and merges the partial evaluations in chunk order.
    pub async fn run_concurrent(&self) -> Result<MetricsReport, EvaluatorError> {
        let files = self.discover()?;
        let chunk_size = files.len().div_ceil(self.jobs).max(1);

        let mut set = JoinSet::new();
        for (index, chunk) in files.chunks(chunk_size).enumerate() {
            let chunk = chunk.to_vec();
            let config = self.config.clone();
            set.spawn_blocking(move || (index, Evaluation::from_files(&chunk, &config)));
        }

        let mut partials = Vec::with_capacity(set.len());
        while let Some(joined) = set.join_next().await {
            partials.push(joined.map_err(|e| EvaluatorError::TaskFailed(e.to_string()))?);
        }
        partials.sort_by_key(|(index, _)| *index);

        let mut evaluation = Evaluation::new(&self.config.grouping.axes);
        for (_, partial) in &partials {
            evaluation.merge(partial);
        }
        Ok(self.finish(evaluation))
    }

    /// Runs concurrently when more than one job is configured.
    pub async fn evaluate(&self) -> Result<MetricsReport, EvaluatorError> {
        if self.jobs > 1 {
            self.run_concurrent().await
        } else {
            self.run()
        }
    }

    /// Writes the JSON and CSV reports into `output_dir`, returning their paths.
    pub fn write_reports(
        &self,
        report: &MetricsReport,
        output_dir: &Path,
    ) -> Result<(PathBuf, PathBuf), EvaluatorError> {
        let output = &self.config.output;
        let json_path = output_dir.join(&output.metrics_file);
        let csv_path = output_dir.join(&output.scores_csv);
        report.write_json(&json_path)?;
        report.write_csv(&csv_path, output.score_precision)?;
        Ok((json_path, csv_path))
    }

    fn finish(&self, mut evaluation: Evaluation) -> MetricsReport {
        evaluation.summary.files_skipped.sort();
        evaluation.summary.timed_out.sort();
        info!(
            files = evaluation.summary.files_discovered,
            parsed = evaluation.summary.files_parsed,
            skipped = evaluation.summary.files_skipped.len(),
            test_cases = evaluation.summary.test_cases,
            "Evaluation complete"
        );
        MetricsReport::build(&evaluation, &self.log_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use util::report_config::GroupingAxis;
    use util::test_helpers::{setup_log_dir, structured_log_json, write_file};

    fn populate(dir: &Path) {
        let cases = [
            ("generable", "ja", "chat", 1, vec![("title", "correct"), ("userID", "correct")], vec![]),
            ("generable", "ja", "chat", 2, vec![("title", "correct"), ("userID", "wrong"), ("password", "missing")], vec!["note"]),
            ("json", "en", "contract", 1, vec![("title", "correct"), ("url", "pending")], vec![]),
            ("json", "en", "contract", 3, vec![], vec!["host"]),
        ];
        for (i, (method, lang, pattern, level, fields, unexpected)) in cases.iter().enumerate() {
            write_file(
                dir,
                &format!("run{}/{method}_{lang}_{pattern}_level{level}_{i}.json", i % 2),
                &structured_log_json(method, lang, pattern, *level, fields, unexpected),
            );
        }
        write_file(dir, "run0/broken_ja_chat_level1_9.json", "{ \"pattern\": ");
    }

    #[test]
    fn test_missing_dir_is_fatal() {
        let dir = setup_log_dir();
        let job = EvaluationJob::new(dir.path().join("absent"), ReportConfig::default());
        assert!(matches!(job.run(), Err(EvaluatorError::LogDirMissing(_))));
    }

    #[test]
    fn test_empty_dir_is_fatal() {
        let dir = setup_log_dir();
        write_file(dir.path(), "notes.txt", "nothing here");
        let job = EvaluationJob::new(dir.path(), ReportConfig::default());
        assert!(matches!(job.run(), Err(EvaluatorError::NoLogFiles(_))));
    }

    #[test]
    fn test_invalid_config_path() {
        let dir = setup_log_dir();
        let err = load_report_config(Some(&dir.path().join("missing.json"))).unwrap_err();
        assert!(matches!(err, EvaluatorError::InvalidConfig(_)));
        assert!(load_report_config(None).is_ok());
    }

    #[test]
    fn test_sequential_run() {
        let dir = setup_log_dir();
        populate(dir.path());

        let report = EvaluationJob::new(dir.path(), ReportConfig::default()).run().unwrap();

        assert_eq!(report.summary.files_discovered, 5);
        assert_eq!(report.summary.files_parsed, 4);
        assert_eq!(report.summary.files_skipped.len(), 1);
        assert_eq!(report.summary.test_cases, 4);

        let by_method = &report.groups["by_method"];
        let generable = &by_method["generable"];
        assert_eq!(generable.expected_items, 5);
        assert_eq!(generable.correct_items, 3);
        assert_eq!(generable.wrong_items, 1);
        assert_eq!(generable.missing_items, 1);
        assert_eq!(generable.unexpected_items, 1);
        assert!((generable.normalized_score - 0.2).abs() < 1e-9);

        let json = &by_method["json"];
        assert_eq!(json.pending_items, 1);
        assert_eq!(json.missing_items, 1);
        assert_eq!(json.unexpected_items, 1);
        assert!((json.normalized_score - 0.0).abs() < 1e-9);

        assert_eq!(report.groups["by_level"].keys().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert!(report.groups["by_pattern_level"].contains_key("contract_level3"));
        assert!(report.groups["by_experiment"].contains_key("generable_ja"));

        let by_field = &report.groups["by_field"];
        let title = &by_field["title"];
        assert_eq!((title.tests, title.expected_items, title.correct_items), (3, 3, 3));
        let url = &by_field["url"];
        assert_eq!((url.missing_items, url.pending_items), (1, 1));
        assert_eq!(url.rates.missing_rate, 0.0);
        assert_eq!(url.rates.pending_rate, 1.0);
        assert_eq!(by_field["host"].unexpected_items, 1);
        assert_eq!(by_field["host"].expected_items, 0);
        assert_eq!(report.timing.total_extraction_count, 7 + 2);
    }

    #[tokio::test]
    async fn test_concurrent_run_matches_sequential() {
        let dir = setup_log_dir();
        populate(dir.path());

        let sequential = EvaluationJob::new(dir.path(), ReportConfig::default()).run().unwrap();
        for jobs in [2, 3, 8] {
            let concurrent = EvaluationJob::new(dir.path(), ReportConfig::default())
                .with_jobs(jobs)
                .evaluate()
                .await
                .unwrap();
            assert_eq!(concurrent.summary, sequential.summary);
            assert_eq!(concurrent.groups, sequential.groups);
            assert_eq!(concurrent.overall, sequential.overall);
            assert_eq!(concurrent.analysis, sequential.analysis);
        }
    }

    #[tokio::test]
    async fn test_concurrent_timing_matches_sequential() {
        let dir = setup_log_dir();
        let times = [0.1, 0.2, 0.3, 0.7, 1.1, 0.013, 2.9, 0.31];
        for (i, t) in times.iter().enumerate() {
            write_file(
                dir.path(),
                &format!("json_en_chat_level1_{i}.json"),
                &format!(
                    r#"{{"pattern": "chat", "expected_fields": [{{"name": "title", "status": "correct"}}], "extraction_time": {t}}}"#
                ),
            );
        }

        let sequential = EvaluationJob::new(dir.path(), ReportConfig::default()).run().unwrap();
        assert_eq!(sequential.timing.overall.total, 5.623);

        for _ in 0..20 {
            let concurrent = EvaluationJob::new(dir.path(), ReportConfig::default())
                .with_jobs(8)
                .evaluate()
                .await
                .unwrap();
            assert_eq!(concurrent.timing, sequential.timing);
            assert_eq!(concurrent.overall, sequential.overall);
            assert_eq!(concurrent.groups, sequential.groups);
        }
    }

    #[test]
    fn test_configured_axes_limit_output() {
        let dir = setup_log_dir();
        populate(dir.path());
        let mut config = ReportConfig::default();
        config.grouping.axes = vec![GroupingAxis::Language];

        let report = EvaluationJob::new(dir.path(), config).run().unwrap();
        assert_eq!(report.groups.keys().collect::<Vec<_>>(), vec!["by_language"]);
        assert_eq!(report.axis_order, vec!["by_language".to_string()]);
    }

    #[test]
    fn test_write_reports_uses_configured_names() {
        let dir = setup_log_dir();
        populate(dir.path());
        let mut config = ReportConfig::default();
        config.output.scores_csv = "scores.csv".into();

        let job = EvaluationJob::new(dir.path(), config);
        let report = job.run().unwrap();
        let out = dir.path().join("reports");
        let (json_path, csv_path) = job.write_reports(&report, &out).unwrap();

        assert_eq!(json_path, out.join("detailed_metrics.json"));
        assert_eq!(csv_path, out.join("scores.csv"));
        assert!(json_path.is_file());
        assert!(csv_path.is_file());
    }
}
