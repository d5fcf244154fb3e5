//! Ingestion of log files into a mergeable [`Evaluation`].
//!
//! An [`Evaluation`] is the partial result of ingesting some set of files: the grouped
//! aggregator plus the run summary. Files that fail to load or decode are recorded as skipped
//! and logged; they never abort the batch.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use util::paths::DiscoveredLogs;
use util::report_config::{GroupingAxis, ReportConfig};

use crate::aggregator::Aggregator;
use crate::error::EvaluatorError;
use crate::parsers::file_name_parser::identify;
use crate::parsers::json_log_parser::JsonLogParser;
use crate::parsers::legacy_log_parser::LegacyLogParser;
use crate::summary::RunSummary;
use crate::traits::parser::Parser;
use crate::types::TestCaseRecord;
use crate::utilities::file_loader::{load_json, load_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One structured JSON document per file.
    Json,
    /// Console log with marker-delimited JSON blocks.
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub format: LogFormat,
}

impl LogFile {
    /// Flattens discovery output into one list, legacy logs first.
    pub fn from_discovered(found: &DiscoveredLogs) -> Vec<LogFile> {
        let legacy = found.legacy.iter().map(|p| LogFile {
            path: p.clone(),
            format: LogFormat::Legacy,
        });
        let json = found.json.iter().map(|p| LogFile {
            path: p.clone(),
            format: LogFormat::Json,
        });
        legacy.chain(json).collect()
    }
}

/// Records read from one log file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLog {
    pub records: Vec<TestCaseRecord>,
    /// Set for legacy logs whose output reports a timeout.
    pub timed_out: bool,
}

/// Reads every record in `file`, with identity gaps filled from the file name.
pub fn read_records(file: &LogFile, config: &ReportConfig) -> Result<ParsedLog, EvaluatorError> {
    let max_size = config.ingest.max_file_size;
    let (mut records, timed_out) = match file.format {
        LogFormat::Json => {
            let raw = load_json(&file.path, max_size)?;
            (vec![JsonLogParser.parse(&raw, config)?], false)
        }
        LogFormat::Legacy => {
            let text = load_text(&file.path, max_size)?;
            let log = LegacyLogParser.parse(&text, config)?;
            (log.records, log.timed_out)
        }
    };

    let identity = file
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .map(identify)
        .unwrap_or_default();
    for record in &mut records {
        identity.apply(record);
    }
    Ok(ParsedLog { records, timed_out })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub aggregator: Aggregator,
    pub summary: RunSummary,
}

impl Evaluation {
    pub fn new(axes: &[GroupingAxis]) -> Self {
        Self {
            aggregator: Aggregator::new(axes),
            summary: RunSummary::default(),
        }
    }

    /// Ingests `files` in order into a fresh evaluation.
    pub fn from_files(files: &[LogFile], config: &ReportConfig) -> Self {
        let mut evaluation = Evaluation::new(&config.grouping.axes);
        for file in files {
            evaluation.ingest_file(file, config);
        }
        evaluation
    }

    pub fn fold_record(&mut self, record: &TestCaseRecord) {
        self.aggregator.fold(record);
        self.summary.record_test_case(record.is_failed());
    }

    /// Ingests one file. Failures are recorded as skips, never returned.
    pub fn ingest_file(&mut self, file: &LogFile, config: &ReportConfig) {
        self.summary.files_discovered += 1;
        let shown = display_path(&file.path);

        match read_records(file, config) {
            Ok(parsed) => {
                debug!(path = %shown, records = parsed.records.len(), "Parsed log file");
                self.summary.files_parsed += 1;
                if parsed.timed_out {
                    warn!(path = %shown, "Log reports a timeout");
                    self.summary.record_timeout(shown);
                }
                for record in &parsed.records {
                    self.fold_record(record);
                }
            }
            Err(e) => {
                warn!(path = %shown, reason = %e, "Skipping log file");
                self.summary.record_skip(shown, e.to_string());
            }
        }
    }

    pub fn merge(&mut self, other: &Evaluation) {
        self.aggregator.merge(&other.aggregator);
        self.summary.merge(&other.summary);
    }
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
