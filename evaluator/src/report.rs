//! # Metrics Report Module
//!
//! This module defines the serializable output of a report run and the writers for its two file
//! formats.
//!
//! ## Overview
//!
//! - [`MetricsReport`]: Everything a run produced. Written as `detailed_metrics.json`.
//! - [`GroupReport`]: One group's counters, normalized score, status rates and timing.
//! - [`MetricsReport::to_csv`]: The flat `grouped_scores.csv` table, one row per group.
//!
//! ## JSON Output Example
//!
//! ```json
//! {
//!   "generated_at": "2025-10-17T18:00:00Z",
//!   "log_dir": "test_logs/202510171800_multi_experiments",
//!   "summary": { "files_discovered": 120, "files_parsed": 119, "files_skipped": [ ... ], ... },
//!   "timing": { "test_case_count": 119, "total_extraction_count": 512, "overall": { ... } },
//!   "overall": { "expected_items": 480, "correct_items": 401, ..., "normalized_score": 0.74 },
//!   "by_method": { "generable": { ... }, "json": { ... } },
//!   "by_language": { ... },
//!   "analysis": { "overall": { ... }, "axes": { "by_method": { "best": ..., "worst": ..., "gap": 0.12 } } }
//! }
//! ```
//!
//! Every axis map, and every group map inside it, is emitted in sorted key order.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use util::paths::ensure_parent_dir;

use crate::aggregator::GroupAccumulator;
use crate::analysis::{PerformanceAnalysis, analyze};
use crate::error::EvaluatorError;
use crate::evaluation::Evaluation;
use crate::scorer::{StatusRates, normalized_score};
use crate::summary::RunSummary;
use crate::timing::TimingStats;
use crate::utilities::csv;

/// Extraction-time statistics as written to the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TimingReport {
    pub count: u64,
    pub total: f64,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl From<&TimingStats> for TimingReport {
    fn from(t: &TimingStats) -> Self {
        TimingReport {
            count: t.count,
            total: t.total(),
            min: t.min,
            max: t.max,
            avg: t.avg(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub expected_items: u64,
    pub correct_items: u64,
    pub wrong_items: u64,
    pub missing_items: u64,
    pub unexpected_items: u64,
    pub pending_items: u64,
    pub tests: u64,
    pub normalized_score: f64,
    pub rates: StatusRates,
    pub timing: TimingReport,
}

impl From<&GroupAccumulator> for GroupReport {
    fn from(acc: &GroupAccumulator) -> Self {
        GroupReport {
            expected_items: acc.expected_items,
            correct_items: acc.correct_items,
            wrong_items: acc.wrong_items,
            missing_items: acc.missing_items,
            unexpected_items: acc.unexpected_items,
            pending_items: acc.pending_items,
            tests: acc.tests,
            normalized_score: normalized_score(acc),
            rates: StatusRates::from_accumulator(acc),
            timing: TimingReport::from(&acc.timing),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingOverview {
    pub test_case_count: u64,
    /// Expected plus unexpected fields across all test cases.
    pub total_extraction_count: u64,
    pub overall: TimingReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub generated_at: DateTime<Utc>,
    pub log_dir: String,
    pub summary: RunSummary,
    pub timing: TimingOverview,
    pub overall: GroupReport,
    /// Axis report name -> group key -> group report.
    #[serde(flatten)]
    pub groups: BTreeMap<String, BTreeMap<String, GroupReport>>,
    pub analysis: PerformanceAnalysis,
    /// Axis names in configured order, for the CSV table.
    #[serde(skip)]
    pub axis_order: Vec<String>,
}

pub const CSV_HEADER: [&str; 11] = [
    "axis",
    "group",
    "tests",
    "expected_items",
    "correct_items",
    "wrong_items",
    "missing_items",
    "unexpected_items",
    "pending_items",
    "normalized_score",
    "avg_extraction_time",
];

fn csv_row(axis: &str, key: &str, g: &GroupReport, precision: usize) -> String {
    csv::row([
        axis.to_string(),
        key.to_string(),
        g.tests.to_string(),
        g.expected_items.to_string(),
        g.correct_items.to_string(),
        g.wrong_items.to_string(),
        g.missing_items.to_string(),
        g.unexpected_items.to_string(),
        g.pending_items.to_string(),
        format!("{:.precision$}", g.normalized_score),
        format!("{:.precision$}", g.timing.avg),
    ])
}

impl MetricsReport {
    pub fn build(evaluation: &Evaluation, log_dir: &Path) -> Self {
        let aggregator = &evaluation.aggregator;
        let overall = aggregator.overall();

        let mut groups = BTreeMap::new();
        let mut axis_order = Vec::with_capacity(aggregator.axes().len());
        for axis in aggregator.axes() {
            let name = axis.report_name().to_string();
            let reports: BTreeMap<String, GroupReport> = aggregator
                .groups(*axis)
                .map(|map| map.iter().map(|(k, acc)| (k.clone(), GroupReport::from(acc))).collect())
                .unwrap_or_default();
            groups.insert(name.clone(), reports);
            axis_order.push(name);
        }

        MetricsReport {
            generated_at: Utc::now(),
            log_dir: log_dir.to_string_lossy().into_owned(),
            summary: evaluation.summary.clone(),
            timing: TimingOverview {
                test_case_count: overall.tests,
                total_extraction_count: overall.expected_items + overall.unexpected_items,
                overall: TimingReport::from(&overall.timing),
            },
            overall: GroupReport::from(overall),
            groups,
            analysis: analyze(aggregator),
            axis_order,
        }
    }

    /// Renders the score table: one `overall` row, then every group of every
    /// axis in configured axis order and sorted key order.
    pub fn to_csv(&self, precision: usize) -> String {
        let mut out = csv::row(CSV_HEADER);
        out.push_str(&csv_row("overall", "all", &self.overall, precision));
        for axis in &self.axis_order {
            let Some(groups) = self.groups.get(axis) else {
                continue;
            };
            for (key, group) in groups {
                out.push_str(&csv_row(axis, key, group, precision));
            }
        }
        out
    }

    pub fn write_json(&self, path: &Path) -> Result<(), EvaluatorError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| EvaluatorError::InvalidJson(format!("Failed to serialize report: {e}")))?;
        write_output(path, &json)
    }

    pub fn write_csv(&self, path: &Path, precision: usize) -> Result<(), EvaluatorError> {
        write_output(path, &self.to_csv(precision))
    }
}

pub(crate) fn write_output(path: &Path, contents: &str) -> Result<(), EvaluatorError> {
    ensure_parent_dir(path)
        .map_err(|e| EvaluatorError::IoError(format!("Failed to create {}: {e}", path.display())))?;
    fs::write(path, contents)
        .map_err(|e| EvaluatorError::IoError(format!("Failed to write {}: {e}", path.display())))
}
