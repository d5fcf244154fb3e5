use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Grouping axes a report can be broken down by.
///
/// Serialized in `snake_case`, so a config lists e.g. `"pattern_level"`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum GroupingAxis {
    Method,
    Language,
    Pattern,
    Level,
    PatternLevel,
    AlgoLevel,
    Experiment,
    /// Per expected/unexpected field name rather than per test case.
    Field,
}

impl GroupingAxis {
    /// Every axis, in report order.
    pub const ALL: [GroupingAxis; 8] = [
        GroupingAxis::Method,
        GroupingAxis::Language,
        GroupingAxis::Pattern,
        GroupingAxis::Level,
        GroupingAxis::PatternLevel,
        GroupingAxis::AlgoLevel,
        GroupingAxis::Experiment,
        GroupingAxis::Field,
    ];

    /// Name of the axis in report output (`by_method`, `by_algo_level`, ...).
    pub fn report_name(&self) -> &'static str {
        match self {
            GroupingAxis::Method => "by_method",
            GroupingAxis::Language => "by_language",
            GroupingAxis::Pattern => "by_pattern",
            GroupingAxis::Level => "by_level",
            GroupingAxis::PatternLevel => "by_pattern_level",
            GroupingAxis::AlgoLevel => "by_algo_level",
            GroupingAxis::Experiment => "by_experiment",
            GroupingAxis::Field => "by_field",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestOptions {
    /// Globs (relative to the log dir) selecting structured JSON logs.
    #[serde(default = "default_json_patterns")]
    pub json_patterns: Vec<String>,

    /// Globs selecting legacy text logs with embedded JSON blocks.
    #[serde(default = "default_legacy_patterns")]
    pub legacy_patterns: Vec<String>,

    /// Line marker that introduces a JSON block in a legacy log.
    #[serde(default = "default_legacy_marker")]
    pub legacy_marker: String,

    /// Globs that are never ingested, even when another pattern matches.
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Files larger than this (bytes) are skipped.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            json_patterns: default_json_patterns(),
            legacy_patterns: default_legacy_patterns(),
            legacy_marker: default_legacy_marker(),
            exclude_patterns: default_exclude_patterns(),
            max_file_size: default_max_file_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroupingOptions {
    #[serde(default = "default_axes")]
    pub axes: Vec<GroupingAxis>,
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self { axes: default_axes() }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportOutputOptions {
    #[serde(default = "default_metrics_file")]
    pub metrics_file: String,

    #[serde(default = "default_scores_csv")]
    pub scores_csv: String,

    /// Decimal places used for scores and rates in the CSV and console summary.
    #[serde(default = "default_score_precision")]
    pub score_precision: usize,
}

impl Default for ReportOutputOptions {
    fn default() -> Self {
        Self {
            metrics_file: default_metrics_file(),
            scores_csv: default_scores_csv(),
            score_precision: default_score_precision(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub ingest: IngestOptions,

    #[serde(default)]
    pub grouping: GroupingOptions,

    #[serde(default)]
    pub output: ReportOutputOptions,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl ReportConfig {
    /// Drops duplicate axes while keeping the first occurrence's position.
    pub fn sanitize(mut self) -> Self {
        let mut seen = Vec::with_capacity(self.grouping.axes.len());
        self.grouping.axes.retain(|axis| {
            if seen.contains(axis) {
                false
            } else {
                seen.push(*axis);
                true
            }
        });
        if self.ingest.max_file_size == 0 {
            self.ingest.max_file_size = default_max_file_size();
        }
        self
    }

    pub fn default_config() -> Self {
        ReportConfig {
            ingest: IngestOptions::default(),
            grouping: GroupingOptions::default(),
            output: ReportOutputOptions::default(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let file_contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read report config at {path:?}: {e}"))?;

        let cfg: ReportConfig = serde_json::from_str(&file_contents)
            .map_err(|e| format!("Invalid report config JSON in {path:?}: {e}"))?;

        Ok(cfg.sanitize())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                return Err(format!("Failed to create config directory: {e:?}"));
            }
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config to JSON: {e}"))?;

        fs::write(path, json).map_err(|e| format!("Failed to write config file to disk: {e:?}"))?;

        Ok(())
    }
}

//Default Functions
fn default_json_patterns() -> Vec<String> {
    vec!["**/*.json".to_string()]
}

fn default_legacy_patterns() -> Vec<String> {
    vec!["format_experiment_*.log".to_string()]
}

fn default_legacy_marker() -> String {
    "📊 構造化ログ:".to_string()
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "**/detailed_metrics.json".to_string(),
        "**/ai_analysis.json".to_string(),
        "**/experiment_results.json".to_string(),
    ]
}

fn default_max_file_size() -> u64 {
    8 * 1024 * 1024
}

fn default_axes() -> Vec<GroupingAxis> {
    GroupingAxis::ALL.to_vec()
}

fn default_metrics_file() -> String {
    "detailed_metrics.json".to_string()
}

fn default_scores_csv() -> String {
    "grouped_scores.csv".to_string()
}

fn default_score_precision() -> usize {
    3
}
