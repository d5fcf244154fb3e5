//! File Name Parser
//!
//! Benchmark runs encode the experiment in each log's file name, for example
//! `generable_ja_chat_level1_3.json`, `chat_abs_json_ja_level2_run1.json`, or the legacy
//! `format_experiment_generable_en.log`. Records that omit their own `method`, `language`,
//! `level` or `experiment_pattern` are filled from here. Values inside a record always win.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::TestCaseRecord;

static LEGACY_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^format_experiment_(?P<method>[A-Za-z0-9-]+)_(?P<language>ja|en)\.log$")
        .expect("valid regex")
});

static STRUCTURED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<prefix>[A-Za-z0-9-]+(?:_[A-Za-z0-9-]+)*?)_(?P<language>ja|en)(?:_|\.)")
        .expect("valid regex")
});

static LEVEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_level(?P<level>[0-9]+)(?:_|\.|$)").expect("valid regex"));

/// Identity hints recovered from a file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileIdentity {
    pub method: Option<String>,
    pub language: Option<String>,
    pub experiment_pattern: Option<String>,
    pub level: Option<i64>,
}

impl FileIdentity {
    /// Fills the fields `record` left empty.
    pub fn apply(&self, record: &mut TestCaseRecord) {
        record.fill_identity(self.method.as_deref(), self.language.as_deref());
        if record.level == 0 {
            if let Some(level) = self.level {
                record.level = level;
            }
        }
        if record.experiment_pattern.as_deref().is_none_or(str::is_empty) {
            if let Some(p) = &self.experiment_pattern {
                record.experiment_pattern = Some(p.clone());
            }
        }
    }
}

/// Parses the hints encoded in `file_name` (no directory component).
///
/// The part before the language marker is either a bare method (`generable`)
/// or a composite experiment pattern (`chat_abs_json`) whose last segment is
/// the method.
pub fn identify(file_name: &str) -> FileIdentity {
    if let Some(caps) = LEGACY_NAME.captures(file_name) {
        return FileIdentity {
            method: Some(caps["method"].to_string()),
            language: Some(caps["language"].to_string()),
            ..Default::default()
        };
    }

    let mut identity = FileIdentity::default();
    if let Some(caps) = STRUCTURED_NAME.captures(file_name) {
        let prefix = &caps["prefix"];
        identity.language = Some(caps["language"].to_string());
        let segments: Vec<&str> = prefix.split('_').collect();
        if let Some(method) = segments.last() {
            identity.method = Some((*method).to_string());
        }
        if segments.len() >= 3 {
            identity.experiment_pattern = Some(prefix.to_string());
        }
    }
    if let Some(caps) = LEVEL.captures(file_name) {
        identity.level = caps["level"].parse().ok();
    }
    identity
}
