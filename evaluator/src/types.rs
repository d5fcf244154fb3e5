//! Core record types produced by the log parsers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Verdict for a single expected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    Correct,
    Wrong,
    Missing,
    Pending,
}

impl FieldStatus {
    /// Lenient conversion from a log's status string.
    ///
    /// Anything that is not one of the three final verdicts is treated as
    /// `Pending`, so it never inflates the direct counts.
    pub fn from_log(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "correct" => FieldStatus::Correct,
            "wrong" => FieldStatus::Wrong,
            "missing" => FieldStatus::Missing,
            _ => FieldStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResult {
    pub name: String,
    pub status: FieldStatus,
    #[serde(default)]
    pub value: Value,
}

/// A field the model extracted although the test case did not expect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnexpectedField {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// One evaluated test case, as read from a structured log.
///
/// Missing keys in the source document become empty strings, zeroes and empty
/// lists; `level == 0` means the level was not recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestCaseRecord {
    pub pattern: String,
    pub level: i64,
    pub iteration: i64,
    pub method: String,
    pub language: String,
    pub experiment_pattern: Option<String>,
    pub expected_fields: Vec<FieldResult>,
    pub unexpected_fields: Vec<UnexpectedField>,
    pub error: Option<String>,
    pub extraction_time: f64,
}

impl TestCaseRecord {
    /// True when the log carries a non-empty `error`.
    pub fn is_failed(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.trim().is_empty())
    }

    /// Number of expected fields still awaiting a verdict.
    pub fn pending_count(&self) -> u64 {
        self.expected_fields
            .iter()
            .filter(|f| f.status == FieldStatus::Pending)
            .count() as u64
    }

    /// Fills `method` / `language` from another source when the record left them empty.
    pub fn fill_identity(&mut self, method: Option<&str>, language: Option<&str>) {
        if self.method.is_empty() {
            if let Some(m) = method {
                self.method = m.to_string();
            }
        }
        if self.language.is_empty() {
            if let Some(l) = language {
                self.language = l.to_string();
            }
        }
    }
}
