//! Structured Log Parser
//!
//! This module provides [`JsonLogParser`], which converts one structured test-case log into a
//! [`TestCaseRecord`].
//!
//! # JSON Schema
//!
//! ```json
//! {
//!   "pattern": "chat",
//!   "level": 1,
//!   "iteration": 3,
//!   "method": "generable",
//!   "language": "ja",
//!   "experiment_pattern": "chat_abs_gen",
//!   "expected_fields": [ { "name": "title", "status": "correct", "value": "..." } ],
//!   "unexpected_fields": [ { "name": "note", "value": "..." } ],
//!   "error": null,
//!   "extraction_time": 2.41
//! }
//! ```
//!
//! Every key is optional. Missing keys become empty strings, zeroes, empty lists or `null`, and
//! unknown keys are ignored. camelCase spellings (`expectedFields`, `extractionTime`, ...) are
//! accepted as well. A document that is not a JSON object is rejected with
//! [`EvaluatorError::InvalidJson`].

use serde_json::{Map, Value};

use util::report_config::ReportConfig;

use crate::error::EvaluatorError;
use crate::traits::parser::Parser;
use crate::types::{FieldResult, FieldStatus, TestCaseRecord, UnexpectedField};

pub struct JsonLogParser;

fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k)).filter(|v| !v.is_null())
}

fn text(obj: &Map<String, Value>, keys: &[&str]) -> String {
    match lookup(obj, keys) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn integer(obj: &Map<String, Value>, keys: &[&str]) -> i64 {
    match lookup(obj, keys) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn seconds(obj: &Map<String, Value>, keys: &[&str]) -> f64 {
    let raw = match lookup(obj, keys) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if raw.is_finite() && raw > 0.0 { raw } else { 0.0 }
}

fn list<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> &'a [Value] {
    match lookup(obj, keys) {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    }
}

fn expected_field(raw: &Value) -> FieldResult {
    let Some(obj) = raw.as_object() else {
        return FieldResult {
            name: String::new(),
            status: FieldStatus::Pending,
            value: Value::Null,
        };
    };
    FieldResult {
        name: text(obj, &["name"]),
        status: FieldStatus::from_log(&text(obj, &["status"])),
        value: obj.get("value").cloned().unwrap_or(Value::Null),
    }
}

fn unexpected_field(raw: &Value) -> UnexpectedField {
    match raw.as_object() {
        Some(obj) => UnexpectedField {
            name: text(obj, &["name"]),
            value: obj.get("value").cloned().unwrap_or(Value::Null),
        },
        None => UnexpectedField {
            name: String::new(),
            value: raw.clone(),
        },
    }
}

fn error_text(obj: &Map<String, Value>) -> Option<String> {
    match lookup(obj, &["error"])? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(false) => None,
        other => Some(other.to_string()),
    }
}

impl<'a> Parser<&'a Value, TestCaseRecord> for JsonLogParser {
    fn parse(&self, raw: &'a Value, _config: &ReportConfig) -> Result<TestCaseRecord, EvaluatorError> {
        let obj = raw.as_object().ok_or_else(|| {
            EvaluatorError::InvalidJson("structured log must be a JSON object".to_string())
        })?;

        let experiment_pattern = text(obj, &["experiment_pattern", "experimentPattern"]);

        Ok(TestCaseRecord {
            pattern: text(obj, &["pattern"]),
            level: integer(obj, &["level"]),
            iteration: integer(obj, &["iteration"]),
            method: text(obj, &["method"]),
            language: text(obj, &["language"]),
            experiment_pattern: (!experiment_pattern.is_empty()).then_some(experiment_pattern),
            expected_fields: list(obj, &["expected_fields", "expectedFields"])
                .iter()
                .map(expected_field)
                .collect(),
            unexpected_fields: list(obj, &["unexpected_fields", "unexpectedFields"])
                .iter()
                .map(unexpected_field)
                .collect(),
            error: error_text(obj),
            extraction_time: seconds(obj, &["extraction_time", "extractionTime"]),
        })
    }
}
