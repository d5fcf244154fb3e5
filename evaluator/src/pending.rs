//! Pending item extraction.
//!
//! Lists the values of one expected field across the structured logs of a test-case pattern, so
//! fields the automatic checker left `pending` can be verified by hand. Only `*.json` files
//! directly inside the log directory whose name contains the pattern are read.

use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::EvaluatorError;
use crate::utilities::csv;

pub const PENDING_CSV_HEADER: [&str; 3] = ["file_name", "value", "status"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingItem {
    pub file_name: String,
    pub value: String,
    pub status: String,
}

/// What to extract.
#[derive(Debug, Clone)]
pub struct PendingQuery {
    /// Substring of the log file name, e.g. `chat_ja_level1`.
    pub pattern: String,
    /// Expected field name, e.g. `title`.
    pub field: String,
    /// Include every status, not only `pending`.
    pub all_items: bool,
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() || s == "nil",
        _ => false,
    }
}

fn items_in_document(file_name: &str, doc: &Value, query: &PendingQuery) -> Vec<PendingItem> {
    let Some(fields) = doc.get("expected_fields").and_then(Value::as_array) else {
        return Vec::new();
    };

    fields
        .iter()
        .filter(|f| f.get("name").and_then(Value::as_str) == Some(query.field.as_str()))
        .filter_map(|f| {
            let status = f.get("status").and_then(Value::as_str).unwrap_or("pending");
            if !query.all_items && status != "pending" {
                return None;
            }
            let value = f.get("value").unwrap_or(&Value::Null);
            let status = if is_blank(value) { "missing" } else { status };
            Some(PendingItem {
                file_name: file_name.to_string(),
                value: render_value(value),
                status: status.to_string(),
            })
        })
        .collect()
}

/// Collects matching items from `log_dir`, in file-name order.
///
/// Unreadable or malformed files are skipped with a warning.
///
/// # Errors
///
/// Returns [`EvaluatorError::LogDirMissing`] when `log_dir` is not a directory.
pub fn extract_pending_items(log_dir: &Path, query: &PendingQuery) -> Result<Vec<PendingItem>, EvaluatorError> {
    if !log_dir.is_dir() {
        return Err(EvaluatorError::LogDirMissing(log_dir.display().to_string()));
    }

    let entries = fs::read_dir(log_dir)
        .map_err(|e| EvaluatorError::IoError(format!("Failed to read {}: {e}", log_dir.display())))?;

    let mut files: Vec<(String, std::path::PathBuf)> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|e| {
            let name = e.file_name().to_str()?.to_string();
            (name.ends_with(".json") && name.contains(&query.pattern)).then(|| (name, e.path()))
        })
        .collect();
    files.sort();

    let mut items = Vec::new();
    for (name, path) in &files {
        let doc: Value = match fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()))
        {
            Ok(doc) => doc,
            Err(e) => {
                warn!(file = %name, error = %e, "Skipping unreadable log");
                continue;
            }
        };
        items.extend(items_in_document(name, &doc, query));
    }

    if items.is_empty() {
        info!(
            pattern = %query.pattern,
            field = %query.field,
            files = files.len(),
            "No matching items found"
        );
    }
    Ok(items)
}

/// Renders items as CSV with a header row. Empty input renders as an empty string.
pub fn to_csv(items: &[PendingItem]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut out = csv::row(PENDING_CSV_HEADER);
    for item in items {
        out.push_str(&csv::row([&item.file_name, &item.value, &item.status]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    fn query(all_items: bool) -> PendingQuery {
        PendingQuery {
            pattern: "chat_level1".into(),
            field: "note".into(),
            all_items,
        }
    }

    fn fixture_dir() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "json_ja_chat_level1_2.json",
            r#"{"expected_fields": [
                {"name": "note", "status": "pending", "value": "meet, \"Mon\""},
                {"name": "title", "status": "pending", "value": "x"}
            ]}"#,
        );
        write(
            dir.path(),
            "json_ja_chat_level1_1.json",
            r#"{"expected_fields": [{"name": "note", "status": "pending", "value": "nil"}]}"#,
        );
        write(
            dir.path(),
            "json_ja_chat_level1_3.json",
            r#"{"expected_fields": [{"name": "note", "status": "correct", "value": 42}]}"#,
        );
        write(
            dir.path(),
            "json_ja_mail_level1_1.json",
            r#"{"expected_fields": [{"name": "note", "status": "pending", "value": "other"}]}"#,
        );
        write(dir.path(), "json_ja_chat_level1_bad.json", "{ nope");
        dir
    }

    #[test]
    fn pending_only_by_default() {
        let dir = fixture_dir();
        let items = extract_pending_items(dir.path(), &query(false)).unwrap();
        assert_eq!(
            items,
            vec![
                PendingItem {
                    file_name: "json_ja_chat_level1_1.json".into(),
                    value: "nil".into(),
                    status: "missing".into(),
                },
                PendingItem {
                    file_name: "json_ja_chat_level1_2.json".into(),
                    value: "meet, \"Mon\"".into(),
                    status: "pending".into(),
                },
            ]
        );
    }

    #[test]
    fn all_items_includes_final_statuses() {
        let dir = fixture_dir();
        let items = extract_pending_items(dir.path(), &query(true)).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].value, "42");
        assert_eq!(items[2].status, "correct");
    }

    #[test]
    fn csv_output_quotes_values() {
        let dir = fixture_dir();
        let items = extract_pending_items(dir.path(), &query(false)).unwrap();
        let csv = to_csv(&items);
        assert_eq!(
            csv,
            "file_name,value,status\r\n\
             json_ja_chat_level1_1.json,nil,missing\r\n\
             json_ja_chat_level1_2.json,\"meet, \"\"Mon\"\"\",pending\r\n"
        );
        assert_eq!(to_csv(&[]), "");
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = tempdir().unwrap();
        let err = extract_pending_items(&dir.path().join("nope"), &query(false)).unwrap_err();
        assert!(matches!(err, EvaluatorError::LogDirMissing(_)));
    }
}
