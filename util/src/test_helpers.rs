use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a unique temporary log directory. The directory is automatically
/// cleaned up when the returned `TempDir` is dropped.
///
/// Keep the returned `TempDir` in scope for as long as you need the files.
pub fn setup_log_dir() -> TempDir {
    TempDir::new().expect("failed to create tempdir")
}

/// Writes `contents` to `root/rel`, creating intermediate directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create fixture dir");
    }
    fs::write(&path, contents).expect("failed to write fixture");
    path
}

/// Builds a structured log document with the given `(name, status)` fields
/// and unexpected field names.
pub fn structured_log_json(
    method: &str,
    language: &str,
    pattern: &str,
    level: i64,
    fields: &[(&str, &str)],
    unexpected: &[&str],
) -> String {
    let expected: Vec<serde_json::Value> = fields
        .iter()
        .map(|(name, status)| {
            serde_json::json!({ "name": name, "status": status, "value": format!("{name}-value") })
        })
        .collect();
    let unexpected: Vec<serde_json::Value> = unexpected
        .iter()
        .map(|name| serde_json::json!({ "name": name, "value": "x", "status": "unexpected" }))
        .collect();

    serde_json::json!({
        "pattern": pattern,
        "level": level,
        "iteration": 1,
        "method": method,
        "language": language,
        "expected_fields": expected,
        "unexpected_fields": unexpected,
    })
    .to_string()
}
