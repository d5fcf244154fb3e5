//!
//! File Loader Utility
//!
//! Size-checked loading of log files. Every check failure is returned as an
//! [`EvaluatorError::IoError`] whose message is suitable for the run summary's skip reason;
//! callers decide whether a failure is fatal or just skips the file.

use crate::error::EvaluatorError;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Checks that a file exists, is a file, and (optionally) does not exceed a maximum size.
///
/// # Errors
///
/// Returns [`EvaluatorError::IoError`] if the file is missing, not a file, unreadable, or too large.
pub fn check_file(path: &Path, max_size: Option<u64>) -> Result<(), EvaluatorError> {
    if !path.exists() {
        debug!("File not found: {}", path.display());
        return Err(EvaluatorError::IoError("File not found".to_string()));
    }

    if !path.is_file() {
        debug!("Not a file: {}", path.display());
        return Err(EvaluatorError::IoError("Invalid file type".to_string()));
    }

    let metadata = fs::metadata(path).map_err(|e| {
        debug!("File unreadable: {} - {}", path.display(), e);
        EvaluatorError::IoError(format!("File unreadable: {e}"))
    })?;

    if let Some(max) = max_size {
        if metadata.len() > max {
            return Err(EvaluatorError::IoError(format!(
                "File too large ({} bytes, max {} bytes)",
                metadata.len(),
                max
            )));
        }
    }

    Ok(())
}

/// Reads a log file as UTF-8 text after [`check_file`].
pub fn load_text(path: &Path, max_size: u64) -> Result<String, EvaluatorError> {
    check_file(path, Some(max_size))?;
    fs::read_to_string(path).map_err(|e| EvaluatorError::IoError(format!("Failed to read file: {e}")))
}

/// Reads and decodes a JSON log after [`check_file`].
pub fn load_json(path: &Path, max_size: u64) -> Result<Value, EvaluatorError> {
    check_file(path, Some(max_size))?;
    let bytes =
        fs::read(path).map_err(|e| EvaluatorError::IoError(format!("Failed to read file: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| EvaluatorError::InvalidJson(e.to_string()))
}
