//! Evaluator Error Types
//!
//! This module defines the [`EvaluatorError`] enum, which covers every fatal failure a report run
//! can hit: a missing log directory, a directory with nothing to ingest, an unusable report
//! configuration, and I/O or serialization failures while writing outputs.
//!
//! File-level problems (a malformed log, an oversized file) are *not* errors at this level. Those
//! files are skipped, logged, and recorded in the run summary so the batch keeps going.
//!
//! # Example
//!
//! ```rust
//! use evaluator::error::EvaluatorError;
//!
//! fn require_logs(count: usize) -> Result<(), EvaluatorError> {
//!     if count == 0 {
//!         return Err(EvaluatorError::NoLogFiles("logs/".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;

/// Represents all error types that can occur in the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluatorError {
    /// The log directory does not exist or is not a directory.
    LogDirMissing(String),
    /// The log directory contains no files matching the ingest patterns.
    NoLogFiles(String),
    /// The report configuration could not be read or is invalid.
    InvalidConfig(String),
    /// A JSON document is malformed or does not match the expected schema.
    InvalidJson(String),
    /// I/O error (file not found, unreadable, unwritable, too large).
    IoError(String),
    /// A background ingestion task failed to complete.
    TaskFailed(String),
}

impl fmt::Display for EvaluatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluatorError::LogDirMissing(p) => write!(f, "log directory not found: {p}"),
            EvaluatorError::NoLogFiles(p) => write!(f, "no log files found in {p}"),
            EvaluatorError::InvalidConfig(m) => write!(f, "invalid report config: {m}"),
            EvaluatorError::InvalidJson(m) => write!(f, "invalid JSON: {m}"),
            EvaluatorError::IoError(m) => write!(f, "I/O error: {m}"),
            EvaluatorError::TaskFailed(m) => write!(f, "ingestion task failed: {m}"),
        }
    }
}

impl std::error::Error for EvaluatorError {}
