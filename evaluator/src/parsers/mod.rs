//! # Parsers
//!
//! This module turns raw log input into [`TestCaseRecord`](crate::types::TestCaseRecord)s.
//! Each sub-module handles one source of information:
//!
//! - [`json_log_parser`]: One structured JSON document per test case.
//! - [`legacy_log_parser`]: Older console-style text logs with embedded JSON blocks.
//! - [`file_name_parser`]: Identity hints (method, language, level) encoded in log file names.

pub mod file_name_parser;
pub mod json_log_parser;
pub mod legacy_log_parser;
