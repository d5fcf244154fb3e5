//! Legacy Log Parser
//!
//! Older benchmark runs wrote a single console-style text log per experiment. Each test case
//! appears as a marker line (by default `📊 構造化ログ:`) followed by a pretty-printed JSON
//! object, surrounded by unrelated progress output.
//!
//! [`LegacyLogParser`] splits the text at every marker and takes the balanced-brace region that
//! follows. Brace counting ignores braces inside JSON strings. A region whose braces never close
//! before the next marker (or end of file) yields nothing. A region that closes but does not
//! decode is skipped with a warning; the remaining blocks are still used.
//!
//! A run that hit the experiment timeout says so somewhere in its console output; such logs are
//! flagged in [`LegacyLog::timed_out`] so the run summary can list them.

use serde_json::Value;
use tracing::{debug, warn};

use util::report_config::ReportConfig;

use crate::error::EvaluatorError;
use crate::parsers::json_log_parser::JsonLogParser;
use crate::traits::parser::Parser;
use crate::types::TestCaseRecord;

pub struct LegacyLogParser;

/// Everything recovered from one legacy log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyLog {
    pub records: Vec<TestCaseRecord>,
    pub timed_out: bool,
}

/// True when the console output reports a timeout (`タイムアウト` or any casing of `timeout`).
pub fn mentions_timeout(text: &str) -> bool {
    text.contains("タイムアウト") || text.to_ascii_lowercase().contains("timeout")
}

/// Returns the first balanced `{ ... }` region of `segment`, if any.
pub fn extract_json_block(segment: &str) -> Option<&str> {
    let start = segment.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in segment[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&segment[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

impl<'a> Parser<&'a str, LegacyLog> for LegacyLogParser {
    fn parse(&self, text: &'a str, config: &ReportConfig) -> Result<LegacyLog, EvaluatorError> {
        let marker = config.ingest.legacy_marker.as_str();
        if marker.is_empty() {
            return Err(EvaluatorError::InvalidConfig(
                "legacy_marker must not be empty".to_string(),
            ));
        }

        let mut records = Vec::new();
        for (index, segment) in text.split(marker).skip(1).enumerate() {
            let Some(block) = extract_json_block(segment) else {
                debug!(block = index, "Legacy block never balanced; dropped");
                continue;
            };

            let value: Value = match serde_json::from_str(block) {
                Ok(v) => v,
                Err(e) => {
                    warn!(block = index, error = %e, "Skipping undecodable legacy block");
                    continue;
                }
            };

            match JsonLogParser.parse(&value, config) {
                Ok(record) => records.push(record),
                Err(e) => warn!(block = index, error = %e, "Skipping legacy block"),
            }
        }
        Ok(LegacyLog {
            records,
            timed_out: mentions_timeout(text),
        })
    }
}
