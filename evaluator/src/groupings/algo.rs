//! Algorithm axis.
//!
//! Experiment patterns are composite names such as `chat_abs_gen`: underscore-separated
//! segments where the second segment names the extraction algorithm (`abs`, `strict`,
//! `persona`, ...). Inputs that do not follow that shape produce no key rather than a guess.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::traits::group_key::GroupKey;
use crate::types::TestCaseRecord;

static COMPOSITE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]+(?:_[A-Za-z0-9-]+)+$").expect("valid regex"));

/// Extracts the algorithm segment from a composite pattern.
///
/// Returns `None` for a single segment, an empty segment, or any character
/// outside ASCII alphanumerics and `-`.
pub fn parse_algo(composite: &str) -> Option<&str> {
    if !COMPOSITE_PATTERN.is_match(composite) {
        return None;
    }
    composite.split('_').nth(1)
}

/// `"{algo}_level{level}"`.
///
/// The algorithm is read from `experiment_pattern` when the record has one,
/// otherwise from `pattern`.
pub struct AlgoLevelKey;

impl GroupKey for AlgoLevelKey {
    fn key(&self, record: &TestCaseRecord) -> Option<String> {
        if record.level < 1 {
            return None;
        }
        let source = record
            .experiment_pattern
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(&record.pattern);
        let algo = parse_algo(source)?;
        Some(format!("{algo}_level{}", record.level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_segment_is_the_algorithm() {
        assert_eq!(parse_algo("chat_abs_gen"), Some("abs"));
        assert_eq!(parse_algo("chat_abs"), Some("abs"));
        assert_eq!(parse_algo("mail_strict-v2_json"), Some("strict-v2"));
    }

    #[test]
    fn malformed_patterns_fail_closed() {
        for bad in ["", "chat", "chat__gen", "_abs_gen", "chat_abs_", "chat_ab s", "chat_抽出_gen", "chat/abs_gen"] {
            assert_eq!(parse_algo(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn experiment_pattern_takes_precedence() {
        let r = TestCaseRecord {
            pattern: "chat".into(),
            experiment_pattern: Some("chat_strict_json".into()),
            level: 1,
            ..Default::default()
        };
        assert_eq!(AlgoLevelKey.key(&r), Some("strict_level1".into()));
    }

    #[test]
    fn falls_back_to_pattern_and_requires_level() {
        let mut r = TestCaseRecord {
            pattern: "chat_abs_gen".into(),
            experiment_pattern: Some(String::new()),
            level: 2,
            ..Default::default()
        };
        assert_eq!(AlgoLevelKey.key(&r), Some("abs_level2".into()));

        r.level = 0;
        assert_eq!(AlgoLevelKey.key(&r), None);

        r.level = 1;
        r.pattern = "chat".into();
        assert_eq!(AlgoLevelKey.key(&r), None);
    }
}
