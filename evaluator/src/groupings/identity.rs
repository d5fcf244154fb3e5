use crate::traits::group_key::GroupKey;
use crate::types::TestCaseRecord;

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

pub struct MethodKey;

impl GroupKey for MethodKey {
    fn key(&self, record: &TestCaseRecord) -> Option<String> {
        non_empty(&record.method)
    }
}

pub struct LanguageKey;

impl GroupKey for LanguageKey {
    fn key(&self, record: &TestCaseRecord) -> Option<String> {
        non_empty(&record.language)
    }
}

pub struct PatternKey;

impl GroupKey for PatternKey {
    fn key(&self, record: &TestCaseRecord) -> Option<String> {
        non_empty(&record.pattern)
    }
}

/// `"{method}_{language}"`, the experiment a record was produced by.
pub struct ExperimentKey;

impl GroupKey for ExperimentKey {
    fn key(&self, record: &TestCaseRecord) -> Option<String> {
        let method = non_empty(&record.method)?;
        let language = non_empty(&record.language)?;
        Some(format!("{method}_{language}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_excluded() {
        let r = TestCaseRecord {
            method: "  ".into(),
            language: "en".into(),
            ..Default::default()
        };
        assert_eq!(MethodKey.key(&r), None);
        assert_eq!(PatternKey.key(&r), None);
        assert_eq!(LanguageKey.key(&r), Some("en".into()));
        assert_eq!(ExperimentKey.key(&r), None);
    }

    #[test]
    fn experiment_joins_method_and_language() {
        let r = TestCaseRecord {
            method: "json".into(),
            language: "en".into(),
            ..Default::default()
        };
        assert_eq!(ExperimentKey.key(&r), Some("json_en".into()));
    }
}
