use crate::traits::group_key::GroupKey;
use crate::types::TestCaseRecord;

/// Decimal level. Records without a level (`< 1`) are excluded.
pub struct LevelKey;

impl GroupKey for LevelKey {
    fn key(&self, record: &TestCaseRecord) -> Option<String> {
        (record.level >= 1).then(|| record.level.to_string())
    }
}

/// `"{pattern}_level{level}"`.
pub struct PatternLevelKey;

impl GroupKey for PatternLevelKey {
    fn key(&self, record: &TestCaseRecord) -> Option<String> {
        let pattern = record.pattern.trim();
        if pattern.is_empty() || record.level < 1 {
            return None;
        }
        Some(format!("{pattern}_level{}", record.level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_zero_is_excluded() {
        let r = TestCaseRecord {
            pattern: "chat".into(),
            ..Default::default()
        };
        assert_eq!(LevelKey.key(&r), None);
        assert_eq!(PatternLevelKey.key(&r), None);
    }

    #[test]
    fn pattern_level_combines_both() {
        let r = TestCaseRecord {
            pattern: "contract".into(),
            level: 3,
            ..Default::default()
        };
        assert_eq!(LevelKey.key(&r), Some("3".into()));
        assert_eq!(PatternLevelKey.key(&r), Some("contract_level3".into()));
    }
}
