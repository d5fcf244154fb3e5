//! Field axis.
//!
//! `by_field` splits a test case instead of keying it: every expected field counts toward the
//! group named after it, and so does every unexpected field. A name that appears more than once
//! in a record adds one item per occurrence but only one test. Field groups carry no timing.

use std::collections::BTreeMap;

use crate::reconcile::{RawCounts, ReconciledCounts};
use crate::types::{FieldStatus, TestCaseRecord};

/// Counts of one field name within one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldTally {
    pub counts: ReconciledCounts,
    pub pending: u64,
}

/// Tallies `record` per field name. Blank names are ignored.
pub fn field_tallies(record: &TestCaseRecord) -> BTreeMap<String, FieldTally> {
    let mut raw: BTreeMap<String, (RawCounts, u64)> = BTreeMap::new();

    for field in &record.expected_fields {
        let name = field.name.trim();
        if name.is_empty() {
            continue;
        }
        let (counts, pending) = raw.entry(name.to_string()).or_default();
        counts.expected += 1;
        match field.status {
            FieldStatus::Correct => counts.correct += 1,
            FieldStatus::Wrong => counts.wrong += 1,
            FieldStatus::Missing => counts.missing += 1,
            FieldStatus::Pending => *pending += 1,
        }
    }
    for field in &record.unexpected_fields {
        let name = field.name.trim();
        if name.is_empty() {
            continue;
        }
        raw.entry(name.to_string()).or_default().0.unexpected += 1;
    }

    raw.into_iter()
        .map(|(name, (counts, pending))| {
            let tally = FieldTally {
                counts: counts.reconcile(),
                pending,
            };
            (name, tally)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldResult, UnexpectedField};
    use serde_json::Value;

    fn expected(name: &str, status: FieldStatus) -> FieldResult {
        FieldResult {
            name: name.into(),
            status,
            value: Value::Null,
        }
    }

    fn unexpected(name: &str) -> UnexpectedField {
        UnexpectedField {
            name: name.into(),
            value: Value::Null,
        }
    }

    #[test]
    fn tallies_each_name_separately() {
        let r = TestCaseRecord {
            expected_fields: vec![
                expected("title", FieldStatus::Correct),
                expected("url", FieldStatus::Wrong),
                expected("note", FieldStatus::Pending),
                expected(" ", FieldStatus::Correct),
            ],
            unexpected_fields: vec![unexpected("url"), unexpected("host")],
            ..Default::default()
        };
        let t = field_tallies(&r);

        assert_eq!(t.keys().collect::<Vec<_>>(), vec!["host", "note", "title", "url"]);
        assert_eq!(
            t["url"].counts,
            ReconciledCounts { expected: 1, correct: 0, wrong: 1, missing: 0, unexpected: 1 }
        );
        assert_eq!(t["host"].counts, ReconciledCounts { unexpected: 1, ..Default::default() });
        // pending is reconciled to missing and tracked on the side
        assert_eq!(t["note"].counts.missing, 1);
        assert_eq!(t["note"].pending, 1);
        assert_eq!(t["title"].counts.correct, 1);
    }

    #[test]
    fn repeated_names_add_up() {
        let r = TestCaseRecord {
            expected_fields: vec![
                expected("phone", FieldStatus::Correct),
                expected("phone", FieldStatus::Missing),
            ],
            ..Default::default()
        };
        let t = field_tallies(&r);
        assert_eq!(
            t["phone"].counts,
            ReconciledCounts { expected: 2, correct: 1, wrong: 0, missing: 1, unexpected: 0 }
        );
    }
}
