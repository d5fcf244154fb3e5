//! # Reconciler
//!
//! Turns the field statuses of one test case into a self-consistent count tuple. Logs are
//! written by a separate tool and can disagree with themselves (a summary claiming more verdicts
//! than there are fields, or fields left `pending`), so every record passes through here exactly
//! once before it reaches any grouping axis.
//!
//! The rules, applied in order:
//!
//! 1. `expected` is the number of expected fields.
//! 2. `correct`, `wrong` and `missing` count fields with that status. `pending` counts toward none.
//! 3. `unexpected` is the number of unexpected fields.
//! 4. If the verdicts add up to more than `expected`, the overflow is taken from `wrong` first.
//!    Whatever shortfall remains is added to `missing`.
//!
//! Reconciliation never fails; anomalies are repaired silently.

use serde::{Deserialize, Serialize};

use crate::types::{FieldStatus, TestCaseRecord};

/// Counts as claimed by a log, before any repair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCounts {
    pub expected: u64,
    pub correct: u64,
    pub wrong: u64,
    pub missing: u64,
    pub unexpected: u64,
}

/// Counts after reconciliation. `correct + wrong + missing == expected`
/// whenever `expected > 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledCounts {
    pub expected: u64,
    pub correct: u64,
    pub wrong: u64,
    pub missing: u64,
    pub unexpected: u64,
}

impl RawCounts {
    pub fn from_record(record: &TestCaseRecord) -> Self {
        let mut counts = RawCounts {
            expected: record.expected_fields.len() as u64,
            unexpected: record.unexpected_fields.len() as u64,
            ..Default::default()
        };
        for field in &record.expected_fields {
            match field.status {
                FieldStatus::Correct => counts.correct += 1,
                FieldStatus::Wrong => counts.wrong += 1,
                FieldStatus::Missing => counts.missing += 1,
                FieldStatus::Pending => {}
            }
        }
        counts
    }

    pub fn reconcile(self) -> ReconciledCounts {
        let RawCounts {
            expected,
            mut correct,
            mut wrong,
            mut missing,
            unexpected,
        } = self;

        let mut accounted = correct + wrong + missing;
        if accounted > expected {
            let mut overflow = accounted - expected;
            // `wrong` absorbs the overflow; `missing` then `correct` only when
            // wrong alone cannot, which record-derived counts never need.
            for counter in [&mut wrong, &mut missing, &mut correct] {
                let take = overflow.min(*counter);
                *counter -= take;
                overflow -= take;
            }
            accounted = correct + wrong + missing;
        }
        if accounted < expected {
            missing += expected - accounted;
        }

        ReconciledCounts {
            expected,
            correct,
            wrong,
            missing,
            unexpected,
        }
    }
}

/// Reconciles a single record.
pub fn reconcile_record(record: &TestCaseRecord) -> ReconciledCounts {
    RawCounts::from_record(record).reconcile()
}
