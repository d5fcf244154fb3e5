//! # Scorer Module
//!
//! Scoring functions applied to a [`GroupAccumulator`] once aggregation is complete.
//!
//! The headline number is the *normalized score*:
//!
//! ```text
//! score = (correct_items - wrong_items - unexpected_items) / max(expected_items, 1)
//! ```
//!
//! A perfect group scores `1.0`. Wrong and unexpected extractions are penalised, missing ones
//! are not, so the score is unbounded below. A group with no expected items scores exactly `0.0`.
//!
//! [`StatusRates`] adds the per-status breakdown used by the detailed report.

use serde::{Deserialize, Serialize};

use crate::aggregator::GroupAccumulator;

/// Computes the normalized score for an accumulated group.
///
/// # Example
///
/// ```
/// use evaluator::aggregator::GroupAccumulator;
/// use evaluator::scorer::normalized_score;
///
/// let acc = GroupAccumulator {
///     expected_items: 5,
///     correct_items: 3,
///     missing_items: 1,
///     tests: 2,
///     ..Default::default()
/// };
/// assert!((normalized_score(&acc) - 0.6).abs() < 1e-9);
///
/// assert_eq!(normalized_score(&GroupAccumulator::default()), 0.0);
/// ```
pub fn normalized_score(acc: &GroupAccumulator) -> f64 {
    if acc.expected_items == 0 {
        return 0.0;
    }
    let numerator =
        acc.correct_items as f64 - acc.wrong_items as f64 - acc.unexpected_items as f64;
    numerator / acc.expected_items as f64
}

#[inline]
fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Status breakdown for a group. Every rate is `0.0` when its denominator is zero.
///
/// Rates describe the verdicts as logged: fields still `pending` are taken back out of
/// `missing_items` (reconciliation put them there) and only show up in `pending_rate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusRates {
    /// `correct / (correct + wrong + missing + unexpected)`
    pub correct_rate: f64,
    pub wrong_rate: f64,
    pub missing_rate: f64,
    /// `unexpected / (correct + wrong + missing)`; can exceed 1.
    pub unexpected_rate: f64,
    /// `pending / (expected + unexpected)`
    pub pending_rate: f64,
    pub precision: f64,
    pub recall: f64,
}

impl StatusRates {
    pub fn from_accumulator(acc: &GroupAccumulator) -> Self {
        let correct = acc.correct_items;
        let wrong = acc.wrong_items;
        let missing = acc.missing_items.saturating_sub(acc.pending_items);
        let unexpected = acc.unexpected_items;

        let judged = correct + wrong + missing;
        let evaluable = judged + unexpected;
        StatusRates {
            correct_rate: ratio(correct, evaluable),
            wrong_rate: ratio(wrong, evaluable),
            missing_rate: ratio(missing, evaluable),
            unexpected_rate: ratio(unexpected, judged),
            pending_rate: ratio(acc.pending_items, acc.expected_items + unexpected),
            precision: ratio(correct, correct + wrong + unexpected),
            recall: ratio(correct, correct + missing),
        }
    }
}
