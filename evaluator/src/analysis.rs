//! Performance analysis across grouping axes.
//!
//! For each axis with at least one group, picks the best and worst group by normalized score
//! and reports the gap between them. Ties go to the group whose key sorts first.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aggregator::{Aggregator, GroupAccumulator};
use crate::scorer::normalized_score;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupScore {
    pub key: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisPerformance {
    pub best: GroupScore,
    pub worst: GroupScore,
    pub gap: f64,
}

/// Headline figures for the whole run. Percentages use `max(expected_items, 1)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallPerformance {
    pub normalized_score: f64,
    pub correct_pct: f64,
    pub unexpected_pct: f64,
    pub missing_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceAnalysis {
    pub overall: OverallPerformance,
    /// Keyed by axis report name (`by_method`, ...).
    pub axes: BTreeMap<String, AxisPerformance>,
}

fn percent(part: u64, acc: &GroupAccumulator) -> f64 {
    part as f64 / acc.expected_items.max(1) as f64 * 100.0
}

impl OverallPerformance {
    pub fn from_accumulator(acc: &GroupAccumulator) -> Self {
        OverallPerformance {
            normalized_score: normalized_score(acc),
            correct_pct: percent(acc.correct_items, acc),
            unexpected_pct: percent(acc.unexpected_items, acc),
            missing_pct: percent(acc.missing_items, acc),
        }
    }
}

/// Best and worst groups from `(key, score)` pairs given in key order.
pub fn best_and_worst<'a, I>(scores: I) -> Option<AxisPerformance>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut best: Option<(&str, f64)> = None;
    let mut worst: Option<(&str, f64)> = None;

    for (key, score) in scores {
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((key, score));
        }
        if worst.is_none_or(|(_, s)| score < s) {
            worst = Some((key, score));
        }
    }

    let (best_key, best_score) = best?;
    let (worst_key, worst_score) = worst?;
    Some(AxisPerformance {
        best: GroupScore {
            key: best_key.to_string(),
            score: best_score,
        },
        worst: GroupScore {
            key: worst_key.to_string(),
            score: worst_score,
        },
        gap: best_score - worst_score,
    })
}

pub fn analyze(aggregator: &Aggregator) -> PerformanceAnalysis {
    let mut axes = BTreeMap::new();
    for axis in aggregator.axes() {
        let Some(groups) = aggregator.groups(*axis) else {
            continue;
        };
        let scores = groups
            .iter()
            .map(|(key, acc)| (key.as_str(), normalized_score(acc)));
        if let Some(perf) = best_and_worst(scores) {
            axes.insert(axis.report_name().to_string(), perf);
        }
    }

    PerformanceAnalysis {
        overall: OverallPerformance::from_accumulator(aggregator.overall()),
        axes,
    }
}
