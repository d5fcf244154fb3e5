//! # Grouped Aggregator
//!
//! [`Aggregator`] owns one [`GroupMap`] per configured [`GroupingAxis`] plus an overall
//! accumulator. Each record is reconciled once by [`Aggregator::fold`] and the resulting counts
//! are added to the record's group on every axis that yields a key. The field axis is the
//! exception: it adds each field name's own counts to that name's group.
//!
//! Accumulators only ever grow, and folding is order-independent, so aggregators built over
//! disjoint sets of files can be combined with [`Aggregator::merge`] and give the same result
//! as a single pass over all of them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use util::report_config::GroupingAxis;

use crate::groupings::field::field_tallies;
use crate::reconcile::{ReconciledCounts, reconcile_record};
use crate::timing::TimingStats;
use crate::traits::group_key::GroupKey;
use crate::types::TestCaseRecord;

/// Item counters for one group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupAccumulator {
    pub expected_items: u64,
    pub correct_items: u64,
    pub wrong_items: u64,
    pub missing_items: u64,
    pub unexpected_items: u64,
    /// Expected fields still `pending` in the source logs. Already counted as
    /// missing by reconciliation; tracked for the pending rate.
    pub pending_items: u64,
    pub tests: u64,
    pub timing: TimingStats,
}

impl GroupAccumulator {
    pub fn add(&mut self, counts: &ReconciledCounts, pending: u64, extraction_time: f64) {
        self.expected_items += counts.expected;
        self.correct_items += counts.correct;
        self.wrong_items += counts.wrong;
        self.missing_items += counts.missing;
        self.unexpected_items += counts.unexpected;
        self.pending_items += pending;
        self.tests += 1;
        self.timing.record(extraction_time);
    }

    pub fn merge(&mut self, other: &GroupAccumulator) {
        self.expected_items += other.expected_items;
        self.correct_items += other.correct_items;
        self.wrong_items += other.wrong_items;
        self.missing_items += other.missing_items;
        self.unexpected_items += other.unexpected_items;
        self.pending_items += other.pending_items;
        self.tests += other.tests;
        self.timing.merge(&other.timing);
    }
}

/// Accumulators of one axis, keyed and iterated in sorted key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupMap {
    groups: BTreeMap<String, GroupAccumulator>,
}

impl GroupMap {
    /// Returns the accumulator for `key`, creating an empty one on first access.
    pub fn ensure(&mut self, key: &str) -> &mut GroupAccumulator {
        self.groups.entry(key.to_string()).or_default()
    }

    pub fn get(&self, key: &str) -> Option<&GroupAccumulator> {
        self.groups.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &GroupAccumulator)> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn merge(&mut self, other: &GroupMap) {
        for (key, acc) in other.iter() {
            self.ensure(key).merge(acc);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregator {
    axes: Vec<GroupingAxis>,
    groups: BTreeMap<GroupingAxis, GroupMap>,
    overall: GroupAccumulator,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(&GroupingAxis::ALL)
    }
}

impl Aggregator {
    pub fn new(axes: &[GroupingAxis]) -> Self {
        let mut ordered: Vec<GroupingAxis> = Vec::with_capacity(axes.len());
        for axis in axes {
            if !ordered.contains(axis) {
                ordered.push(*axis);
            }
        }
        let groups = ordered.iter().map(|a| (*a, GroupMap::default())).collect();
        Self {
            axes: ordered,
            groups,
            overall: GroupAccumulator::default(),
        }
    }

    /// Configured axes, in report order.
    pub fn axes(&self) -> &[GroupingAxis] {
        &self.axes
    }

    pub fn overall(&self) -> &GroupAccumulator {
        &self.overall
    }

    pub fn groups(&self, axis: GroupingAxis) -> Option<&GroupMap> {
        self.groups.get(&axis)
    }

    /// Returns the accumulator for `key` on `axis`, creating the axis and the
    /// group on first access.
    pub fn ensure(&mut self, axis: GroupingAxis, key: &str) -> &mut GroupAccumulator {
        if !self.axes.contains(&axis) {
            self.axes.push(axis);
        }
        self.groups.entry(axis).or_default().ensure(key)
    }

    /// Reconciles `record` once and adds it to the overall accumulator and to
    /// every axis that yields a key for it.
    pub fn fold(&mut self, record: &TestCaseRecord) -> ReconciledCounts {
        let counts = reconcile_record(record);
        let pending = record.pending_count();

        self.overall.add(&counts, pending, record.extraction_time);
        for axis in self.axes.clone() {
            if axis == GroupingAxis::Field {
                for (name, tally) in field_tallies(record) {
                    self.ensure(axis, &name).add(&tally.counts, tally.pending, 0.0);
                }
            } else if let Some(key) = axis.key(record) {
                self.ensure(axis, &key)
                    .add(&counts, pending, record.extraction_time);
            }
        }
        counts
    }

    /// Adds every accumulator of `other` into this aggregator.
    pub fn merge(&mut self, other: &Aggregator) {
        self.overall.merge(&other.overall);
        for axis in &other.axes {
            if !self.axes.contains(axis) {
                self.axes.push(*axis);
            }
        }
        for (axis, map) in &other.groups {
            self.groups.entry(*axis).or_default().merge(map);
        }
    }
}
