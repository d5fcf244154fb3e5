//! # Groupings
//!
//! [`GroupKey`] implementations for every report axis, plus the dispatch from a configured
//! [`GroupingAxis`] to its key extractor.
//!
//! - [`identity`]: `by_method`, `by_language`, `by_pattern`, `by_experiment`.
//! - [`level`]: `by_level`, `by_pattern_level`.
//! - [`algo`]: `by_algo_level`, with the composite pattern grammar.
//! - [`field`]: `by_field`, which tallies per field name and has no per-record key.

pub mod algo;
pub mod field;
pub mod identity;
pub mod level;

use util::report_config::GroupingAxis;

use crate::traits::group_key::GroupKey;
use crate::types::TestCaseRecord;

impl GroupKey for GroupingAxis {
    fn key(&self, record: &TestCaseRecord) -> Option<String> {
        match self {
            GroupingAxis::Method => identity::MethodKey.key(record),
            GroupingAxis::Language => identity::LanguageKey.key(record),
            GroupingAxis::Pattern => identity::PatternKey.key(record),
            GroupingAxis::Experiment => identity::ExperimentKey.key(record),
            GroupingAxis::Level => level::LevelKey.key(record),
            GroupingAxis::PatternLevel => level::PatternLevelKey.key(record),
            GroupingAxis::AlgoLevel => algo::AlgoLevelKey.key(record),
            GroupingAxis::Field => None,
        }
    }
}
