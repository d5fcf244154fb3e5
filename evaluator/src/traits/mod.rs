//!
//! Traits Module
//!
//! Core traits that make the evaluator pluggable.
//!
//! - [`parser`]: Turns raw log input into [`TestCaseRecord`](crate::types::TestCaseRecord)s.
//! - [`group_key`]: Derives the grouping key of a record for one report axis.

pub mod group_key;
pub mod parser;
