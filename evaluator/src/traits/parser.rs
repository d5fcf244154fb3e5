//! Parser Trait
//!
//! This module defines the [`Parser`] trait, the common interface of the log parsers. A parser
//! takes one unit of raw input (a decoded JSON document, the text of a legacy log) and produces
//! typed records, returning an [`EvaluatorError`] when the input cannot be used at all.
//!
//! # Example
//!
//! ```rust
//! use evaluator::error::EvaluatorError;
//! use evaluator::traits::parser::Parser;
//! use evaluator::types::TestCaseRecord;
//! use util::report_config::ReportConfig;
//!
//! struct EmptyParser;
//!
//! impl<'a> Parser<&'a str, Vec<TestCaseRecord>> for EmptyParser {
//!     fn parse(&self, _raw: &'a str, _config: &ReportConfig) -> Result<Vec<TestCaseRecord>, EvaluatorError> {
//!         Ok(vec![])
//!     }
//! }
//! ```

use util::report_config::ReportConfig;

use crate::error::EvaluatorError;

/// A generic trait for parsing raw log input into a strongly-typed Rust structure.
///
/// # Type Parameters
///
/// * `Input` - The input type to be parsed.
/// * `Output` - The output type produced by the parser.
pub trait Parser<Input, Output> {
    /// Parse an input value into the target type.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluatorError`] if the input does not conform to the expected schema
    /// or cannot be parsed.
    fn parse(&self, input: Input, config: &ReportConfig) -> Result<Output, EvaluatorError>;
}
