//! Command-line front end for the evaluator.
//!
//! - [`cli`]: Argument definitions.
//! - [`commands`]: `report` and `pending` implementations.
//! - [`console`]: Colored run summary.

pub mod cli;
pub mod commands;
pub mod console;
