//! # Utilities
//!
//! Helpers shared across the `evaluator` crate.
//!
//! - [`file_loader`]: Size-checked loading of log files.
//! - [`csv`]: RFC 4180 field quoting for the CSV writers.

pub mod csv;
pub mod file_loader;
