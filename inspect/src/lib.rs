//! Inspector for number format data.
//!
//! Backs the `numfmt-inspect` binary, which prints the locales, number
//! systems, patterns, style classes, and grouping digits a configuration
//! exposes, either as text or as JSON.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Errors reported to the user
//! - [`output`] - Human-readable and JSON rendering
//! - [`report`] - Query execution against the format table

pub mod cli;
pub mod error;
pub mod output;
pub mod report;
