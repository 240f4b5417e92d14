//! Output formatting for scenario results
//!
//! Provides colored CLI output and the summary report.

pub mod cli;

pub use cli::{CliOutput, OutputLevel};
