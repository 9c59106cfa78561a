//! CLI module
//!
//! Command-line interface for the reporting tools.
//!
//! # Commands
//!
//! - `export-hive-metadata` - Export Hive table metadata to CSV
//! - `compare` - Compare deployments and write a workbook
//! - `report` - Generate the standard report workbook from a properties config

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
