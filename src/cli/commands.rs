//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Catalog reporting CLI
#[derive(Parser, Debug)]
#[command(name = "navrep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export Hive table metadata (name, description, tags, custom and
    /// managed properties) to CSV
    ExportHiveMetadata {
        /// Catalog hostname
        hostname: String,

        /// Catalog port
        port: u16,

        /// Basic auth user name
        username: String,

        /// Basic auth password
        password: String,

        /// Output CSV path
        output: PathBuf,

        /// Restrict the export to one database
        database: Option<String>,
    },

    /// Compare deployments from a config file and write a workbook
    ///
    /// The config lists one deployment per line as
    /// `name,host,port,user,password`; lines beginning with `#` are ignored.
    Compare {
        /// Deployments config path
        config: PathBuf,

        /// Output workbook path (.xlsx)
        output: PathBuf,
    },

    /// Generate the standard report workbook from a properties config
    ///
    /// The config is `key=value` lines; `navigator_url`, `client_name`,
    /// `username`, `password` and `output_directory` are required. The
    /// workbook is written to `<output_directory>/nav.xlsx`.
    Report {
        /// Properties config path
        config: PathBuf,
    },
}
