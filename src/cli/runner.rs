//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{load_deployments, PropertiesConfig};
use crate::error::{Error, Result};
use crate::export::{export_hive_table_metadata, write_workbook};
use crate::http::SolrClient;
use crate::report::{Analyzer, Comparator};
use crate::solr::SolrServer;
use crate::types::OptionStringExt;
use std::path::{Path, PathBuf};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::ExportHiveMetadata {
                hostname,
                port,
                username,
                password,
                output,
                database,
            } => {
                // An empty database argument means no filter.
                let database = database.clone().none_if_empty();
                self.export_hive_metadata(
                    hostname,
                    *port,
                    username,
                    password,
                    output,
                    database.as_deref(),
                )
                .await
            }
            Commands::Compare { config, output } => self.compare(config, output).await,
            Commands::Report { config } => self.report(config).await,
        }
    }

    async fn export_hive_metadata(
        &self,
        hostname: &str,
        port: u16,
        username: &str,
        password: &str,
        output: &Path,
        database: Option<&str>,
    ) -> Result<()> {
        let server = SolrServer::new(SolrClient::connect(hostname, port, username, password));
        let result = export_hive_table_metadata(&server, database, output).await?;
        info!(
            "Wrote {} rows ({} columns) to {}",
            result.rows_written,
            result.headers.len(),
            output.display()
        );
        Ok(())
    }

    async fn compare(&self, config: &Path, output: &Path) -> Result<()> {
        let deployments = load_deployments(config)?;
        if deployments.is_empty() {
            return Err(Error::config(format!(
                "no deployments found in {}",
                config.display()
            )));
        }

        let analyzers: Vec<Analyzer> = deployments
            .into_iter()
            .map(|d| Analyzer::connect(d.name, d.host, d.port, d.username, d.password))
            .collect();

        // A single deployment gets a plain report, no deployment-name level.
        let sheets = if analyzers.len() == 1 {
            analyzers[0].standard_report().await?
        } else {
            Comparator::new(analyzers).standard_report().await?
        };

        write_workbook(&sheets, output)?;
        info!("Wrote {}", output.display());
        Ok(())
    }

    async fn report(&self, config: &Path) -> Result<()> {
        let props = PropertiesConfig::load(config)?;
        let (host, port) = props.navigator_endpoint()?;

        let analyzer = Analyzer::connect(
            props.get("client_name")?,
            host,
            port,
            props.get("username")?,
            props.get("password")?,
        );

        let output_dir = PathBuf::from(props.get("output_directory")?);
        std::fs::create_dir_all(&output_dir)?;
        let output = output_dir.join("nav.xlsx");

        let sheets = analyzer.standard_report().await?;
        write_workbook(&sheets, &output)?;
        info!("Wrote {}", output.display());
        Ok(())
    }
}
