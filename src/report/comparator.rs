//! Side-by-side comparison across deployments

use super::analyzer::Analyzer;
use super::table::Table;
use crate::error::Result;

/// Runs the summary battery against several deployments and merges
/// same-named results into one table per report.
///
/// Deployments are queried one after another; each query completes before
/// the next is issued.
pub struct Comparator {
    analyzers: Vec<Analyzer>,
}

impl Comparator {
    /// Compare the given deployments
    pub fn new(analyzers: Vec<Analyzer>) -> Self {
        Self { analyzers }
    }

    /// The deployments under comparison
    pub fn analyzers(&self) -> &[Analyzer] {
        &self.analyzers
    }

    /// Merged per-core document counts and index sizes
    pub async fn summary_stats(&self) -> Result<Table> {
        let mut named = Vec::with_capacity(self.analyzers.len());
        for analyzer in &self.analyzers {
            named.push((analyzer.name().to_string(), analyzer.summary_stats().await?));
        }
        Ok(Table::merge(named))
    }

    /// Merged HDFS file size statistics
    pub async fn hdfs_stats(&self) -> Result<Table> {
        let mut named = Vec::with_capacity(self.analyzers.len());
        for analyzer in &self.analyzers {
            named.push((analyzer.name().to_string(), analyzer.hdfs_stats().await?));
        }
        Ok(Table::merge(named))
    }

    /// Merged entity-count breakdowns
    pub async fn count_breakdown(&self) -> Result<Table> {
        let mut named = Vec::with_capacity(self.analyzers.len());
        for analyzer in &self.analyzers {
            named.push((
                analyzer.name().to_string(),
                analyzer.count_breakdown().await?,
            ));
        }
        Ok(Table::merge(named))
    }

    /// Merged deletion-age histograms
    pub async fn deleted_stats(&self, fq: Option<&str>) -> Result<Table> {
        let mut named = Vec::with_capacity(self.analyzers.len());
        for analyzer in &self.analyzers {
            named.push((
                analyzer.name().to_string(),
                analyzer.deleted_stats(fq).await?,
            ));
        }
        Ok(Table::merge(named))
    }

    /// Merged creation-time histograms
    pub async fn create_stats(&self, fq: Option<&str>) -> Result<Table> {
        let mut named = Vec::with_capacity(self.analyzers.len());
        for analyzer in &self.analyzers {
            named.push((
                analyzer.name().to_string(),
                analyzer.create_stats(fq).await?,
            ));
        }
        Ok(Table::merge(named))
    }

    /// The full battery, merged, one named table per report sheet
    pub async fn standard_report(&self) -> Result<Vec<(String, Table)>> {
        Ok(vec![
            ("Summary Stats".to_string(), self.summary_stats().await?),
            ("HDFS Stats".to_string(), self.hdfs_stats().await?),
            ("Counts Breakdown".to_string(), self.count_breakdown().await?),
            (
                "Deleted HDFS Entities".to_string(),
                self.deleted_stats(Some("sourceType:HDFS")).await?,
            ),
            (
                "Created HDFS Entities".to_string(),
                self.create_stats(Some("sourceType:HDFS")).await?,
            ),
            (
                "Created Hive Tables".to_string(),
                self.create_stats(Some("sourceType:HIVE AND type:TABLE")).await?,
            ),
        ])
    }
}
