//! Per-deployment summary statistics

use super::table::Table;
use crate::error::{Error, Result};
use crate::http::SolrClient;
use crate::solr::{frange, join_fq, Query, SolrServer};
use crate::types::{Cell, Document};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// One day in epoch milliseconds.
const DAY_MS: i64 = 86_400_000;

/// Deletion-age bucket boundaries, in days back from the newest deletion.
const BREAK_POINTS: [i64; 7] = [0, 1, 7, 30, 90, 365, 730];

/// Labels for the deletion-age buckets, oldest boundary last.
const AGE_LABELS: [&str; 6] = ["1 day", "1 week", "1 month", "3 months", "1 year", "2 years"];

/// Label of the catch-all bucket below the last range bucket's lower bound.
const INVALID_LABEL: &str = "invalid deleteTime";

/// Stats reported per core by `summary_stats`.
const SUMMARY_FIELDS: [&str; 3] = ["indexHeapUsageBytes", "numDocs", "size"];

/// Stats reported by `hdfs_stats`.
const HDFS_SIZE_STATS: [&str; 4] = ["max", "sum", "mean", "stddev"];

/// Strips the `hdfs://authority` prefix off a full filesystem path.
static PATH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("^(?:hdfs://[^/]*)(.*)").expect("valid regex"));

/// Runs the summary battery against one named deployment.
pub struct Analyzer {
    name: String,
    server: SolrServer,
}

impl Analyzer {
    /// Wrap an existing server handle
    pub fn new(name: impl Into<String>, server: SolrServer) -> Self {
        Self {
            name: name.into(),
            server,
        }
    }

    /// Connect to a deployment by host/port/credentials
    pub fn connect(
        name: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            SolrServer::new(SolrClient::connect(host, port, username, password)),
        )
    }

    /// Deployment name used in merged reports
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The deployment's server handle
    pub fn server(&self) -> &SolrServer {
        &self.server
    }

    /// Document count and index size for each core.
    ///
    /// Stats as rows, cores as columns.
    pub async fn summary_stats(&self) -> Result<Table> {
        let resp = self.server.core_admin_status(None).await?;
        let core_names: Vec<String> = resp.status.keys().cloned().collect();

        let mut table = Table::new(vec!["stats".to_string()], core_names);
        for field in SUMMARY_FIELDS {
            let mut cells = Vec::with_capacity(resp.status.len());
            for status in resp.status.values() {
                let value = status
                    .index
                    .get(field)
                    .ok_or_else(|| Error::missing_field(format!("index.{field}")))?;
                cells.push(Cell::from_json(value));
            }
            table.push_row(vec![field.to_string()], cells);
        }
        Ok(table)
    }

    /// HDFS file size summary statistics (non-deleted only)
    pub async fn hdfs_stats(&self) -> Result<Table> {
        let stats = self
            .server
            .elements()
            .stats("size", "sourceType:HDFS AND type:FILE AND -deleted:true")
            .await?;

        let mut table = Table::new(vec!["stats".to_string()], vec!["size".to_string()]);
        for name in HDFS_SIZE_STATS {
            let cell = stats.stat(name).map_or(Cell::Empty, Cell::from_json);
            table.push_row(vec![name.to_string()], vec![cell]);
        }
        Ok(table)
    }

    /// Entity counts by source type (HDFS, Yarn, etc) and entity type
    /// (File, Operation, etc) for non-deleted entities only
    pub async fn count_breakdown(&self) -> Result<Table> {
        let fields = ["sourceType", "type"];
        let nodes = self.server.elements().pivot(&fields, "-deleted:true").await?;
        let rows = crate::facet::flatten_pivot(&nodes, fields.len());

        let mut table = Table::new(
            fields.iter().map(ToString::to_string).collect(),
            vec!["count".to_string()],
        );
        for row in rows {
            table.push_row(row.values, vec![Cell::from(row.count)]);
        }
        Ok(table)
    }

    /// Deletion-age histogram over fixed buckets.
    ///
    /// Probes min/max `deleteTime` with a range query, then issues one keyed
    /// counting query per bucket plus a final catch-all for everything at or
    /// below the last bucket's lower bound.
    pub async fn deleted_stats(&self, fq: Option<&str>) -> Result<Table> {
        let fq = join_fq(fq.unwrap_or(""), "deleted:true");
        let elements = self.server.elements();

        let probe_fq = join_fq(&fq, &frange("deleteTime", Some(0), None, false, true, None));
        let stats = elements.stats("deleteTime", &probe_fq).await?;
        let min_date = stats
            .stat_i64("min")
            .ok_or_else(|| Error::shape("deleteTime stats reported no numeric min"))?;
        let max_date = stats
            .stat_i64("max")
            .ok_or_else(|| Error::shape("deleteTime stats reported no numeric max"))?;

        let buckets = deletion_age_buckets(min_date, max_date);
        let catch_all_upper = buckets.last().map_or(min_date, |b| b.lower);

        let mut queries: Vec<String> = buckets
            .iter()
            .map(|b| {
                frange(
                    "deleteTime",
                    Some(b.lower),
                    Some(b.upper),
                    false,
                    true,
                    Some(b.label),
                )
            })
            .collect();
        queries.push(frange(
            "deleteTime",
            None,
            Some(catch_all_upper),
            true,
            true,
            Some(INVALID_LABEL),
        ));

        let counts = elements.facet_query(&queries, &fq).await?;

        let mut table = Table::new(
            vec!["Date Range".to_string()],
            vec!["Deleted".to_string()],
        );
        let labels = buckets
            .iter()
            .map(|b| b.label)
            .chain(std::iter::once(INVALID_LABEL));
        for label in labels {
            if let Some(count) = counts.get(label) {
                table.push_row(vec![label.to_string()], vec![Cell::from(*count)]);
            }
        }
        Ok(table)
    }

    /// Creation-time histogram over the default trailing year, by month
    pub async fn create_stats(&self, fq: Option<&str>) -> Result<Table> {
        self.create_stats_range("NOW-1YEAR", "NOW", "+1MONTH", fq)
            .await
    }

    /// Creation-time histogram over an explicit range
    pub async fn create_stats_range(
        &self,
        start: &str,
        end: &str,
        gap: &str,
        fq: Option<&str>,
    ) -> Result<Table> {
        let fq = join_fq(fq.unwrap_or(""), "created:[* TO *] AND -deleted:true");
        let buckets = self
            .server
            .elements()
            .facet_range("created", start, end, gap, &fq)
            .await?;

        let mut table = Table::new(vec!["Date".to_string()], vec!["Created".to_string()]);
        for (label, count) in buckets {
            table.push_row(vec![range_label(&label)], vec![Cell::from(count)]);
        }
        Ok(table)
    }

    /// Hive tables with the most partitions, with the HDFS subdirectory
    /// count under each table's location for comparison.
    pub async fn top_partitions(&self, n: u32) -> Result<Table> {
        let fq = "type:PARTITION AND sourceType:HIVE AND -deleted:true";
        let pairs = self
            .server
            .elements()
            .facet_field("parentPath", fq, n, 1)
            .await?;

        let mut dbs = Vec::with_capacity(pairs.len());
        let mut tables = Vec::with_capacity(pairs.len());
        for (parent_path, _) in &pairs {
            let parts: Vec<&str> = parent_path.split('/').filter(|p| !p.is_empty()).collect();
            let [db, table] = parts.as_slice() else {
                return Err(Error::shape(format!(
                    "partition parentPath '{parent_path}' is not /db/table"
                )));
            };
            dbs.push(db.to_string());
            tables.push(table.to_string());
        }

        let subdir_counts = self.hdfs_subdir_counts(&dbs, &tables).await?;

        let mut out = Table::new(
            vec!["parentPath".to_string()],
            vec![
                "partition_count".to_string(),
                "Database".to_string(),
                "Table".to_string(),
                "hdfs_subdir_count".to_string(),
            ],
        );
        for (i, (parent_path, count)) in pairs.into_iter().enumerate() {
            out.push_row(
                vec![parent_path],
                vec![
                    Cell::from(count),
                    Cell::from(dbs[i].clone()),
                    Cell::from(tables[i].clone()),
                    Cell::from(subdir_counts[i]),
                ],
            );
        }
        Ok(out)
    }

    /// The full battery, one named table per report sheet
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

    async fn hdfs_subdir_counts(&self, dbs: &[String], tables: &[String]) -> Result<Vec<u64>> {
        let mut counts = Vec::with_capacity(dbs.len());
        for i in (0..dbs.len()).step_by(30) {
            let end = (i + 30).min(dbs.len());
            counts.extend(self.subdir_chunk(&dbs[i..end], &tables[i..end]).await?);
        }
        Ok(counts)
    }

    async fn subdir_chunk(&self, dbs: &[String], tables: &[String]) -> Result<Vec<u64>> {
        let clauses: Vec<String> = dbs
            .iter()
            .zip(tables)
            .map(|(db, table)| format!("(parentPath:\\/{db} AND originalName:{table})"))
            .collect();
        let table_query = format!(
            "sourceType:HIVE AND type:TABLE AND ({})",
            clauses.join(" OR ")
        );

        let elements = self.server.elements();
        let docs = elements
            .scan_rows(Query::new().fq(table_query), dbs.len() as u32)
            .collect()
            .await?;

        let mut count_map: HashMap<(String, String), u64> = HashMap::new();
        for doc in docs {
            let parent = field_str(&doc, "parentPath")?;
            let original = field_str(&doc, "originalName")?;
            let path = file_system_path(&field_str(&doc, "fileSystemPath")?)?;

            let query = format!(
                "sourceType:HDFS AND type:DIRECTORY AND \
                 -fileSystemPath:\\{path}/*.hive-staging* AND fileSystemPath:\\{path}/*"
            );
            let count = elements.get_count(&query, "").await?;

            let key = parent.strip_prefix('/').unwrap_or(&parent).to_string();
            count_map.insert((key, original), count);
        }

        let mut counts = Vec::with_capacity(dbs.len());
        for (db, table) in dbs.iter().zip(tables) {
            let count = count_map
                .get(&(db.clone(), table.clone()))
                .copied()
                .ok_or_else(|| {
                    Error::shape(format!("no table entity found for /{db}/{table}"))
                })?;
            counts.push(count);
        }
        Ok(counts)
    }
}

/// One deletion-age range bucket, `(lower, upper]` in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AgeBucket {
    pub label: &'static str,
    pub lower: i64,
    pub upper: i64,
}

/// Compute the deletion-age range buckets between the observed min and max
/// deletion timestamps.
///
/// Bucket `i` spans `(max - bp[i+1] days, max - bp[i] days]`, with the lower
/// bound clamped to the observed minimum; the loop stops after the first
/// bucket that clamps. Boundaries are exact [`DAY_MS`] multiples from the
/// maximum, strictly decreasing, and never fall below the minimum. The
/// catch-all for values at or below the last lower bound is issued
/// separately so its label never collides with a range bucket.
pub(crate) fn deletion_age_buckets(min_date: i64, max_date: i64) -> Vec<AgeBucket> {
    let mut buckets = Vec::new();
    for (i, label) in AGE_LABELS.iter().copied().enumerate() {
        let upper = max_date - BREAK_POINTS[i] * DAY_MS;
        let lower = (max_date - BREAK_POINTS[i + 1] * DAY_MS).max(min_date);
        buckets.push(AgeBucket {
            label,
            lower,
            upper,
        });
        if lower == min_date {
            break;
        }
    }
    buckets
}

/// First string value of a document field (first element for multi-valued
/// fields).
pub(crate) fn field_str(doc: &Document, name: &str) -> Result<String> {
    let value = doc
        .get(name)
        .ok_or_else(|| Error::missing_field(name.to_string()))?;
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Array(items) => items
            .first()
            .and_then(|v| v.as_str())
            .map(ToString::to_string)
            .ok_or_else(|| Error::shape(format!("field '{name}' has no string value"))),
        other => Ok(other.to_string()),
    }
}

/// Render a range facet bucket label: Solr reports ISO timestamps, the
/// report shows calendar dates.
pub(crate) fn range_label(label: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(label)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| label.to_string())
}

/// `hdfs://authority/path` -> `/path`
pub(crate) fn file_system_path(full_path: &str) -> Result<String> {
    PATH_PATTERN
        .captures(full_path)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::shape(format!("'{full_path}' is not an hdfs:// path")))
}
