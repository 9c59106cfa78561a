//! Per-core queries and the cursor-driven document scan

use super::query::terms;
use super::response::{SelectResponse, StatsField};
use super::schema::SolrSchema;
use super::server::SolrServer;
use crate::error::{Error, Result};
use crate::facet::{pair_counts, PivotNode};
use crate::pagination::{CursorMarkPaginator, PaginationState, Paginator, SinglePage};
use crate::types::{Document, ParamList};
use futures::Stream;
use std::collections::VecDeque;

/// Rows fetched per page during a full scan.
pub const DEFAULT_BATCH_SIZE: u32 = 100_000;

/// Identities per `{!terms}` lookup chunk.
const TERMS_CHUNK: usize = 50 * 1024;

// ============================================================================
// Query
// ============================================================================

/// One `/select` query. Immutable per call; build it up, then hand it to a
/// core method by reference.
#[derive(Debug, Clone)]
pub struct Query {
    /// Main query expression
    pub q: String,
    /// Filter query expression
    pub fq: String,
    /// Sort expression; required for full scans
    pub sort: String,
    /// Field list to return, all fields when `None`
    pub fl: Option<String>,
    /// Row count for plain selects (facet/stats queries use 0)
    pub rows: u32,
    /// Extra parameters (`facet.*`, `stats.*`, ...); pairs, not a map,
    /// because keys may repeat
    pub extra: ParamList,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            q: "*:*".to_string(),
            fq: String::new(),
            sort: String::new(),
            fl: None,
            rows: 0,
            extra: Vec::new(),
        }
    }
}

impl Query {
    /// A match-all query
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the main query expression
    #[must_use]
    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = q.into();
        self
    }

    /// Set the filter query
    #[must_use]
    pub fn fq(mut self, fq: impl Into<String>) -> Self {
        self.fq = fq.into();
        self
    }

    /// Set the sort expression
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Set the field list
    #[must_use]
    pub fn fl(mut self, fl: impl Into<String>) -> Self {
        self.fl = Some(fl.into());
        self
    }

    /// Set the row count
    #[must_use]
    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    /// Add an extra parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Render to wire parameters
    fn to_params(&self) -> ParamList {
        let mut params: ParamList = vec![
            ("q".to_string(), self.q.clone()),
            ("fq".to_string(), self.fq.clone()),
            ("rows".to_string(), self.rows.to_string()),
            ("indent".to_string(), "true".to_string()),
            ("wt".to_string(), "json".to_string()),
            ("sort".to_string(), self.sort.clone()),
        ];
        if let Some(fl) = &self.fl {
            params.push(("fl".to_string(), fl.clone()));
        }
        params.extend(self.extra.iter().cloned());
        params
    }

    /// Render to wire parameters with overrides applied last. An override
    /// replaces every earlier occurrence of its key.
    fn to_params_with(&self, overrides: &ParamList) -> ParamList {
        let mut params = self.to_params();
        for (key, value) in overrides {
            params.retain(|(k, _)| k != key);
            params.push((key.clone(), value.clone()));
        }
        params
    }
}

// ============================================================================
// SolrCore
// ============================================================================

/// Client view of one core on a server.
#[derive(Debug, Clone)]
pub struct SolrCore<'a> {
    server: &'a SolrServer,
    name: String,
    default_sort: Option<String>,
}

impl<'a> SolrCore<'a> {
    /// Create a view of `name` on `server`
    pub fn new(server: &'a SolrServer, name: impl Into<String>) -> Self {
        Self {
            server,
            name: name.into(),
            default_sort: None,
        }
    }

    /// Sort applied when a full scan is requested without one
    #[must_use]
    pub fn with_default_sort(mut self, sort: impl Into<String>) -> Self {
        self.default_sort = Some(sort.into());
        self
    }

    /// Core name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL of this core
    pub fn url(&self) -> String {
        format!("{}/{}", self.server.url(), self.name)
    }

    /// Execute a `/select` query
    pub async fn select(&self, query: &Query) -> Result<SelectResponse> {
        self.select_with(query, &Vec::new()).await
    }

    /// Execute a `/select` query with parameter overrides
    pub(crate) async fn select_with(
        &self,
        query: &Query,
        overrides: &ParamList,
    ) -> Result<SelectResponse> {
        let url = format!("{}/select", self.url());
        self.server
            .client()
            .post_json(&url, &query.to_params_with(overrides))
            .await
    }

    /// Count documents matching `q`/`fq`
    pub async fn get_count(&self, q: &str, fq: &str) -> Result<u64> {
        let query = Query::new().q(q).fq(fq).rows(0);
        let resp = self.select(&query).await?;
        Ok(resp.response.num_found)
    }

    /// Start a full scan of every document matching `query`, in sort order.
    ///
    /// Pagination correctness depends on a stable total order, so a missing
    /// sort (and no core default) is a configuration error — never an
    /// arbitrary order.
    pub fn scan(&self, query: Query) -> Result<DocScan<'a>> {
        self.scan_with_batch_size(query, DEFAULT_BATCH_SIZE)
    }

    /// Start a full scan with an explicit page size
    pub fn scan_with_batch_size(&self, mut query: Query, batch_size: u32) -> Result<DocScan<'a>> {
        if query.sort.is_empty() {
            match &self.default_sort {
                Some(sort) => query.sort = sort.clone(),
                None => return Err(Error::MissingSort),
            }
        }
        Ok(DocScan::new(
            self.clone(),
            query,
            ScanMode::Cursor(CursorMarkPaginator::new(batch_size)),
        ))
    }

    /// Capped, non-paginated mode: one bounded query yielding exactly one
    /// page of at most `rows` documents. No sort required.
    pub fn scan_rows(&self, query: Query, rows: u32) -> DocScan<'a> {
        DocScan::new(self.clone(), query, ScanMode::Single(SinglePage::new(rows)))
    }

    /// Fetch documents by identity, chunking ids into `{!terms}` lookups.
    pub async fn find_by_id(&self, ids: &[String], fl: Option<&str>) -> Result<Vec<Document>> {
        let mut docs = Vec::new();
        for chunk in ids.chunks(TERMS_CHUNK) {
            let mut query = Query::new().fq(terms("identity", chunk));
            if let Some(fl) = fl {
                query = query.fl(fl);
            }
            let mut scan = self.scan(query)?;
            while let Some(doc) = scan.next_doc().await? {
                docs.push(doc);
            }
        }
        Ok(docs)
    }

    /// Execute a facet pivot query and flatten-ready node tree.
    ///
    /// Returns the nodes for the comma-joined `fields` key, in server order.
    pub async fn pivot(&self, fields: &[&str], fq: &str) -> Result<Vec<PivotNode>> {
        let key = fields.join(",");
        let query = Query::new()
            .fq(fq)
            .param("facet", "true")
            .param("facet.pivot", key.as_str());
        let resp = self.select(&query).await?;
        resp.facet_counts
            .ok_or_else(|| Error::missing_field("facet_counts"))?
            .facet_pivot
            .remove(&key)
            .ok_or_else(|| Error::missing_field(format!("facet_pivot.{key}")))
    }

    /// Execute a stats query for one field
    pub async fn stats(&self, field: &str, fq: &str) -> Result<StatsField> {
        let query = Query::new()
            .fq(fq)
            .param("stats", "true")
            .param("stats.field", field);
        let resp = self.select(&query).await?;
        resp.stats
            .ok_or_else(|| Error::missing_field("stats"))?
            .stats_fields
            .remove(field)
            .ok_or_else(|| Error::missing_field(format!("stats.stats_fields.{field}")))
    }

    /// Execute a field facet query, returning `(label, count)` pairs in
    /// server order.
    pub async fn facet_field(
        &self,
        field: &str,
        fq: &str,
        limit: u32,
        mincount: u32,
    ) -> Result<Vec<(String, u64)>> {
        let query = Query::new()
            .fq(fq)
            .param("facet", "true")
            .param("facet.field", field)
            .param("facet.limit", limit.to_string())
            .param("facet.mincount", mincount.to_string());
        let resp = self.select(&query).await?;
        let data = resp
            .facet_counts
            .ok_or_else(|| Error::missing_field("facet_counts"))?
            .facet_fields
            .remove(field)
            .ok_or_else(|| Error::missing_field(format!("facet_fields.{field}")))?;
        pair_counts(&data)
    }

    /// Execute one or more facet queries, returning the keyed counts.
    pub async fn facet_query(
        &self,
        queries: &[String],
        fq: &str,
    ) -> Result<std::collections::HashMap<String, u64>> {
        let mut query = Query::new().fq(fq).param("facet", "true");
        for fquery in queries {
            query = query.param("facet.query", fquery.as_str());
        }
        let resp = self.select(&query).await?;
        Ok(resp
            .facet_counts
            .ok_or_else(|| Error::missing_field("facet_counts"))?
            .facet_queries)
    }

    /// Execute a range facet query, returning `(label, count)` buckets in
    /// server order.
    pub async fn facet_range(
        &self,
        field: &str,
        start: &str,
        end: &str,
        gap: &str,
        fq: &str,
    ) -> Result<Vec<(String, u64)>> {
        let query = Query::new()
            .fq(fq)
            .param("facet", "true")
            .param("facet.range", field)
            .param("facet.range.start", start)
            .param("facet.range.end", end)
            .param("facet.range.gap", gap);
        let resp = self.select(&query).await?;
        let range = resp
            .facet_counts
            .ok_or_else(|| Error::missing_field("facet_counts"))?
            .facet_ranges
            .remove(field)
            .ok_or_else(|| Error::missing_field(format!("facet_ranges.{field}")))?;
        pair_counts(&range.counts)
    }

    /// Fetch this core's schema as an explicit field-descriptor map
    pub async fn schema(&self) -> Result<SolrSchema> {
        let url = format!("{}/schema", self.url());
        let params = vec![("wt".to_string(), "json".to_string())];
        let raw = self.server.client().get_json(&url, &params).await?;
        Ok(SolrSchema::from_response(raw))
    }
}

// ============================================================================
// DocScan
// ============================================================================

#[derive(Debug)]
enum ScanMode {
    Cursor(CursorMarkPaginator),
    Single(SinglePage),
}

impl ScanMode {
    fn next_params(&self, state: &PaginationState) -> ParamList {
        match self {
            ScanMode::Cursor(p) => p.next_params(state),
            ScanMode::Single(p) => p.next_params(state),
        }
    }

    fn process_response(
        &self,
        new_cursor: Option<&str>,
        records: usize,
        state: &mut PaginationState,
    ) {
        match self {
            ScanMode::Cursor(p) => p.process_response(new_cursor, records, state),
            ScanMode::Single(p) => p.process_response(new_cursor, records, state),
        };
    }

    fn requires_cursor(&self) -> bool {
        matches!(self, ScanMode::Cursor(_))
    }
}

/// A lazy, finite sequence of documents.
///
/// Pulls one page at a time and buffers it; documents come out in the
/// server's sort order. Restartable from the start by re-invoking the scan
/// with the same query. A transport failure mid-scan surfaces the
/// underlying error and terminates the sequence — there is no
/// partial-result recovery.
#[derive(Debug)]
pub struct DocScan<'a> {
    core: SolrCore<'a>,
    query: Query,
    mode: ScanMode,
    state: PaginationState,
    buffer: VecDeque<Document>,
}

impl<'a> DocScan<'a> {
    fn new(core: SolrCore<'a>, query: Query, mode: ScanMode) -> Self {
        Self {
            core,
            query,
            mode,
            state: PaginationState::new(),
            buffer: VecDeque::new(),
        }
    }

    /// Next document, or `None` when the scan is exhausted.
    pub async fn next_doc(&mut self) -> Result<Option<Document>> {
        loop {
            if let Some(doc) = self.buffer.pop_front() {
                return Ok(Some(doc));
            }
            if self.state.done {
                return Ok(None);
            }
            self.fetch_page().await?;
        }
    }

    /// Drain the scan into a vector
    pub async fn collect(mut self) -> Result<Vec<Document>> {
        let mut docs = Vec::new();
        while let Some(doc) = self.next_doc().await? {
            docs.push(doc);
        }
        Ok(docs)
    }

    /// Adapt the scan into a `futures` stream of documents
    pub fn into_stream(self) -> impl Stream<Item = Result<Document>> + 'a {
        futures::stream::try_unfold(self, |mut scan| async move {
            Ok(scan.next_doc().await?.map(|doc| (doc, scan)))
        })
    }

    /// Total documents yielded so far
    pub fn total_fetched(&self) -> u64 {
        self.state.total_fetched
    }

    async fn fetch_page(&mut self) -> Result<()> {
        let overrides = self.mode.next_params(&self.state);
        let resp = self.core.select_with(&self.query, &overrides).await?;

        if self.mode.requires_cursor() && resp.next_cursor_mark.is_none() {
            return Err(Error::missing_field("nextCursorMark"));
        }

        let records = resp.response.docs.len();
        self.buffer.extend(resp.response.docs);
        self.mode
            .process_response(resp.next_cursor_mark.as_deref(), records, &mut self.state);
        Ok(())
    }
}

// ============================================================================
// RelationsCore
// ============================================================================

/// The lineage relations core, with endpoint-id extraction on top of the
/// plain core operations.
pub struct RelationsCore<'a> {
    core: SolrCore<'a>,
}

impl<'a> RelationsCore<'a> {
    pub(crate) fn new(core: SolrCore<'a>) -> Self {
        Self { core }
    }

    /// The underlying core view
    pub fn core(&self) -> &SolrCore<'a> {
        &self.core
    }

    /// Ids on the source side of matching relations
    pub async fn ep1_ids(&self, relation_query: &str) -> Result<Vec<String>> {
        self.endpoint_ids(relation_query, "endpoint1Ids").await
    }

    /// Ids on the target side of matching relations
    pub async fn ep2_ids(&self, relation_query: &str) -> Result<Vec<String>> {
        self.endpoint_ids(relation_query, "endpoint2Ids").await
    }

    /// Collect every id in `endpoint` across relations matching the query
    pub async fn endpoint_ids(&self, relation_query: &str, endpoint: &str) -> Result<Vec<String>> {
        let query = Query::new()
            .q(relation_query)
            .fl(format!("identity,{endpoint}"));
        let mut scan = self.core.scan(query)?;

        let mut ids = Vec::new();
        while let Some(doc) = scan.next_doc().await? {
            let values = doc
                .get(endpoint)
                .and_then(|v| v.as_array())
                .ok_or_else(|| Error::missing_field(endpoint))?;
            for value in values {
                if let Some(id) = value.as_str() {
                    ids.push(id.to_string());
                }
            }
        }
        Ok(ids)
    }
}
