//! Typed response envelopes for the Solr wire format
//!
//! Only the fields the crate consumes are modeled; everything else in a
//! response is ignored. Missing sections surface as `None` so callers can
//! turn absence into the appropriate shape error.

use crate::facet::PivotNode;
use crate::types::{Document, JsonObject, JsonValue};
use serde::Deserialize;
use std::collections::HashMap;

/// Envelope of a `/select` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectResponse {
    /// Matched documents and total hit count
    pub response: ResponseBody,
    /// Deep-paging cursor for the next page, when `cursorMark` was sent
    #[serde(rename = "nextCursorMark")]
    pub next_cursor_mark: Option<String>,
    /// Facet sections, when faceting was requested
    #[serde(default)]
    pub facet_counts: Option<FacetCounts>,
    /// Stats sections, when stats were requested
    #[serde(default)]
    pub stats: Option<StatsSection>,
}

/// The `response` section: hit count plus the page of documents.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseBody {
    /// Total number of matching documents
    #[serde(rename = "numFound")]
    pub num_found: u64,
    /// Documents in this page
    #[serde(default)]
    pub docs: Vec<Document>,
}

/// The `facet_counts` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacetCounts {
    /// Keyed facet query counts
    #[serde(default)]
    pub facet_queries: HashMap<String, u64>,
    /// Field facets as interleaved `[label, count, ...]` lists
    #[serde(default)]
    pub facet_fields: HashMap<String, Vec<JsonValue>>,
    /// Range facets keyed by field
    #[serde(default)]
    pub facet_ranges: HashMap<String, RangeFacet>,
    /// Pivot facets keyed by the comma-joined field list
    #[serde(default)]
    pub facet_pivot: HashMap<String, Vec<PivotNode>>,
}

/// One range facet: interleaved `[label, count, ...]` buckets.
#[derive(Debug, Clone, Deserialize)]
pub struct RangeFacet {
    /// Interleaved bucket labels and counts
    #[serde(default)]
    pub counts: Vec<JsonValue>,
    /// Bucket width the server applied
    #[serde(default)]
    pub gap: Option<JsonValue>,
    /// Range start the server applied
    #[serde(default)]
    pub start: Option<JsonValue>,
    /// Range end the server applied
    #[serde(default)]
    pub end: Option<JsonValue>,
}

/// The `stats` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsSection {
    /// Per-field statistics
    #[serde(default)]
    pub stats_fields: HashMap<String, StatsField>,
}

/// Statistics for one field.
///
/// Values stay as raw JSON: numeric fields report numbers, date fields
/// report ISO strings for min/max.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsField {
    #[serde(default)]
    pub min: Option<JsonValue>,
    #[serde(default)]
    pub max: Option<JsonValue>,
    #[serde(default)]
    pub sum: Option<JsonValue>,
    #[serde(default)]
    pub mean: Option<JsonValue>,
    #[serde(default)]
    pub stddev: Option<JsonValue>,
    #[serde(default)]
    pub count: Option<JsonValue>,
    #[serde(default)]
    pub missing: Option<JsonValue>,
}

impl StatsField {
    /// Look up a stat by name.
    pub fn stat(&self, name: &str) -> Option<&JsonValue> {
        match name {
            "min" => self.min.as_ref(),
            "max" => self.max.as_ref(),
            "sum" => self.sum.as_ref(),
            "mean" => self.mean.as_ref(),
            "stddev" => self.stddev.as_ref(),
            "count" => self.count.as_ref(),
            "missing" => self.missing.as_ref(),
            _ => None,
        }
    }

    /// Integer view of a stat (floats with no fraction included).
    pub fn stat_i64(&self, name: &str) -> Option<i64> {
        let value = self.stat(name)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
    }
}

/// Response of the core admin `STATUS` action.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoreAdminResponse {
    /// Status per core name
    #[serde(default)]
    pub status: std::collections::BTreeMap<String, CoreStatus>,
}

/// Status of a single core.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoreStatus {
    /// Index-level figures (`numDocs`, `size`, `indexHeapUsageBytes`, ...).
    /// Kept free-form: the set of figures varies by Solr version.
    #[serde(default)]
    pub index: JsonObject,
}
