//! Solr catalog access
//!
//! The server/core split mirrors Solr's own: a [`SolrServer`] wraps one
//! client handle and hands out [`SolrCore`] views for per-core queries —
//! `/select`, facets, stats, schema, and the cursor-driven document scan.

mod core;
mod query;
mod response;
mod schema;
mod server;

pub use self::core::{DocScan, Query, RelationsCore, SolrCore, DEFAULT_BATCH_SIZE};
pub use query::{frange, join_fq, terms};
pub use response::{
    CoreAdminResponse, CoreStatus, FacetCounts, RangeFacet, ResponseBody, SelectResponse,
    StatsField,
};
pub use schema::{FieldDescriptor, SolrSchema};
pub use server::{SolrServer, ELEMENTS_CORE, RELATIONS_CORE};
