//! Server-level operations

use super::core::{RelationsCore, SolrCore};
use super::response::CoreAdminResponse;
use crate::error::Result;
use crate::http::SolrClient;
use crate::types::ParamList;

/// Core holding catalog entities (tables, files, operations).
pub const ELEMENTS_CORE: &str = "nav_elements";

/// Core holding lineage relations between entities.
pub const RELATIONS_CORE: &str = "nav_relations";

/// One catalog deployment's Solr service.
///
/// Owns the client handle; cores borrow from it for the duration of a query.
#[derive(Debug)]
pub struct SolrServer {
    client: SolrClient,
}

impl SolrServer {
    /// Wrap an already-configured client
    pub fn new(client: SolrClient) -> Self {
        Self { client }
    }

    /// The underlying client handle
    pub fn client(&self) -> &SolrClient {
        &self.client
    }

    /// Base URL of the Solr service
    pub fn url(&self) -> String {
        self.client.base_url()
    }

    /// View of an arbitrary core
    pub fn core(&self, name: impl Into<String>) -> SolrCore<'_> {
        SolrCore::new(self, name)
    }

    /// The entities core. Full scans default to `identity asc` so deep
    /// paging always has a stable total order.
    pub fn elements(&self) -> SolrCore<'_> {
        SolrCore::new(self, ELEMENTS_CORE).with_default_sort("identity asc")
    }

    /// The lineage relations core
    pub fn relations(&self) -> RelationsCore<'_> {
        RelationsCore::new(SolrCore::new(self, RELATIONS_CORE).with_default_sort("identity asc"))
    }

    /// Check core admin status. If `name` is unspecified, returns all cores.
    ///
    /// A 403 here means the deployment hasn't exposed its Solr cores; the
    /// error carries the remediation hint.
    pub async fn core_admin_status(&self, name: Option<&str>) -> Result<CoreAdminResponse> {
        let mut params: ParamList = vec![
            ("action".to_string(), "STATUS".to_string()),
            ("wt".to_string(), "json".to_string()),
        ];
        if let Some(core) = name {
            params.push(("core".to_string(), core.to_string()));
        }

        let url = format!("{}/admin/cores", self.url());
        self.client.get_json(&url, &params).await
    }
}
