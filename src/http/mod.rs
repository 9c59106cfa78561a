//! HTTP module
//!
//! An explicitly owned Solr HTTP client handle with basic auth,
//! bounded retries for idempotent GETs, and form-encoded POST queries.

mod client;

pub use client::{SolrClient, SolrClientConfig, SolrClientConfigBuilder};

#[cfg(test)]
mod tests;
