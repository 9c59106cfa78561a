// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # navrep
//!
//! Summary statistics, deployment comparisons, and metadata exports for
//! Solr-backed data catalogs.
//!
//! ## Features
//!
//! - **Cursor scans**: lazy, restartable deep paging over stable-sorted
//!   result sets with `cursorMark` fixed-point termination
//! - **Facet reshaping**: pivot trees, field facets and range facets
//!   flattened into plain tabular rows
//! - **Report battery**: per-core summaries, size statistics, entity-type
//!   breakdowns, deletion-age and creation-time histograms
//! - **Comparisons**: the same battery across deployments, merged side by
//!   side under a deployment-name column level
//! - **Exports**: CSV and multi-sheet xlsx workbooks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use navrep::http::SolrClient;
//! use navrep::report::Analyzer;
//! use navrep::solr::SolrServer;
//!
//! #[tokio::main]
//! async fn main() -> navrep::Result<()> {
//!     let server = SolrServer::new(SolrClient::connect("localhost", 7187, "user", "pw"));
//!     let analyzer = Analyzer::new("customer1", server);
//!
//!     for (name, table) in analyzer.standard_report().await? {
//!         println!("{name}: {} rows", table.rows.len());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with basic auth and bounded retries
pub mod http;

/// Cursor-mark pagination strategies
pub mod pagination;

/// Solr server/core access, queries, schema
pub mod solr;

/// Facet response flattening
pub mod facet;

/// Report aggregation and cross-deployment comparison
pub mod report;

/// CSV and workbook export
pub mod export;

/// Configuration file formats
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
