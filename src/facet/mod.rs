//! Facet response reshaping
//!
//! Solr reports facet results in three awkward shapes: nested pivot trees,
//! interleaved label/count arrays, and range buckets. This module flattens
//! all of them into plain rows, preserving the server's reported order.

mod pivot;

pub use pivot::{flatten_pivot, pair_counts, PivotNode, PivotRow, PAD};

#[cfg(test)]
mod tests;
