//! Report aggregation
//!
//! An [`Analyzer`] runs the fixed battery of summary queries against one
//! deployment; a [`Comparator`] runs the same battery against several and
//! merges the results side by side under a deployment-name column level.

mod analyzer;
mod comparator;
mod table;

pub use analyzer::Analyzer;
pub use comparator::Comparator;
pub use table::{ColumnGroup, Row, Table};

#[cfg(test)]
mod tests;
