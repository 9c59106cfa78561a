//! Pivot tree flattening and facet pair-list reshaping

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::Deserialize;

/// Placeholder for levels a shorter path doesn't reach. A single space
/// rather than an empty string so spreadsheet cells don't merge.
pub const PAD: &str = " ";

/// One node of a facet pivot tree.
///
/// Depth is bounded by the number of requested pivot fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PivotNode {
    /// Field this level pivots on (reported by the server)
    #[serde(default)]
    pub field: Option<String>,
    /// Facet value at this level
    pub value: JsonValue,
    /// Document count for this value
    pub count: u64,
    /// Child pivots, absent at the deepest level
    #[serde(default)]
    pub pivot: Option<Vec<PivotNode>>,
}

/// One flattened pivot row: the path values padded to uniform depth,
/// plus the node's count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRow {
    /// Path values, padded with [`PAD`] to `tot_levels` entries
    pub values: Vec<String>,
    /// Document count at this node
    pub count: u64,
}

/// Flatten a pivot tree into rows, one per node, in server order.
///
/// Every node emits exactly one row (a childless node included): the values
/// along its path, padded with [`PAD`] up to `tot_levels`, plus its count.
/// Parents precede their children, matching the traversal order the server
/// reported.
pub fn flatten_pivot(nodes: &[PivotNode], tot_levels: usize) -> Vec<PivotRow> {
    let mut rows = Vec::new();
    let mut prefix = Vec::new();
    walk(nodes, &mut prefix, tot_levels, &mut rows);
    rows
}

fn walk(
    nodes: &[PivotNode],
    prefix: &mut Vec<String>,
    tot_levels: usize,
    out: &mut Vec<PivotRow>,
) {
    for node in nodes {
        let value = value_string(&node.value);

        let mut values = prefix.clone();
        values.push(value.clone());
        while values.len() < tot_levels {
            values.push(PAD.to_string());
        }
        out.push(PivotRow {
            values,
            count: node.count,
        });

        if let Some(children) = &node.pivot {
            prefix.push(value);
            walk(children, prefix, tot_levels, out);
            prefix.pop();
        }
    }
}

/// Reshape an interleaved `[label, count, label, count, ...]` facet list
/// into `(label, count)` pairs, preserving order.
pub fn pair_counts(data: &[JsonValue]) -> Result<Vec<(String, u64)>> {
    let mut pairs = Vec::with_capacity(data.len() / 2);
    for chunk in data.chunks_exact(2) {
        let label = value_string(&chunk[0]);
        let count = chunk[1]
            .as_u64()
            .ok_or_else(|| Error::shape(format!("facet count for '{label}' is not an integer")))?;
        pairs.push((label, count));
    }
    Ok(pairs)
}

/// Render a facet value for a row. Strings pass through unquoted; other
/// JSON values (numbers, booleans, null) use their JSON rendering.
fn value_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
