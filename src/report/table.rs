//! Report tables
//!
//! A [`Table`] is a 2-D mapping from (row key, column) to a [`Cell`],
//! with row keys allowed to span several columns (pivot breakdowns key by
//! `[sourceType, type]`). Columns sit inside named groups so merged tables
//! carry a deployment-name level above the column labels.

use crate::types::Cell;

/// A named group of columns. Ungrouped tables use one group with an empty
/// name; merging assigns each input table's columns to a group named after
/// its deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnGroup {
    /// Group label (deployment name), empty for ungrouped tables
    pub name: String,
    /// Column labels inside the group
    pub columns: Vec<String>,
}

/// One table row: its key values plus one cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Row key, one value per index column
    pub key: Vec<String>,
    /// Data cells, one per column across all groups
    pub cells: Vec<Cell>,
}

/// A report table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Names of the row-key columns
    pub index_names: Vec<String>,
    /// Column groups, left to right
    pub groups: Vec<ColumnGroup>,
    /// Rows in insertion order
    pub rows: Vec<Row>,
}

impl Table {
    /// Create an ungrouped table with the given index and column labels
    pub fn new(index_names: Vec<String>, columns: Vec<String>) -> Self {
        Self {
            index_names,
            groups: vec![ColumnGroup {
                name: String::new(),
                columns,
            }],
            rows: Vec::new(),
        }
    }

    /// Append a row. `cells` must have one entry per column.
    pub fn push_row(&mut self, key: Vec<String>, cells: Vec<Cell>) {
        debug_assert_eq!(cells.len(), self.width());
        self.rows.push(Row { key, cells });
    }

    /// Total number of data columns across all groups
    pub fn width(&self) -> usize {
        self.groups.iter().map(|g| g.columns.len()).sum()
    }

    /// Whether any group carries a name (i.e. the table was merged)
    pub fn is_grouped(&self) -> bool {
        self.groups.iter().any(|g| !g.name.is_empty())
    }

    /// Look up a row by key
    pub fn row(&self, key: &[String]) -> Option<&Row> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Merge same-named report tables from several deployments into one
    /// table with a deployment-name column level.
    ///
    /// Row keys are the union across inputs, in first-seen order; a
    /// deployment missing a row contributes empty cells for it.
    pub fn merge(named: Vec<(String, Table)>) -> Table {
        let index_names = named
            .first()
            .map(|(_, t)| t.index_names.clone())
            .unwrap_or_default();

        let mut groups = Vec::with_capacity(named.len());
        for (name, table) in &named {
            let columns = table
                .groups
                .iter()
                .flat_map(|g| g.columns.iter().cloned())
                .collect();
            groups.push(ColumnGroup {
                name: name.clone(),
                columns,
            });
        }

        // Union of row keys, first-seen order.
        let mut keys: Vec<Vec<String>> = Vec::new();
        for (_, table) in &named {
            for row in &table.rows {
                if !keys.contains(&row.key) {
                    keys.push(row.key.clone());
                }
            }
        }

        let mut rows = Vec::with_capacity(keys.len());
        for key in keys {
            let mut cells = Vec::new();
            for (_, table) in &named {
                match table.row(&key) {
                    Some(row) => cells.extend(row.cells.iter().cloned()),
                    None => cells.extend(std::iter::repeat(Cell::Empty).take(table.width())),
                }
            }
            rows.push(Row { key, cells });
        }

        Table {
            index_names,
            groups,
            rows,
        }
    }
}
