//! CSV table writer

use crate::error::Result;
use crate::report::Table;
use crate::types::Cell;
use std::path::Path;

/// Write a report table as CSV with a fixed, header-declared column order.
///
/// Merged tables get a first header row repeating each deployment name over
/// its columns. Empty cells render as empty strings. The writer is flushed
/// before returning and closed on every exit path, early errors included,
/// so a failed export never leaves silently truncated output behind.
pub fn write_table_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    if table.is_grouped() {
        let mut record: Vec<String> = table.index_names.iter().map(|_| String::new()).collect();
        for group in &table.groups {
            record.extend(std::iter::repeat(group.name.clone()).take(group.columns.len()));
        }
        writer.write_record(&record)?;
    }

    let mut header = table.index_names.clone();
    for group in &table.groups {
        header.extend(group.columns.iter().cloned());
    }
    writer.write_record(&header)?;

    for row in &table.rows {
        let mut record = row.key.clone();
        record.extend(row.cells.iter().map(Cell::to_csv_field));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
