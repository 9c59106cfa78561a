//! Tabular export
//!
//! CSV and multi-sheet workbook writers for report tables, plus the Hive
//! table metadata export.

mod csv;
mod excel;
mod hive;

pub use self::csv::write_table_csv;
pub use excel::write_workbook;
pub use hive::{export_hive_table_metadata, HiveMetadataExport};
