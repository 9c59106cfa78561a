//! Multi-sheet workbook writer

use crate::error::Result;
use crate::report::Table;
use crate::types::Cell;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// Write one named sheet per report table into a single workbook.
pub fn write_workbook(sheets: &[(String, Table)], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    for (name, table) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name)?;
        write_sheet(worksheet, table)?;
    }
    workbook.save(path)?;
    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, table: &Table) -> Result<()> {
    let index_width = table.index_names.len() as u16;
    let mut row = 0u32;

    // Deployment-name level above the column labels, for merged tables.
    if table.is_grouped() {
        let mut col = index_width;
        for group in &table.groups {
            for _ in &group.columns {
                worksheet.write_string(row, col, &group.name)?;
                col += 1;
            }
        }
        row += 1;
    }

    let mut col = 0u16;
    for name in &table.index_names {
        worksheet.write_string(row, col, name)?;
        col += 1;
    }
    for group in &table.groups {
        for column in &group.columns {
            worksheet.write_string(row, col, column)?;
            col += 1;
        }
    }
    row += 1;

    for table_row in &table.rows {
        let mut col = 0u16;
        for key in &table_row.key {
            worksheet.write_string(row, col, key)?;
            col += 1;
        }
        for cell in &table_row.cells {
            match cell {
                Cell::Empty => {}
                Cell::Int(i) => {
                    worksheet.write_number(row, col, *i as f64)?;
                }
                Cell::Float(f) => {
                    worksheet.write_number(row, col, *f)?;
                }
                Cell::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
            }
            col += 1;
        }
        row += 1;
    }

    Ok(())
}
