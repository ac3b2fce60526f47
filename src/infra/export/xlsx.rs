use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::domain::entities::raw::RawValue;
use crate::domain::entities::table::TabularData;

pub const EXPORT_SHEET_NAME: &str = "Data";

pub fn write_xlsx_bytes(table: &TabularData) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(EXPORT_SHEET_NAME)
        .context("failed to name export sheet")?;

    for (col_idx, label) in table.columns.iter().enumerate() {
        worksheet
            .write_string(0, col_idx as u16, label)
            .context("failed to write xlsx header")?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let sheet_row = row_idx as u32 + 1;
        for (col_idx, value) in row.iter().enumerate() {
            let sheet_col = col_idx as u16;
            match value {
                RawValue::Empty => {}
                RawValue::Number(number) => {
                    worksheet
                        .write_number(sheet_row, sheet_col, *number)
                        .context("failed to write xlsx number")?;
                }
                RawValue::Bool(flag) => {
                    worksheet
                        .write_boolean(sheet_row, sheet_col, *flag)
                        .context("failed to write xlsx boolean")?;
                }
                other => {
                    worksheet
                        .write_string(sheet_row, sheet_col, other.to_string())
                        .context("failed to write xlsx cell")?;
                }
            }
        }
    }

    workbook
        .save_to_buffer()
        .context("failed to build xlsx export")
}
