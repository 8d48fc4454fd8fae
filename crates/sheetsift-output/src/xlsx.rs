//! Table to xlsx serialization.

use std::path::Path;

use polars::prelude::DataFrame;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use sheetsift_ingest::any_to_cell_value;
use sheetsift_model::CellValue;

use crate::error::{OutputError, Result};

/// MIME type of the produced files.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Number format applied to datetime cells.
const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Serializes the table into xlsx bytes without touching the disk.
pub fn write_xlsx_bytes(df: &DataFrame) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(df)?;
    Ok(workbook.save_to_buffer()?)
}

/// Serializes the table straight into a file.
pub fn write_xlsx_file(df: &DataFrame, path: &Path) -> Result<()> {
    let mut workbook = build_workbook(df)?;
    workbook.save(path)?;
    Ok(())
}

fn build_workbook(df: &DataFrame) -> Result<Workbook> {
    let too_large = || OutputError::TooLarge {
        rows: df.height(),
        columns: df.width(),
    };
    let header_format = Format::new().set_bold();
    let datetime_format = Format::new().set_num_format(DATETIME_NUM_FORMAT);

    let mut worksheet = Worksheet::new();
    for (col_idx, column) in df.get_columns().iter().enumerate() {
        let col = u16::try_from(col_idx).map_err(|_| too_large())?;
        worksheet.write_string_with_format(0, col, column.name().as_str(), &header_format)?;
        for row_idx in 0..column.len() {
            let row = u32::try_from(row_idx + 1).map_err(|_| too_large())?;
            let Some(cell) = column.get(row_idx).ok().and_then(any_to_cell_value) else {
                continue;
            };
            match cell {
                CellValue::Text(text) => {
                    worksheet.write_string(row, col, text)?;
                }
                CellValue::Int(v) => {
                    worksheet.write_number(row, col, v as f64)?;
                }
                CellValue::Float(v) => {
                    worksheet.write_number(row, col, v)?;
                }
                CellValue::Bool(v) => {
                    worksheet.write_boolean(row, col, v)?;
                }
                CellValue::DateTime(dt) => {
                    worksheet.write_datetime_with_format(row, col, &dt, &datetime_format)?;
                }
            }
        }
    }
    worksheet.autofit();

    let mut workbook = Workbook::new();
    workbook.push_worksheet(worksheet);
    tracing::debug!(
        rows = df.height(),
        columns = df.width(),
        "built result workbook"
    );
    Ok(workbook)
}
