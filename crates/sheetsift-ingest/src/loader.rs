//! Loads a worksheet into a typed Polars DataFrame using an explicit header row.

use std::path::Path;
use std::time::Instant;

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series, TimeUnit};
use sheetsift_model::{CellValue, HeaderRow, LoadOptions};
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::header::column_names;
use crate::polars_utils::datetime_to_millis;
use crate::workbook::{SheetGrid, read_file, read_sheet_grid};

/// A worksheet loaded with a particular header row.
#[derive(Debug, Clone)]
pub struct LoadedSheet {
    /// Name of the worksheet that was read.
    pub sheet_name: String,
    /// Header row the columns were taken from.
    pub header_row: HeaderRow,
    /// Rows in the sheet up to the last used row.
    pub sheet_rows: usize,
    /// The table itself.
    pub data: DataFrame,
}

impl LoadedSheet {
    /// Column names in sheet order.
    pub fn columns(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.data.height()
    }
}

/// Loads the first worksheet of an in-memory workbook.
pub fn load_sheet(bytes: &[u8], options: &LoadOptions) -> Result<LoadedSheet> {
    let started = Instant::now();
    let grid = read_sheet_grid(bytes)?;
    let sheet = sheet_from_grid(&grid, options)?;
    info!(
        sheet = %sheet.sheet_name,
        header_row = sheet.header_row.get(),
        columns = sheet.data.width(),
        rows = sheet.data.height(),
        duration_ms = started.elapsed().as_millis(),
        "sheet loaded"
    );
    Ok(sheet)
}

/// Reads a workbook from disk and loads its first worksheet.
pub fn load_sheet_from_path(path: &Path, options: &LoadOptions) -> Result<LoadedSheet> {
    let bytes = read_file(path)?;
    load_sheet(&bytes, options)
}

/// Builds the table from an already decoded grid.
///
/// The header row's cells become the column names and every following
/// row becomes a record.
pub fn sheet_from_grid(grid: &SheetGrid, options: &LoadOptions) -> Result<LoadedSheet> {
    let header_index = options.header_row.zero_based();
    let Some(header_cells) = grid.row(header_index) else {
        return Err(IngestError::HeaderRowOutOfRange {
            header_row: options.header_row.get(),
            sheet_rows: grid.row_count(),
        });
    };
    let names = column_names(header_cells);

    let records: Vec<&[Option<CellValue>]> = grid
        .rows
        .iter()
        .skip(header_index + 1)
        .map(Vec::as_slice)
        .filter(|row| !options.skip_empty_rows || row.iter().any(Option::is_some))
        .collect();
    debug!(
        header_row = options.header_row.get(),
        records = records.len(),
        "collected records below header"
    );

    let mut columns: Vec<Column> = Vec::with_capacity(names.len());
    for (col_idx, name) in names.iter().enumerate() {
        let cells: Vec<Option<&CellValue>> = records
            .iter()
            .map(|row| row.get(col_idx).and_then(Option::as_ref))
            .collect();
        columns.push(build_column(name, &cells)?);
    }
    let data = DataFrame::new(columns)?;

    Ok(LoadedSheet {
        sheet_name: grid.sheet_name.clone(),
        header_row: options.header_row,
        sheet_rows: grid.row_count(),
        data,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Empty,
    Boolean,
    Integer,
    Float,
    DateTime,
    Text,
}

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

fn is_integral(value: &CellValue) -> bool {
    match value {
        CellValue::Int(_) => true,
        CellValue::Float(v) => v.fract() == 0.0 && v.abs() <= MAX_EXACT_FLOAT_INT,
        _ => false,
    }
}

fn infer_kind(cells: &[Option<&CellValue>]) -> ColumnKind {
    let mut seen = false;
    let mut all_bool = true;
    let mut all_numeric = true;
    let mut all_integral = true;
    let mut all_datetime = true;
    for cell in cells.iter().flatten() {
        seen = true;
        all_bool &= matches!(cell, CellValue::Bool(_));
        all_numeric &= cell.is_numeric();
        all_integral &= is_integral(cell);
        all_datetime &= matches!(cell, CellValue::DateTime(_));
    }
    if !seen {
        ColumnKind::Empty
    } else if all_bool {
        ColumnKind::Boolean
    } else if all_numeric && all_integral {
        ColumnKind::Integer
    } else if all_numeric {
        ColumnKind::Float
    } else if all_datetime {
        ColumnKind::DateTime
    } else {
        ColumnKind::Text
    }
}

fn build_column(name: &str, cells: &[Option<&CellValue>]) -> Result<Column> {
    let series = match infer_kind(cells) {
        ColumnKind::Empty => Series::new(name.into(), vec![None::<String>; cells.len()]),
        ColumnKind::Boolean => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| match cell {
                    Some(CellValue::Bool(b)) => Some(*b),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Integer => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    Some(CellValue::Int(v)) => Some(*v),
                    Some(CellValue::Float(v)) => Some(*v as i64),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Float => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| cell.and_then(CellValue::as_f64))
                .collect();
            Series::new(name.into(), values)
        }
        ColumnKind::DateTime => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    Some(CellValue::DateTime(dt)) => Some(datetime_to_millis(dt)),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
                .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        }
        ColumnKind::Text => {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| cell.map(ToString::to_string))
                .collect();
            Series::new(name.into(), values)
        }
    };
    Ok(series.into_column())
}
