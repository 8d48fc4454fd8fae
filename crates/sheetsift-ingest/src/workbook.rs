//! Raw worksheet access through calamine.
//!
//! The first worksheet is decoded into a [`SheetGrid`]: a dense grid of
//! optional [`CellValue`]s indexed by absolute sheet row, so that row 0 is
//! always the first row of the sheet even when the used range starts lower.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::NaiveDateTime;
use sheetsift_model::CellValue;

use crate::error::{IngestError, Result};

/// Decoded cells of one worksheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGrid {
    pub sheet_name: String,
    /// Width of the used range; every row has exactly this many cells.
    pub width: usize,
    /// Rows by absolute sheet index. Leading blank rows are present and empty.
    pub rows: Vec<Vec<Option<CellValue>>>,
}

impl SheetGrid {
    /// Number of sheet rows up to and including the last used row.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&[Option<CellValue>]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reads a file into memory, mapping I/O failures to ingest errors.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Decodes the first worksheet of an xls/xlsx/xlsb/ods workbook.
pub fn read_sheet_grid(bytes: &[u8]) -> Result<SheetGrid> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| IngestError::Workbook {
            message: e.to_string(),
        })?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(IngestError::NoSheets)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::Sheet {
            sheet: sheet_name.clone(),
            message: e.to_string(),
        })?;

    let Some((start_row, _start_col)) = range.start() else {
        tracing::debug!(sheet = %sheet_name, "worksheet is empty");
        return Ok(SheetGrid {
            sheet_name,
            width: 0,
            rows: Vec::new(),
        });
    };

    let width = range.width();
    let leading = start_row as usize;
    let mut rows = Vec::with_capacity(leading + range.height());
    rows.extend(std::iter::repeat_with(|| vec![None; width]).take(leading));
    for source in range.rows() {
        let mut row: Vec<Option<CellValue>> = source.iter().map(decode_cell).collect();
        row.resize(width, None);
        rows.push(row);
    }

    tracing::debug!(
        sheet = %sheet_name,
        rows = rows.len(),
        columns = width,
        "decoded worksheet"
    );
    Ok(SheetGrid {
        sheet_name,
        width,
        rows,
    })
}

/// Maps a calamine cell onto a typed value. Empty strings and error cells
/// become empty cells.
fn decode_cell(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Int(v) => Some(CellValue::Int(*v)),
        Data::Float(v) => Some(CellValue::Float(*v)),
        Data::Bool(v) => Some(CellValue::Bool(*v)),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                return Some(CellValue::Float(dt.as_f64()));
            }
            Some(
                dt.as_datetime()
                    .map_or(CellValue::Float(dt.as_f64()), CellValue::DateTime),
            )
        }
        Data::DateTimeIso(s) => Some(
            parse_iso_datetime(s).map_or_else(|| CellValue::Text(s.clone()), CellValue::DateTime),
        ),
        Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
    }
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
