//! Spreadsheet ingestion for sheetsift.
//!
//! Reads the first worksheet of a workbook and turns it into a typed Polars
//! [`DataFrame`](polars::prelude::DataFrame) using a caller-supplied header
//! row. Row numbers are absolute sheet rows, so blank or title rows above the
//! header count.

pub mod error;
pub mod header;
pub mod loader;
pub mod polars_utils;
pub mod workbook;

pub use error::{IngestError, Result};
pub use header::{column_names, suggest_header_row};
pub use loader::{LoadedSheet, load_sheet, load_sheet_from_path, sheet_from_grid};
pub use polars_utils::{any_to_cell_value, any_to_f64, any_to_string, column_cell};
pub use workbook::{SheetGrid, read_file, read_sheet_grid};
