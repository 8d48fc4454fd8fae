//! Error types for spreadsheet ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a workbook into a table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Spreadsheet file not found.
    #[error("spreadsheet file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Workbook Errors ===
    /// The bytes are not a workbook calamine understands.
    #[error("not a readable spreadsheet: {message}")]
    Workbook { message: String },

    /// The workbook contains no worksheet.
    #[error("workbook has no worksheets")]
    NoSheets,

    /// The first worksheet could not be decoded.
    #[error("failed to read sheet '{sheet}': {message}")]
    Sheet { sheet: String, message: String },

    /// The first worksheet has no used cells.
    #[error("sheet '{sheet}' is empty")]
    EmptySheet { sheet: String },

    /// Header row lies beyond the last row of the sheet.
    #[error("header row {header_row} is out of range: the sheet has {sheet_rows} rows")]
    HeaderRowOutOfRange {
        header_row: usize,
        sheet_rows: usize,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
