//! One file being worked on.

use std::path::Path;

use sheetsift_ingest::{
    IngestError, LoadedSheet, load_sheet, read_file, read_sheet_grid, suggest_header_row,
};
use sheetsift_model::{HeaderRow, LoadOptions};
use tracing::{debug, info_span};

use crate::error::Result;

/// Holds the uploaded workbook for the lifetime of a pass.
///
/// Every header-row change reloads the table from the original bytes; no
/// parsed table is cached between loads.
#[derive(Debug, Clone)]
pub struct Session {
    source_name: String,
    bytes: Vec<u8>,
    sheet_rows: usize,
    suggested_header_row: HeaderRow,
}

impl Session {
    /// Reads a workbook from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = read_file(path)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self::from_bytes(name, bytes)
    }

    /// Wraps workbook bytes that were already read. Fails when the bytes are
    /// not a readable workbook or its first worksheet is empty.
    pub fn from_bytes(source_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let source_name = source_name.into();
        let span = info_span!("open", source = %source_name);
        let _guard = span.enter();
        let grid = read_sheet_grid(&bytes)?;
        if grid.is_empty() {
            return Err(IngestError::EmptySheet {
                sheet: grid.sheet_name,
            }
            .into());
        }
        let suggested_header_row = suggest_header_row(&grid);
        debug!(
            sheet = %grid.sheet_name,
            sheet_rows = grid.row_count(),
            suggested_header_row = suggested_header_row.get(),
            "workbook opened"
        );
        Ok(Self {
            source_name,
            sheet_rows: grid.row_count(),
            bytes,
            suggested_header_row,
        })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Number of rows in the first worksheet, blank leading rows included.
    pub fn sheet_rows(&self) -> usize {
        self.sheet_rows
    }

    pub fn suggested_header_row(&self) -> HeaderRow {
        self.suggested_header_row
    }

    /// Loads the table using `header_row` as column names.
    pub fn load(&self, header_row: HeaderRow) -> Result<LoadedSheet> {
        let span = info_span!("load", source = %self.source_name, header_row = header_row.get());
        let _guard = span.enter();
        Ok(load_sheet(&self.bytes, &LoadOptions::new(header_row))?)
    }
}
