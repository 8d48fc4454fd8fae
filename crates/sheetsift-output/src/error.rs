//! Output error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// File I/O error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temp file could not be moved onto the target name.
    #[error("failed to write {target_path}: {source}")]
    AtomicWriteFailed {
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Workbook serialization failed.
    #[error("failed to build workbook: {message}")]
    Xlsx { message: String },

    /// The table exceeds the xlsx grid limits.
    #[error("table too large for xlsx: {rows} rows, {columns} columns")]
    TooLarge { rows: usize, columns: usize },

    /// The requested download name is unusable.
    #[error("invalid file name '{name}': {reason}")]
    InvalidFileName { name: String, reason: &'static str },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<rust_xlsxwriter::XlsxError> for OutputError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Xlsx {
            message: err.to_string(),
        }
    }
}

impl From<polars::prelude::PolarsError> for OutputError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
