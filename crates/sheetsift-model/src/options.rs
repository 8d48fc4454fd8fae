//! Configuration options for loading and exporting.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::header::HeaderRow;

/// Options controlling how a workbook becomes a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Sheet row holding the column names.
    pub header_row: HeaderRow,

    /// Drop data rows whose cells are all empty.
    /// Default: true.
    pub skip_empty_rows: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            header_row: HeaderRow::FIRST,
            skip_empty_rows: true,
        }
    }
}

impl LoadOptions {
    pub fn new(header_row: HeaderRow) -> Self {
        Self {
            header_row,
            ..Self::default()
        }
    }

    pub fn with_skip_empty_rows(mut self, enable: bool) -> Self {
        self.skip_empty_rows = enable;
        self
    }
}

/// How the exported workbook is produced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportStrategy {
    /// Serialize straight into a byte buffer. No disk artifact.
    #[default]
    InMemory,
    /// Write a uniquely named temporary file in `dir`, read it back, remove it.
    Staged { dir: PathBuf },
}

/// Where and how the result workbook is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Directory receiving the downloaded file.
    /// Default: the current directory.
    pub out_dir: PathBuf,

    /// Serialization strategy.
    pub strategy: ExportStrategy,

    /// File name typed by the user. `None` or blank uses the default name.
    pub file_name: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            strategy: ExportStrategy::InMemory,
            file_name: None,
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    pub fn with_strategy(mut self, strategy: ExportStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_file_name(mut self, name: Option<String>) -> Self {
        self.file_name = name;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_options_builders() {
        let options = ExportOptions::new()
            .with_out_dir("out")
            .with_strategy(ExportStrategy::Staged {
                dir: PathBuf::from("tmp"),
            })
            .with_file_name(Some("reporte".to_string()));
        assert_eq!(options.out_dir, PathBuf::from("out"));
        assert_eq!(options.file_name.as_deref(), Some("reporte"));
        assert!(matches!(options.strategy, ExportStrategy::Staged { .. }));
    }

    #[test]
    fn load_options_default_to_first_row() {
        let options = LoadOptions::default();
        assert_eq!(options.header_row, HeaderRow::FIRST);
        assert!(options.skip_empty_rows);
    }
}
