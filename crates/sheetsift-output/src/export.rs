//! Export strategies.

use std::path::Path;
use std::time::Instant;

use polars::prelude::DataFrame;
use sheetsift_model::ExportStrategy;
use tracing::info;

use crate::error::{OutputError, Result};
use crate::xlsx::{write_xlsx_bytes, write_xlsx_file};

/// Serializes the table with the chosen strategy and returns the workbook bytes.
///
/// `Staged` writes a uniquely named temporary file in its directory, reads it
/// back and removes it, so concurrent exports never collide.
pub fn export_table(df: &DataFrame, strategy: &ExportStrategy) -> Result<Vec<u8>> {
    let started = Instant::now();
    let bytes = match strategy {
        ExportStrategy::InMemory => write_xlsx_bytes(df)?,
        ExportStrategy::Staged { dir } => export_staged(df, dir)?,
    };
    info!(
        rows = df.height(),
        bytes = bytes.len(),
        staged = matches!(strategy, ExportStrategy::Staged { .. }),
        duration_ms = started.elapsed().as_millis(),
        "result serialized"
    );
    Ok(bytes)
}

fn export_staged(df: &DataFrame, dir: &Path) -> Result<Vec<u8>> {
    let staged = tempfile::Builder::new()
        .prefix("sheetsift-")
        .suffix(".xlsx")
        .tempfile_in(dir)
        .map_err(|e| OutputError::Io {
            operation: "create staging file in",
            path: dir.to_path_buf(),
            source: e,
        })?;
    write_xlsx_file(df, staged.path())?;
    let bytes = std::fs::read(staged.path()).map_err(|e| OutputError::Io {
        operation: "read staged file",
        path: staged.path().to_path_buf(),
        source: e,
    })?;
    staged.close().map_err(|e| OutputError::Io {
        operation: "remove staged file in",
        path: dir.to_path_buf(),
        source: e,
    })?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn staged_export_leaves_no_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let df = df!("Estado" => ["Pagada", "Pendiente"]).unwrap();
        let strategy = ExportStrategy::Staged {
            dir: dir.path().to_path_buf(),
        };
        let bytes = export_table(&df, &strategy).unwrap();
        assert_eq!(&bytes[..2], b"PK");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn staged_export_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let strategy = ExportStrategy::Staged {
            dir: dir.path().join("missing"),
        };
        let df = df!("Estado" => ["Pagada"]).unwrap();
        assert!(matches!(
            export_table(&df, &strategy),
            Err(OutputError::Io { .. })
        ));
    }
}
