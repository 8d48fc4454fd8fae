//! Writing the finished workbook into the output directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{OutputError, Result};

/// Writes `bytes` to `dir/file_name` atomically and returns the final path.
///
/// The bytes go to a temp file in the same directory which is then renamed
/// over the target, so readers never observe a partial workbook. An existing
/// file with the same name is replaced.
pub fn write_download(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| OutputError::Io {
        operation: "create directory",
        path: dir.to_path_buf(),
        source: e,
    })?;
    let target = dir.join(file_name);

    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| OutputError::Io {
        operation: "create temp file in",
        path: dir.to_path_buf(),
        source: e,
    })?;
    temp.write_all(bytes).map_err(|e| OutputError::Io {
        operation: "write",
        path: temp.path().to_path_buf(),
        source: e,
    })?;
    temp.as_file().sync_all().map_err(|e| OutputError::Io {
        operation: "sync",
        path: temp.path().to_path_buf(),
        source: e,
    })?;
    temp.persist(&target)
        .map_err(|e| OutputError::AtomicWriteFailed {
            target_path: target.clone(),
            source: e.error,
        })?;

    tracing::info!(path = %target.display(), bytes = bytes.len(), "wrote download");
    Ok(target)
}
