//! Export of filtered and sorted tables.
//!
//! - **xlsx**: table to workbook serialization
//! - **export**: in-memory and staged export strategies
//! - **naming**: default and user-supplied download names
//! - **download**: atomic write into the output directory

pub mod download;
pub mod error;
pub mod export;
pub mod naming;
pub mod xlsx;

pub use download::write_download;
pub use error::{OutputError, Result};
pub use export::export_table;
pub use naming::{DATE_STAMP_FORMAT, XLSX_EXTENSION, default_file_stem, resolve_file_name};
pub use xlsx::{XLSX_MIME, write_xlsx_bytes, write_xlsx_file};
