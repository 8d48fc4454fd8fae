//! Table transformations for sheetsift.
//!
//! - **values**: distinct candidate values of a column
//! - **filter**: exact-match filtering, chained as a conjunction
//! - **sort**: stable single-column ordering with nulls last
//! - **stats**: row count and numeric aggregates for one column
//! - **frame**: column lookup and preview
//!
//! Every function takes the table by reference and returns a new one.

pub mod error;
pub mod filter;
pub mod frame;
pub mod sort;
pub mod stats;
pub mod values;

pub use error::{Result, TransformError};
pub use filter::{filter_chain, filter_rows};
pub use frame::{PREVIEW_ROWS, column_cells, preview, require_column};
pub use sort::sort_rows;
pub use stats::{is_numeric_column, summarize};
pub use values::{distinct_values, resolve_value};
