//! Candidate filter values of a column.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;
use sheetsift_model::CellValue;

use crate::error::{Result, TransformError};
use crate::frame::column_cells;

/// Distinct non-null values of `column` in order of first appearance.
///
/// Every returned value matches at least one row of `df`.
pub fn distinct_values(df: &DataFrame, column: &str) -> Result<Vec<CellValue>> {
    let mut seen: BTreeSet<(&'static str, String)> = BTreeSet::new();
    let mut values = Vec::new();
    for cell in column_cells(df, column)?.into_iter().flatten() {
        if seen.insert((cell.kind(), cell.to_string())) {
            values.push(cell);
        }
    }
    tracing::debug!(column, distinct = values.len(), "collected candidate values");
    Ok(values)
}

/// Resolves a typed-in value against the column's candidates by display text.
pub fn resolve_value(df: &DataFrame, column: &str, text: &str) -> Result<CellValue> {
    distinct_values(df, column)?
        .into_iter()
        .find(|candidate| candidate.to_string() == text)
        .ok_or_else(|| TransformError::ValueNotFound {
            column: column.to_string(),
            value: text.to_string(),
        })
}
