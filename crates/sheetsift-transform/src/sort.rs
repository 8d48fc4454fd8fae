//! Single-key ordering.

use polars::prelude::{DataFrame, SortMultipleOptions};
use sheetsift_model::SortKey;

use crate::error::Result;
use crate::frame::require_column;

/// Orders the rows by one column using its native ordering.
///
/// The sort is stable and empty cells always go last, in both directions.
pub fn sort_rows(df: &DataFrame, key: &SortKey) -> Result<DataFrame> {
    require_column(df, &key.column)?;
    let options = SortMultipleOptions::default()
        .with_order_descending(key.direction.is_descending())
        .with_nulls_last(true)
        .with_maintain_order(true);
    let sorted = df.sort([key.column.as_str()], options)?;
    tracing::debug!(
        column = %key.column,
        direction = %key.direction,
        rows = sorted.height(),
        "sorted rows"
    );
    Ok(sorted)
}
