//! Summary statistics for one column of the current table.

use polars::prelude::{DataFrame, DataType};
use sheetsift_ingest::any_to_f64;
use sheetsift_model::{NumericStats, StatsSummary};

use crate::error::Result;
use crate::frame::require_column;

/// Whether the column holds integers or floats.
pub fn is_numeric_column(df: &DataFrame, column: &str) -> Result<bool> {
    Ok(is_numeric_dtype(require_column(df, column)?.dtype()))
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Row count of the table, plus sum, mean, min and max of `column` when it
/// is numeric. Empty cells do not contribute to the aggregates.
pub fn summarize(df: &DataFrame, column: &str) -> Result<StatsSummary> {
    let col = require_column(df, column)?;
    let numeric = if is_numeric_dtype(col.dtype()) {
        let values: Vec<f64> = (0..col.len())
            .filter_map(|idx| col.get(idx).ok().and_then(any_to_f64))
            .collect();
        numeric_stats(&values)
    } else {
        None
    };
    Ok(StatsSummary {
        column: column.to_string(),
        count: df.height(),
        numeric,
    })
}

fn numeric_stats(values: &[f64]) -> Option<NumericStats> {
    let (&first, rest) = values.split_first()?;
    let (sum, min, max) = rest
        .iter()
        .fold((first, first, first), |(sum, min, max), &v| {
            (sum + v, min.min(v), max.max(v))
        });
    Some(NumericStats {
        observations: values.len(),
        sum,
        mean: sum / values.len() as f64,
        min,
        max,
    })
}
