//! Polars AnyValue utility functions.
//!
//! This module provides helper functions for working with Polars `AnyValue` types,
//! including string conversions, numeric extraction and the mapping back onto
//! [`CellValue`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use polars::prelude::{AnyValue, DataFrame, TimeUnit};
use sheetsift_model::{CellValue, format_numeric};

use crate::error::Result;

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null`, formats numbers without unnecessary
/// trailing zeros and datetimes as `YYYY-MM-DD HH:MM:SS`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use sheetsift_ingest::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::Float64(2.50)), "2.5");
/// assert_eq!(any_to_string(AnyValue::String("hello")), "hello");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => match any_to_cell_value(other.clone()) {
            Some(cell) => cell.to_string(),
            None => other.to_string(),
        },
    }
}

/// Converts an `AnyValue` to `f64`, returning `None` for non-numeric or null values.
///
/// Unlike a CSV reader, spreadsheet columns are already typed, so strings are
/// never parsed here.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        _ => None,
    }
}

/// Maps a Polars value onto a typed cell value. Nulls map to `None`.
pub fn any_to_cell_value(value: AnyValue<'_>) -> Option<CellValue> {
    match value {
        AnyValue::Null => None,
        AnyValue::Boolean(b) => Some(CellValue::Bool(b)),
        AnyValue::Int8(v) => Some(CellValue::Int(i64::from(v))),
        AnyValue::Int16(v) => Some(CellValue::Int(i64::from(v))),
        AnyValue::Int32(v) => Some(CellValue::Int(i64::from(v))),
        AnyValue::Int64(v) => Some(CellValue::Int(v)),
        AnyValue::UInt8(v) => Some(CellValue::Int(i64::from(v))),
        AnyValue::UInt16(v) => Some(CellValue::Int(i64::from(v))),
        AnyValue::UInt32(v) => Some(CellValue::Int(i64::from(v))),
        AnyValue::UInt64(v) => i64::try_from(v)
            .map(CellValue::Int)
            .ok()
            .or(Some(CellValue::Float(v as f64))),
        AnyValue::Float32(v) => Some(CellValue::Float(f64::from(v))),
        AnyValue::Float64(v) => Some(CellValue::Float(v)),
        AnyValue::String(s) => Some(CellValue::Text(s.to_string())),
        AnyValue::StringOwned(s) => Some(CellValue::Text(s.to_string())),
        AnyValue::Datetime(v, unit, _) => timestamp_to_datetime(v, unit).map(CellValue::DateTime),
        AnyValue::DatetimeOwned(v, unit, _) => {
            timestamp_to_datetime(v, unit).map(CellValue::DateTime)
        }
        AnyValue::Date(days) => days_to_datetime(days).map(CellValue::DateTime),
        other => Some(CellValue::Text(other.to_string())),
    }
}

/// Reads the typed value of one cell. Missing columns are reported as errors,
/// out-of-range rows as empty cells.
pub fn column_cell(df: &DataFrame, name: &str, idx: usize) -> Result<Option<CellValue>> {
    let column = df.column(name)?;
    Ok(column.get(idx).ok().and_then(any_to_cell_value))
}

pub(crate) fn datetime_to_millis(value: &NaiveDateTime) -> i64 {
    value.and_utc().timestamp_millis()
}

fn timestamp_to_datetime(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let datetime = match unit {
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
    }?;
    Some(datetime.naive_utc())
}

fn days_to_datetime(days: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1970, 1, 1)?
        .checked_add_signed(TimeDelta::days(i64::from(days)))?
        .and_hms_opt(0, 0, 0)
}
