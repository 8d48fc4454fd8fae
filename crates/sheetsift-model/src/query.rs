//! Filter predicates, sort keys and the action a user picked.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::value::CellValue;

/// Maximum number of chained filter predicates.
pub const MAX_FILTERS: usize = 2;

/// Keeps rows whose cell in `column` equals `value` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub column: String,
    pub value: CellValue,
}

impl FilterPredicate {
    pub fn new(column: impl Into<String>, value: CellValue) -> Self {
        Self {
            column: column.into(),
            value,
        }
    }

    /// Whether a cell satisfies the predicate. Empty cells never match.
    pub fn matches(&self, cell: Option<&CellValue>) -> bool {
        cell == Some(&self.value)
    }
}

/// A filter as typed on the command line, before its value is resolved
/// against the column's actual values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFilter {
    pub column: String,
    pub value: String,
}

impl FromStr for RawFilter {
    type Err = ModelError;

    /// Parses `COLUMN=VALUE`, splitting on the first `=`.
    fn from_str(s: &str) -> Result<Self> {
        let Some((column, value)) = s.split_once('=') else {
            return Err(ModelError::InvalidFilter(s.to_string()));
        };
        if column.is_empty() {
            return Err(ModelError::InvalidFilter(s.to_string()));
        }
        Ok(Self {
            column: column.to_string(),
            value: value.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    pub fn is_descending(self) -> bool {
        matches!(self, Self::Descending)
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("ascending"),
            Self::Descending => f.write_str("descending"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn ascending(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Ascending)
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Descending)
    }
}

/// What the user asked to do with the confirmed table.
///
/// Filtering always runs before sorting; there is no sort-then-filter path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Filter by value; the filtered rows may be sorted afterwards.
    Filter,
    /// Sort the whole table.
    Sort,
    /// Filter, then sort the filtered rows.
    FilterThenSort,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Filter, Action::Sort, Action::FilterThenSort];

    pub fn filters(self) -> bool {
        matches!(self, Self::Filter | Self::FilterThenSort)
    }

    pub fn sorts(self) -> bool {
        matches!(self, Self::Sort | Self::FilterThenSort)
    }

    /// Prefix of the default output filename.
    pub fn file_prefix(self) -> &'static str {
        match self {
            Self::Sort => "facturas_ordenadas",
            Self::Filter | Self::FilterThenSort => "facturas",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Filter => "Filter by a value",
            Self::Sort => "Sort by a column",
            Self::FilterThenSort => "Filter, then sort the filtered rows",
        }
    }

    /// Infers the action from which selections are present.
    pub fn infer(has_filters: bool, has_sort: bool) -> Option<Self> {
        match (has_filters, has_sort) {
            (true, true) => Some(Self::FilterThenSort),
            (true, false) => Some(Self::Filter),
            (false, true) => Some(Self::Sort),
            (false, false) => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_raw_filter_on_first_equals() {
        let filter: RawFilter = "Estado=Pagada".parse().unwrap();
        assert_eq!(filter.column, "Estado");
        assert_eq!(filter.value, "Pagada");

        let filter: RawFilter = "Formula=a=b".parse().unwrap();
        assert_eq!(filter.column, "Formula");
        assert_eq!(filter.value, "a=b");

        let filter: RawFilter = "Notes=".parse().unwrap();
        assert_eq!(filter.value, "");
    }

    #[test]
    fn rejects_malformed_raw_filter() {
        assert!("Estado".parse::<RawFilter>().is_err());
        assert!("=Pagada".parse::<RawFilter>().is_err());
    }

    #[test]
    fn predicate_matches_exactly() {
        let predicate = FilterPredicate::new("Estado", CellValue::text("Pagada"));
        assert!(predicate.matches(Some(&CellValue::text("Pagada"))));
        assert!(!predicate.matches(Some(&CellValue::text("Pagada "))));
        assert!(!predicate.matches(None));
    }

    #[test]
    fn infers_action_from_selections() {
        assert_eq!(Action::infer(true, false), Some(Action::Filter));
        assert_eq!(Action::infer(false, true), Some(Action::Sort));
        assert_eq!(Action::infer(true, true), Some(Action::FilterThenSort));
        assert_eq!(Action::infer(false, false), None);
        assert_eq!(Action::Sort.file_prefix(), "facturas_ordenadas");
        assert_eq!(Action::FilterThenSort.file_prefix(), "facturas");
    }
}
