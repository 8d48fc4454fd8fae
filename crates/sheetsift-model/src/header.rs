//! User-facing header row numbers.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A 1-based sheet row number naming the row that holds the column names.
///
/// Users count rows the way the spreadsheet application shows them, so row 1
/// is the first row of the sheet even when it is blank. The loader works with
/// 0-based indices; [`HeaderRow::zero_based`] is the only conversion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct HeaderRow(NonZeroUsize);

impl HeaderRow {
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    pub fn new(row: usize) -> Result<Self> {
        NonZeroUsize::new(row)
            .map(Self)
            .ok_or(ModelError::InvalidHeaderRow(row))
    }

    /// The row number as the user typed it.
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Index of the header row counted from 0.
    pub fn zero_based(self) -> usize {
        self.0.get() - 1
    }

    /// Header row for a 0-based sheet index.
    pub fn from_zero_based(index: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(index))
    }
}

impl Default for HeaderRow {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for HeaderRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HeaderRow {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let row = s
            .trim()
            .parse::<usize>()
            .map_err(|_| ModelError::Message(format!("header row must be a number, got '{s}'")))?;
        Self::new(row)
    }
}

impl TryFrom<usize> for HeaderRow {
    type Error = ModelError;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl From<HeaderRow> for usize {
    fn from(value: HeaderRow) -> Self {
        value.get()
    }
}
