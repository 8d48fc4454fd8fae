//! Summary statistics reported for the current table.

use serde::{Deserialize, Serialize};

/// Statistics for one column of the currently displayed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub column: String,
    /// Number of rows in the table.
    pub count: usize,
    /// Present only when the column is numeric.
    pub numeric: Option<NumericStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    /// Number of non-empty values that contributed to the aggregates.
    pub observations: usize,
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl NumericStats {
    /// Mean rounded to two decimals for display.
    pub fn mean_display(&self) -> String {
        format!("{:.2}", self.mean)
    }
}

impl StatsSummary {
    pub fn is_numeric(&self) -> bool {
        self.numeric.is_some()
    }
}
