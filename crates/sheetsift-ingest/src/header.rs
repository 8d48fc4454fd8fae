//! Column naming and header row suggestion.

use std::collections::BTreeSet;

use sheetsift_model::{CellValue, HeaderRow};

use crate::workbook::SheetGrid;

/// Number of leading sheet rows inspected when suggesting a header row.
const HEADER_PROBE_ROWS: usize = 10;

/// Builds unique column names from the cells of the header row.
///
/// Cells are used literally; empty cells become `Unnamed: <index>` and
/// repeated names get `.1`, `.2`, ... suffixes in order of appearance.
pub fn column_names(header_cells: &[Option<CellValue>]) -> Vec<String> {
    let raw: Vec<String> = header_cells
        .iter()
        .enumerate()
        .map(|(idx, cell)| match cell {
            Some(value) => value.to_string(),
            None => format!("Unnamed: {idx}"),
        })
        .collect();
    dedupe_names(raw)
}

fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut used: BTreeSet<String> = BTreeSet::new();
    let mut result = Vec::with_capacity(names.len());
    for name in names {
        if used.insert(name.clone()) {
            result.push(name);
            continue;
        }
        let mut suffix = 1usize;
        let unique = loop {
            let candidate = format!("{name}.{suffix}");
            if !used.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        used.insert(unique.clone());
        result.push(unique);
    }
    result
}

#[derive(Debug, Default, Clone, Copy)]
struct RowStats {
    total: usize,
    non_empty: usize,
    numeric: usize,
    alpha: usize,
}

impl RowStats {
    fn non_empty_ratio(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.non_empty as f64 / self.total as f64
        }
    }

    fn numeric_ratio(self) -> f64 {
        if self.non_empty == 0 {
            0.0
        } else {
            self.numeric as f64 / self.non_empty as f64
        }
    }

    fn alpha_ratio(self) -> f64 {
        if self.non_empty == 0 {
            0.0
        } else {
            self.alpha as f64 / self.non_empty as f64
        }
    }
}

fn row_stats(row: &[Option<CellValue>]) -> RowStats {
    let mut stats = RowStats {
        total: row.len(),
        ..RowStats::default()
    };
    for cell in row.iter().flatten() {
        stats.non_empty += 1;
        match cell {
            CellValue::Int(_) | CellValue::Float(_) | CellValue::DateTime(_) => {
                stats.numeric += 1;
            }
            CellValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.parse::<f64>().is_ok() {
                    stats.numeric += 1;
                }
                if trimmed.chars().any(char::is_alphabetic) {
                    stats.alpha += 1;
                }
            }
            CellValue::Bool(_) => {}
        }
    }
    stats
}

fn is_data_like(stats: RowStats) -> bool {
    stats.non_empty_ratio() >= 0.5 && stats.numeric_ratio() >= 0.2
}

fn is_header_like(stats: RowStats) -> bool {
    stats.non_empty_ratio() >= 0.8 && stats.alpha_ratio() >= 0.5 && stats.numeric_ratio() <= 0.1
}

/// Proposes the row that most likely holds the column names.
///
/// Heuristic: pick the last header-like row before data starts. Title rows
/// and blank rows above the header are sparse, so they are neither header-like
/// nor data-like and get skipped. When no data-like row shows up in the probe
/// window (all-text tables), the first header-like row wins. Falls back to the
/// first sheet row.
pub fn suggest_header_row(grid: &SheetGrid) -> HeaderRow {
    let probe = grid.row_count().min(HEADER_PROBE_ROWS);
    let stats: Vec<RowStats> = grid.rows.iter().take(probe).map(|row| row_stats(row)).collect();

    let index = match stats.iter().position(|stat| is_data_like(*stat)) {
        Some(data_index) => stats[..data_index]
            .iter()
            .rposition(|stat| is_header_like(*stat))
            .unwrap_or(0),
        None => stats
            .iter()
            .position(|stat| is_header_like(*stat))
            .unwrap_or(0),
    };
    HeaderRow::from_zero_based(index)
}
