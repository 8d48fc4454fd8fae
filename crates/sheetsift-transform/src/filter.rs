//! Exact-match row selection.

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};
use sheetsift_model::{FilterPredicate, MAX_FILTERS};

use crate::error::{Result, TransformError};
use crate::frame::column_cells;

/// Keeps the rows whose cell in the predicate column equals its value.
///
/// Row order is preserved. Null cells never match.
pub fn filter_rows(df: &DataFrame, predicate: &FilterPredicate) -> Result<DataFrame> {
    let keep: Vec<bool> = column_cells(df, &predicate.column)?
        .iter()
        .map(|cell| predicate.matches(cell.as_ref()))
        .collect();
    let mask = BooleanChunked::from_slice("mask".into(), &keep);
    let filtered = df.filter(&mask)?;
    tracing::debug!(
        column = %predicate.column,
        before = df.height(),
        after = filtered.height(),
        "applied filter"
    );
    Ok(filtered)
}

/// Applies up to [`MAX_FILTERS`] predicates in order, each on the previous
/// result. The outcome is their conjunction.
pub fn filter_chain(df: &DataFrame, predicates: &[FilterPredicate]) -> Result<DataFrame> {
    if predicates.len() > MAX_FILTERS {
        return Err(TransformError::TooManyFilters {
            count: predicates.len(),
        });
    }
    let mut current = df.clone();
    for predicate in predicates {
        current = filter_rows(&current, predicate)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use sheetsift_model::CellValue;

    fn sample() -> DataFrame {
        df!(
            "Cliente" => ["Acme", "Beta", "Acme", "Acme"],
            "Estado" => ["Pagada", "Pagada", "Pendiente", "Pagada"],
            "Importe" => [10i64, 20, 30, 40]
        )
        .unwrap()
    }

    #[test]
    fn chained_filters_are_conjunctive() {
        let predicates = [
            FilterPredicate::new("Estado", CellValue::text("Pagada")),
            FilterPredicate::new("Cliente", CellValue::text("Acme")),
        ];
        let result = filter_chain(&sample(), &predicates).unwrap();
        let importe: Vec<Option<i64>> = result
            .column("Importe")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(importe, vec![Some(10), Some(40)]);
    }

    #[test]
    fn type_mismatch_matches_nothing() {
        let predicate = FilterPredicate::new("Importe", CellValue::Float(10.0));
        assert_eq!(filter_rows(&sample(), &predicate).unwrap().height(), 0);
    }

    #[test]
    fn rejects_a_third_filter() {
        let predicate = FilterPredicate::new("Estado", CellValue::text("Pagada"));
        let err = filter_chain(&sample(), &[predicate.clone(), predicate.clone(), predicate])
            .unwrap_err();
        assert!(matches!(err, TransformError::TooManyFilters { count: 3 }));
    }

    #[test]
    fn empty_chain_returns_the_table() {
        assert_eq!(filter_chain(&sample(), &[]).unwrap().height(), 4);
    }
}
