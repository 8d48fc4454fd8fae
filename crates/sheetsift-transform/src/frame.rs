//! Column access helpers shared by the transformations.

use polars::prelude::{Column, DataFrame};
use sheetsift_ingest::any_to_cell_value;
use sheetsift_model::CellValue;

use crate::error::{Result, TransformError};

/// Number of rows shown by [`preview`].
pub const PREVIEW_ROWS: usize = 5;

/// Looks up a column by its exact name.
pub fn require_column<'a>(df: &'a DataFrame, column: &str) -> Result<&'a Column> {
    df.column(column)
        .map_err(|_| TransformError::ColumnNotFound {
            column: column.to_string(),
        })
}

/// Typed cells of one column, top to bottom. Nulls are `None`.
pub fn column_cells(df: &DataFrame, column: &str) -> Result<Vec<Option<CellValue>>> {
    let column = require_column(df, column)?;
    Ok((0..column.len())
        .map(|idx| column.get(idx).ok().and_then(any_to_cell_value))
        .collect())
}

/// First rows of the table.
pub fn preview(df: &DataFrame) -> DataFrame {
    df.head(Some(PREVIEW_ROWS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn preview_takes_five_rows() {
        let df = df!("n" => (0..8i64).collect::<Vec<_>>()).unwrap();
        assert_eq!(preview(&df).height(), PREVIEW_ROWS);
        let short = df.head(Some(2));
        assert_eq!(preview(&short).height(), 2);
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let df = df!("Estado" => ["Pagada"]).unwrap();
        assert!(require_column(&df, "Estado").is_ok());
        assert!(matches!(
            require_column(&df, "estado"),
            Err(TransformError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn reads_typed_cells() {
        let df = df!("n" => [Some(1i64), None]).unwrap();
        assert_eq!(
            column_cells(&df, "n").unwrap(),
            vec![Some(CellValue::Int(1)), None]
        );
    }
}
