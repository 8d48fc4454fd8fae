//! Error types for table transformations.

use thiserror::Error;

use sheetsift_model::MAX_FILTERS;

#[derive(Debug, Error)]
pub enum TransformError {
    /// The table has no column with this name. Names are case-sensitive.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// The value does not occur in the column.
    #[error("value '{value}' does not occur in column '{column}'")]
    ValueNotFound { column: String, value: String },

    #[error("at most {} filters can be chained, got {count}", MAX_FILTERS)]
    TooManyFilters { count: usize },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<sheetsift_ingest::IngestError> for TransformError {
    fn from(err: sheetsift_ingest::IngestError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_many_filters_names_the_limit() {
        let err = TransformError::TooManyFilters { count: 3 };
        assert_eq!(err.to_string(), "at most 2 filters can be chained, got 3");
    }
}
