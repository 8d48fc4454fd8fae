pub mod error;
pub mod header;
pub mod options;
pub mod query;
pub mod stats;
pub mod value;

pub use error::{ModelError, Result};
pub use header::HeaderRow;
pub use options::{ExportOptions, ExportStrategy, LoadOptions};
pub use query::{Action, FilterPredicate, MAX_FILTERS, RawFilter, SortDirection, SortKey};
pub use stats::{NumericStats, StatsSummary};
pub use value::{CellValue, DATETIME_DISPLAY_FORMAT, format_numeric};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_value_serializes_with_kind_tag() {
        let json = serde_json::to_string(&CellValue::Int(4)).expect("serialize value");
        assert_eq!(json, r#"{"kind":"Int","value":4}"#);
        let round: CellValue = serde_json::from_str(&json).expect("deserialize value");
        assert_eq!(round, CellValue::Int(4));
    }

    #[test]
    fn header_row_serializes_as_number() {
        let row = HeaderRow::new(3).unwrap();
        assert_eq!(serde_json::to_string(&row).unwrap(), "3");
        assert!(serde_json::from_str::<HeaderRow>("0").is_err());
    }

    #[test]
    fn export_strategy_defaults_to_memory() {
        assert_eq!(ExportStrategy::default(), ExportStrategy::InMemory);
        let json = serde_json::to_string(&ExportStrategy::default()).unwrap();
        assert_eq!(json, r#"{"kind":"in_memory"}"#);
    }
}
