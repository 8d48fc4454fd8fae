//! Export then reload with header row 1.

use chrono::NaiveDate;
use polars::prelude::*;
use proptest::prelude::*;
use sheetsift_ingest::{column_cell, load_sheet, load_sheet_from_path};
use sheetsift_model::{CellValue, ExportStrategy, LoadOptions};
use sheetsift_output::{export_table, resolve_file_name, write_download};

fn result_table() -> DataFrame {
    let millis: Vec<Option<i64>> = [(2024, 1, 15), (2024, 2, 1), (2024, 3, 31)]
        .into_iter()
        .map(|(y, m, d)| {
            NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc().timestamp_millis())
        })
        .collect();
    let fecha = Series::new("Fecha".into(), millis)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .unwrap();
    let mut df = df!(
        "Factura" => ["F-001", "F-002", "F-003"],
        "Unidades" => [3i64, 12, 7],
        "Importe" => [Some(120.5f64), None, Some(64.25)],
        "Pagada" => [true, false, true]
    )
    .unwrap();
    df.with_column(fecha).unwrap();
    df
}

#[test]
fn exported_workbook_reloads_identically() {
    let df = result_table();
    let bytes = export_table(&df, &ExportStrategy::InMemory).unwrap();
    let reloaded = load_sheet(&bytes, &LoadOptions::default()).unwrap();

    assert_eq!(
        reloaded.columns(),
        vec!["Factura", "Unidades", "Importe", "Pagada", "Fecha"]
    );
    assert_eq!(reloaded.row_count(), 3);
    for name in ["Factura", "Unidades", "Importe", "Pagada", "Fecha"] {
        assert_eq!(
            reloaded.data.column(name).unwrap().dtype(),
            df.column(name).unwrap().dtype(),
            "dtype of {name}"
        );
        for idx in 0..3 {
            assert_eq!(
                column_cell(&reloaded.data, name, idx).unwrap(),
                column_cell(&df, name, idx).unwrap(),
                "{name}[{idx}]"
            );
        }
    }
    assert_eq!(
        column_cell(&reloaded.data, "Importe", 1).unwrap(),
        None::<CellValue>
    );
}

#[test]
fn staged_and_in_memory_exports_load_the_same() {
    let dir = tempfile::tempdir().unwrap();
    let df = result_table();
    let staged = export_table(
        &df,
        &ExportStrategy::Staged {
            dir: dir.path().to_path_buf(),
        },
    )
    .unwrap();
    let in_memory = export_table(&df, &ExportStrategy::InMemory).unwrap();

    let a = load_sheet(&staged, &LoadOptions::default()).unwrap();
    let b = load_sheet(&in_memory, &LoadOptions::default()).unwrap();
    assert!(a.data.equals_missing(&b.data));
}

#[test]
fn download_lands_under_resolved_name() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = export_table(&result_table(), &ExportStrategy::InMemory).unwrap();
    let name = resolve_file_name(Some("reporte"), "unused").unwrap();
    let path = write_download(dir.path(), &name, &bytes).unwrap();
    assert_eq!(path.file_name().unwrap(), "reporte.xlsx");

    let reloaded = load_sheet_from_path(&path, &LoadOptions::default()).unwrap();
    assert_eq!(reloaded.row_count(), 3);
}

proptest! {
    #[test]
    fn resolved_names_end_in_a_single_extension(stem in "[a-zA-Z0-9_ .-]{0,20}") {
        let name = resolve_file_name(Some(&stem), "fallback").unwrap();
        prop_assert!(name.to_ascii_lowercase().ends_with(".xlsx"));
        if stem.trim().is_empty() {
            prop_assert_eq!(name, "fallback.xlsx");
        } else {
            prop_assert!(name.starts_with(&stem));
            prop_assert!(name.len() <= stem.len() + ".xlsx".len());
        }
    }
}
