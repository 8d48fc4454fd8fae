//! End-to-end passes over a generated invoice workbook.

use std::collections::VecDeque;

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use rust_xlsxwriter::Workbook;
use sheetsift_core::{
    CONFIRM_HEADERS_PROMPT, CoreError, GateOutcome, HEADERS_REJECTED_WARNING, Prompter,
    SECOND_FILTER_PROMPT, SORT_FILTERED_PROMPT, Session, WorkflowRequest, WorkflowResult,
    apply_request, confirm_headers, export_result, resolve_filters, run_interactive,
};
use sheetsift_ingest::{IngestError, column_cell, load_sheet_from_path};
use sheetsift_model::{
    Action, CellValue, ExportOptions, HeaderRow, LoadOptions, RawFilter, SortDirection, SortKey,
};
use sheetsift_transform::TransformError;

const ROWS: [(&str, &str, &str, f64); 10] = [
    ("F-01", "Acme", "Pagada", 120.0),
    ("F-02", "Beta", "Pendiente", 80.5),
    ("F-03", "Acme", "Pagada", 42.0),
    ("F-04", "Gamma", "Anulada", 300.0),
    ("F-05", "Beta", "Pendiente", 15.0),
    ("F-06", "Acme", "Pagada", 99.0),
    ("F-07", "Gamma", "Pendiente", 64.0),
    ("F-08", "Acme", "Anulada", 10.0),
    ("F-09", "Beta", "Pagada", 230.0),
    ("F-10", "Gamma", "Pendiente", 55.5),
];

/// Title on row 1, headers on row 3.
fn invoices() -> Session {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Listado de facturas").unwrap();
    for (col, name) in ["Factura", "Cliente", "Estado", "Importe"].iter().enumerate() {
        sheet.write_string(2, col as u16, *name).unwrap();
    }
    for (idx, (factura, cliente, estado, importe)) in ROWS.iter().enumerate() {
        let row = 3 + idx as u32;
        sheet.write_string(row, 0, *factura).unwrap();
        sheet.write_string(row, 1, *cliente).unwrap();
        sheet.write_string(row, 2, *estado).unwrap();
        sheet.write_number(row, 3, *importe).unwrap();
    }
    let bytes = workbook.save_to_buffer().unwrap();
    Session::from_bytes("facturas.xlsx", bytes).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
}

fn confirmed(session: &Session, row: usize) -> sheetsift_core::ConfirmedSheet {
    let sheet = session.load(HeaderRow::new(row).unwrap()).unwrap();
    confirm_headers(sheet, true).confirmed().unwrap()
}

fn raw(text: &str) -> RawFilter {
    text.parse().unwrap()
}

#[test]
fn session_suggests_the_header_row() {
    let session = invoices();
    assert_eq!(session.suggested_header_row().get(), 3);
    assert_eq!(session.sheet_rows(), 13);
    assert_eq!(session.source_name(), "facturas.xlsx");
}

#[test]
fn rejected_headers_stop_the_pass() {
    let session = invoices();
    let sheet = session.load(HeaderRow::FIRST).unwrap();
    assert_eq!(sheet.columns()[0], "Listado de facturas");
    let outcome = confirm_headers(sheet, false);
    assert!(matches!(outcome, GateOutcome::Rejected { header_row } if header_row == HeaderRow::FIRST));
    assert!(outcome.confirmed().is_none());
}

#[test]
fn filter_pagada_writes_four_rows() {
    let session = invoices();
    let sheet = confirmed(&session, 3);
    let filters = resolve_filters(&sheet, &[raw("Estado=Pagada")]).unwrap();
    let request = WorkflowRequest {
        filters,
        sort: None,
    };
    let result = apply_request(&sheet, &request, today()).unwrap();
    assert_eq!(result.action, Action::Filter);
    assert_eq!(result.source_rows, 10);
    assert_eq!(result.table.height(), 4);
    assert_eq!(result.stats.count, 4);
    assert!(!result.stats.is_numeric());
    assert_eq!(result.default_stem, "facturas_Estado_07_03_2025");

    let dir = tempfile::tempdir().unwrap();
    let report = export_result(&result, &ExportOptions::new().with_out_dir(dir.path()), false)
        .unwrap();
    assert_eq!(report.file_name, "facturas_Estado_07_03_2025.xlsx");
    let path = report.path.unwrap();
    let written = load_sheet_from_path(&path, &LoadOptions::default()).unwrap();
    assert_eq!(written.row_count(), 4);
    assert_eq!(written.columns(), sheet.columns());
}

#[test]
fn second_filter_resolves_within_the_first_result() {
    let session = invoices();
    let sheet = confirmed(&session, 3);
    let filters = resolve_filters(&sheet, &[raw("Estado=Pagada"), raw("Cliente=Acme")]).unwrap();
    assert_eq!(filters.len(), 2);

    let err = resolve_filters(&sheet, &[raw("Estado=Anulada"), raw("Cliente=Beta")]).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Transform(TransformError::ValueNotFound { .. })
    ));

    let err = resolve_filters(
        &sheet,
        &[raw("Estado=Pagada"), raw("Estado=Pagada"), raw("Estado=Pagada")],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Transform(TransformError::TooManyFilters { count: 3 })
    ));
}

#[test]
fn sort_only_uses_the_sorted_prefix_and_reports_stats() {
    let session = invoices();
    let sheet = confirmed(&session, 3);
    let request = WorkflowRequest::new().with_sort(SortKey::descending("Importe"));
    let result = apply_request(&sheet, &request, today()).unwrap();
    assert_eq!(result.action, Action::Sort);
    assert_eq!(result.default_stem, "facturas_ordenadas_Importe_07_03_2025");
    assert_eq!(
        column_cell(&result.table, "Importe", 0).unwrap(),
        Some(CellValue::Float(300.0))
    );
    let stats = result.stats.numeric.unwrap();
    assert_eq!(stats.min, 10.0);
    assert_eq!(stats.max, 300.0);
    assert_eq!(stats.sum, 1016.0);
    assert_eq!(stats.mean_display(), "101.60");
}

#[test]
fn dry_run_writes_nothing() {
    let session = invoices();
    let sheet = confirmed(&session, 3);
    let request = WorkflowRequest::new().with_sort(SortKey::ascending("Factura"));
    let result = apply_request(&sheet, &request, today()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let options = ExportOptions::new()
        .with_out_dir(dir.path())
        .with_file_name(Some("reporte".to_string()));
    let report = export_result(&result, &options, true).unwrap();
    assert_eq!(report.file_name, "reporte.xlsx");
    assert!(report.path.is_none());
    assert!(report.bytes > 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn empty_request_is_rejected() {
    let session = invoices();
    let sheet = confirmed(&session, 3);
    let err = apply_request(&sheet, &WorkflowRequest::new(), today()).unwrap_err();
    assert!(matches!(err, CoreError::NothingRequested));
}

#[test]
fn header_row_beyond_sheet_is_reported() {
    let session = invoices();
    let err = session.load(HeaderRow::new(40).unwrap()).unwrap_err();
    assert!(err.is_header_out_of_range());
}

#[test]
fn empty_worksheet_is_refused_before_any_prompt() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    let bytes = workbook.save_to_buffer().unwrap();
    let err = Session::from_bytes("vacio.xlsx", bytes).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Ingest(IngestError::EmptySheet { ref sheet }) if sheet == "Sheet1"
    ));
    assert_eq!(err.to_string(), "sheet 'Sheet1' is empty");
}

/// Answers prompts from a fixed script and records what was shown.
#[derive(Default)]
struct ScriptedPrompter {
    header_rows: VecDeque<usize>,
    confirms: VecDeque<(&'static str, bool)>,
    action: Option<Action>,
    columns: VecDeque<&'static str>,
    values: VecDeque<&'static str>,
    direction: SortDirection,
    file_name: String,
    warnings: Vec<String>,
    shown_headers: Vec<Vec<String>>,
    preview_rows: Option<usize>,
    result_rows: Option<usize>,
}

impl Prompter for ScriptedPrompter {
    fn header_row(
        &mut self,
        _suggested: HeaderRow,
        _sheet_rows: usize,
    ) -> sheetsift_core::Result<HeaderRow> {
        let row = self.header_rows.pop_front().expect("header row scripted");
        Ok(HeaderRow::new(row)?)
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> sheetsift_core::Result<bool> {
        let (expected, answer) = self.confirms.pop_front().expect("confirm scripted");
        assert_eq!(prompt, expected);
        Ok(answer)
    }

    fn choose_action(&mut self) -> sheetsift_core::Result<Action> {
        Ok(self.action.expect("action scripted"))
    }

    fn choose_column(&mut self, _prompt: &str, columns: &[String]) -> sheetsift_core::Result<String> {
        let column = self.columns.pop_front().expect("column scripted");
        assert!(columns.iter().any(|c| c == column));
        Ok(column.to_string())
    }

    fn choose_value(
        &mut self,
        _column: &str,
        values: &[CellValue],
    ) -> sheetsift_core::Result<CellValue> {
        let wanted = self.values.pop_front().expect("value scripted");
        Ok(values
            .iter()
            .find(|v| v.to_string() == wanted)
            .cloned()
            .expect("scripted value is a candidate"))
    }

    fn choose_direction(&mut self) -> sheetsift_core::Result<SortDirection> {
        Ok(self.direction)
    }

    fn file_name(&mut self, _default_stem: &str) -> sheetsift_core::Result<String> {
        Ok(self.file_name.clone())
    }

    fn show_headers(&mut self, columns: &[String]) {
        self.shown_headers.push(columns.to_vec());
    }

    fn show_preview(&mut self, preview: &DataFrame) {
        self.preview_rows = Some(preview.height());
    }

    fn show_result(&mut self, result: &WorkflowResult) {
        self.result_rows = Some(result.table.height());
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}

#[test]
fn interactive_pass_reprompts_after_rejection() {
    let session = invoices();
    let dir = tempfile::tempdir().unwrap();
    let mut prompter = ScriptedPrompter {
        header_rows: VecDeque::from([30, 1, 3]),
        confirms: VecDeque::from([
            (CONFIRM_HEADERS_PROMPT, false),
            (CONFIRM_HEADERS_PROMPT, true),
            (SECOND_FILTER_PROMPT, true),
            (SORT_FILTERED_PROMPT, true),
        ]),
        action: Some(Action::Filter),
        columns: VecDeque::from(["Estado", "Cliente", "Importe"]),
        values: VecDeque::from(["Pagada", "Acme"]),
        direction: SortDirection::Descending,
        file_name: "reporte".to_string(),
        ..ScriptedPrompter::default()
    };

    let outcome = run_interactive(
        &session,
        &mut prompter,
        &ExportOptions::new().with_out_dir(dir.path()),
        today(),
    )
    .unwrap();

    assert_eq!(prompter.warnings.len(), 2);
    assert!(prompter.warnings[0].contains("out of range"));
    assert_eq!(prompter.warnings[1], HEADERS_REJECTED_WARNING);
    assert_eq!(prompter.shown_headers.len(), 2);
    assert_eq!(
        prompter.shown_headers[1],
        vec!["Factura", "Cliente", "Estado", "Importe"]
    );
    assert_eq!(prompter.preview_rows, Some(5));
    assert_eq!(prompter.result_rows, Some(3));

    assert_eq!(outcome.result.action, Action::FilterThenSort);
    assert_eq!(
        column_cell(&outcome.result.table, "Importe", 0).unwrap(),
        Some(CellValue::Float(120.0))
    );
    assert_eq!(outcome.export.file_name, "reporte.xlsx");
    assert_eq!(outcome.export.path, Some(dir.path().join("reporte.xlsx")));
}
