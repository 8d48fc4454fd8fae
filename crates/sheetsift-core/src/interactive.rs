//! Prompt-driven pass over a session.
//!
//! The flow mirrors the order in which a user works through a workbook:
//! header row, confirmation, preview, action, selections, result, file name.
//! The front end only has to implement [`Prompter`].

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use sheetsift_model::{
    Action, CellValue, ExportOptions, FilterPredicate, HeaderRow, MAX_FILTERS, SortDirection,
    SortKey,
};
use sheetsift_transform::{distinct_values, filter_rows, preview};
use tracing::debug;

use crate::error::Result;
use crate::gate::{
    CONFIRM_HEADERS_PROMPT, ConfirmedSheet, GateOutcome, HEADERS_REJECTED_WARNING, confirm_headers,
};
use crate::session::Session;
use crate::workflow::{ExportReport, WorkflowRequest, WorkflowResult, apply_request, export_result};

/// Prompt asking whether to narrow the filtered rows further.
pub const SECOND_FILTER_PROMPT: &str = "Filter the result by another column?";

/// Prompt asking whether to sort after filtering.
pub const SORT_FILTERED_PROMPT: &str = "Sort the filtered rows?";

/// User interaction needed by [`run_interactive`].
pub trait Prompter {
    /// Asks for the 1-based header row.
    fn header_row(&mut self, suggested: HeaderRow, sheet_rows: usize) -> Result<HeaderRow>;

    /// Yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    fn choose_action(&mut self) -> Result<Action>;

    fn choose_column(&mut self, prompt: &str, columns: &[String]) -> Result<String>;

    /// Picks one of the column's candidate values. `values` is never empty.
    fn choose_value(&mut self, column: &str, values: &[CellValue]) -> Result<CellValue>;

    fn choose_direction(&mut self) -> Result<SortDirection>;

    /// Asks for the download name; an empty answer keeps `default_stem`.
    fn file_name(&mut self, default_stem: &str) -> Result<String>;

    fn show_headers(&mut self, columns: &[String]);

    fn show_preview(&mut self, preview: &DataFrame);

    fn show_result(&mut self, result: &WorkflowResult);

    fn warn(&mut self, message: &str);
}

/// Result of a completed interactive pass.
#[derive(Debug, Clone)]
pub struct InteractiveOutcome {
    pub result: WorkflowResult,
    pub export: ExportReport,
}

/// Runs the full prompt sequence and writes the result.
///
/// A rejected header confirmation or an out-of-range header row asks for
/// the header row again instead of ending the session.
pub fn run_interactive(
    session: &Session,
    prompter: &mut dyn Prompter,
    export: &ExportOptions,
    today: NaiveDate,
) -> Result<InteractiveOutcome> {
    let sheet = confirm_loop(session, prompter)?;
    prompter.show_preview(&preview(sheet.data()));

    let action = prompter.choose_action()?;
    let request = select(&sheet, action, prompter)?;
    let result = apply_request(&sheet, &request, today)?;
    prompter.show_result(&result);

    let file_name = prompter.file_name(&result.default_stem)?;
    let options = export.clone().with_file_name(Some(file_name));
    let report = export_result(&result, &options, false)?;
    Ok(InteractiveOutcome {
        result,
        export: report,
    })
}

fn confirm_loop(session: &Session, prompter: &mut dyn Prompter) -> Result<ConfirmedSheet> {
    let mut suggested = session.suggested_header_row();
    loop {
        let header_row = prompter.header_row(suggested, session.sheet_rows())?;
        suggested = header_row;
        let sheet = match session.load(header_row) {
            Ok(sheet) => sheet,
            Err(err) if err.is_header_out_of_range() => {
                prompter.warn(&err.to_string());
                continue;
            }
            Err(err) => return Err(err),
        };
        prompter.show_headers(&sheet.columns());
        let accepted = prompter.confirm(CONFIRM_HEADERS_PROMPT, false)?;
        match confirm_headers(sheet, accepted) {
            GateOutcome::Confirmed(confirmed) => return Ok(confirmed),
            GateOutcome::Rejected { .. } => prompter.warn(HEADERS_REJECTED_WARNING),
        }
    }
}

fn select(
    sheet: &ConfirmedSheet,
    action: Action,
    prompter: &mut dyn Prompter,
) -> Result<WorkflowRequest> {
    let columns = sheet.columns();
    let mut request = WorkflowRequest::new();

    if action.filters() {
        let mut current = sheet.data().clone();
        while request.filters.len() < MAX_FILTERS {
            if !request.filters.is_empty() && !prompter.confirm(SECOND_FILTER_PROMPT, false)? {
                break;
            }
            let column = prompter.choose_column("Column to filter on", &columns)?;
            let values = distinct_values(&current, &column)?;
            if values.is_empty() {
                prompter.warn(&format!("column '{column}' has no values to filter on"));
                continue;
            }
            let value = prompter.choose_value(&column, &values)?;
            let predicate = FilterPredicate::new(column, value);
            current = filter_rows(&current, &predicate)?;
            debug!(rows = current.height(), "filter selected");
            request = request.with_filter(predicate);
        }
    }

    let wants_sort = match action {
        Action::Sort | Action::FilterThenSort => true,
        Action::Filter => prompter.confirm(SORT_FILTERED_PROMPT, true)?,
    };
    if wants_sort {
        let column = prompter.choose_column("Column to sort by", &columns)?;
        let direction = prompter.choose_direction()?;
        request = request.with_sort(SortKey::new(column, direction));
    }
    Ok(request)
}
