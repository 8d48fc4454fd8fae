use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use sheetsift_core::{
    GateOutcome, HEADERS_REJECTED_WARNING, InteractiveOutcome, Session, WorkflowRequest,
    apply_request, confirm_headers, export_result, resolve_filters, run_interactive,
};
use sheetsift_model::{ExportOptions, ExportStrategy, HeaderRow, SortDirection, SortKey};
use sheetsift_transform::{PREVIEW_ROWS, distinct_values, preview};
use tracing::{debug, info, info_span, warn};

use sheetsift_cli::logging::redact_value;
use sheetsift_cli::render::{RESULT_DISPLAY_ROWS, print_frame, print_headers, values_table};
use sheetsift_cli::report::RunReport;

use crate::cli::{HeadersArgs, InteractiveArgs, RunArgs, SheetArgs, ValuesArgs};
use crate::prompt::DialoguerPrompter;

/// How a `run` invocation ended.
pub enum RunOutcome {
    /// Headers were shown but not confirmed; nothing was exported.
    Unconfirmed,
    Completed(Box<RunReport>),
}

pub fn run_headers(args: &HeadersArgs) -> Result<()> {
    let (session, header_row) = open_sheet(&args.sheet)?;
    let sheet = session.load(header_row).context("load sheet")?;
    print_headers(&sheet.columns(), header_row);
    println!("Suggested header row: {}", session.suggested_header_row());
    print_frame(
        &format!("First {PREVIEW_ROWS} of {} rows:", sheet.row_count()),
        &preview(&sheet.data),
        PREVIEW_ROWS,
    );
    Ok(())
}

pub fn run_values(args: &ValuesArgs) -> Result<()> {
    let (session, header_row) = open_sheet(&args.sheet)?;
    let sheet = session.load(header_row).context("load sheet")?;
    let values = distinct_values(&sheet.data, &args.column)
        .with_context(|| format!("list values of '{}'", args.column))?;
    println!("{}", values_table(&args.column, &values));
    println!("{} distinct values", values.len());
    Ok(())
}

pub fn run_run(args: &RunArgs) -> Result<RunOutcome> {
    let started = Instant::now();
    let (session, header_row) = open_sheet(&args.sheet)?;
    let span = info_span!("run", source = %session.source_name());
    let _guard = span.enter();

    let sheet = session.load(header_row).context("load sheet")?;
    if !args.yes {
        print_headers(&sheet.columns(), header_row);
    }
    let confirmed = match confirm_headers(sheet, args.yes) {
        GateOutcome::Confirmed(confirmed) => confirmed,
        GateOutcome::Rejected { header_row } => {
            warn!(header_row = header_row.get(), "headers not confirmed");
            eprintln!("{HEADERS_REJECTED_WARNING}");
            eprintln!("Re-run with --yes once the headers look right.");
            return Ok(RunOutcome::Unconfirmed);
        }
    };

    for filter in &args.filters {
        debug!(
            column = %filter.column,
            value = redact_value(&filter.value),
            "filter requested"
        );
    }
    let mut request = WorkflowRequest::new();
    for predicate in resolve_filters(&confirmed, &args.filters).context("resolve filters")? {
        request = request.with_filter(predicate);
    }
    if let Some(column) = &args.sort {
        let direction = SortDirection::from_descending(args.descending);
        request = request.with_sort(SortKey::new(column.clone(), direction));
    }

    let today = Local::now().date_naive();
    let result = apply_request(&confirmed, &request, today).context("apply request")?;

    let strategy = if args.staged_export {
        ExportStrategy::Staged {
            dir: std::env::temp_dir(),
        }
    } else {
        ExportStrategy::InMemory
    };
    let options = ExportOptions::new()
        .with_out_dir(args.out_dir.clone())
        .with_strategy(strategy)
        .with_file_name(args.output.clone());
    let export = export_result(&result, &options, args.dry_run).context("export result")?;

    info!(
        result_rows = result.table.height(),
        file_name = %export.file_name,
        dry_run = args.dry_run,
        duration_ms = started.elapsed().as_millis(),
        "run complete"
    );
    if !args.json {
        print_frame("Result:", &result.table, RESULT_DISPLAY_ROWS);
    }
    let report = RunReport::new(
        session.source_name(),
        confirmed.header_row().get(),
        &request,
        &result,
        &export,
    );
    Ok(RunOutcome::Completed(Box::new(report)))
}

pub fn run_interactive_cmd(args: &InteractiveArgs) -> Result<InteractiveOutcome> {
    let session = Session::open(&args.file)
        .with_context(|| format!("open {}", args.file.display()))?;
    let mut prompter = DialoguerPrompter::new();
    let options = ExportOptions::new().with_out_dir(args.out_dir.clone());
    let today = Local::now().date_naive();
    Ok(run_interactive(&session, &mut prompter, &options, today)?)
}

fn open_sheet(args: &SheetArgs) -> Result<(Session, HeaderRow)> {
    let session = Session::open(&args.file)
        .with_context(|| format!("open {}", args.file.display()))?;
    let header_row = match args.header_row {
        Some(row) => HeaderRow::new(row).context("invalid --header-row")?,
        None => {
            let suggested = session.suggested_header_row();
            info!(header_row = suggested.get(), "using detected header row");
            suggested
        }
    };
    Ok((session, header_row))
}
