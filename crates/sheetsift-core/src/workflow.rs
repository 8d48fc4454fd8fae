//! Filter, sort, summarize and export a confirmed sheet.

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use sheetsift_model::{
    Action, ExportOptions, FilterPredicate, MAX_FILTERS, RawFilter, SortKey, StatsSummary,
};
use sheetsift_output::{default_file_stem, export_table, resolve_file_name, write_download};
use sheetsift_transform::{
    TransformError, filter_chain, filter_rows, resolve_value, sort_rows, summarize,
};
use tracing::{info, info_span};

use crate::error::{CoreError, Result};
use crate::gate::ConfirmedSheet;

/// The selections that drive one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowRequest {
    /// Applied in order; each narrows the previous result.
    pub filters: Vec<FilterPredicate>,
    /// Applied after all filters.
    pub sort: Option<SortKey>,
}

impl WorkflowRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: FilterPredicate) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn action(&self) -> Option<Action> {
        Action::infer(!self.filters.is_empty(), self.sort.is_some())
    }

    /// Column reported in the statistics: the sort column, else the last
    /// filter column.
    pub fn stats_column(&self) -> Option<&str> {
        self.sort
            .as_ref()
            .map(|key| key.column.as_str())
            .or_else(|| self.filters.last().map(|f| f.column.as_str()))
    }

    /// Column embedded in the default file name: the first filter column,
    /// else the sort column.
    pub fn naming_column(&self) -> Option<&str> {
        self.filters
            .first()
            .map(|f| f.column.as_str())
            .or_else(|| self.sort.as_ref().map(|key| key.column.as_str()))
    }
}

/// The transformed table and what is reported about it.
#[derive(Debug, Clone)]
pub struct WorkflowResult {
    pub action: Action,
    pub table: DataFrame,
    /// Rows of the confirmed sheet before filtering.
    pub source_rows: usize,
    pub stats: StatsSummary,
    /// Default download name without extension.
    pub default_stem: String,
}

/// Where the result ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub file_name: String,
    /// `None` for dry runs.
    pub path: Option<PathBuf>,
    pub bytes: usize,
}

/// Resolves typed-in filters against the sheet.
///
/// Each value is looked up among the candidates of the table filtered by the
/// previous predicates, so every resolved predicate selects at least one row.
pub fn resolve_filters(sheet: &ConfirmedSheet, raw: &[RawFilter]) -> Result<Vec<FilterPredicate>> {
    if raw.len() > MAX_FILTERS {
        return Err(TransformError::TooManyFilters { count: raw.len() }.into());
    }
    let mut current = sheet.data().clone();
    let mut predicates = Vec::with_capacity(raw.len());
    for filter in raw {
        let value = resolve_value(&current, &filter.column, &filter.value)?;
        let predicate = FilterPredicate::new(filter.column.clone(), value);
        current = filter_rows(&current, &predicate)?;
        predicates.push(predicate);
    }
    Ok(predicates)
}

/// Applies the request to the confirmed sheet. Filters always run before the sort.
pub fn apply_request(
    sheet: &ConfirmedSheet,
    request: &WorkflowRequest,
    today: NaiveDate,
) -> Result<WorkflowResult> {
    let action = request.action().ok_or(CoreError::NothingRequested)?;
    let span = info_span!("workflow", action = ?action);
    let _guard = span.enter();
    let started = Instant::now();

    let source_rows = sheet.data().height();
    let filtered = filter_chain(sheet.data(), &request.filters)?;
    let table = match &request.sort {
        Some(key) => sort_rows(&filtered, key)?,
        None => filtered,
    };

    let stats_column = request.stats_column().ok_or(CoreError::NothingRequested)?;
    let stats = summarize(&table, stats_column)?;
    let naming_column = request.naming_column().ok_or(CoreError::NothingRequested)?;
    let default_stem = default_file_stem(action, naming_column, today);

    info!(
        source_rows,
        result_rows = table.height(),
        filters = request.filters.len(),
        sorted = request.sort.is_some(),
        duration_ms = started.elapsed().as_millis(),
        "workflow complete"
    );
    Ok(WorkflowResult {
        action,
        table,
        source_rows,
        stats,
        default_stem,
    })
}

/// Serializes the result and writes it into the output directory.
///
/// With `dry_run` the workbook is still built, so serialization errors
/// surface, but nothing is written.
pub fn export_result(
    result: &WorkflowResult,
    options: &ExportOptions,
    dry_run: bool,
) -> Result<ExportReport> {
    let span = info_span!("export", dry_run);
    let _guard = span.enter();
    let file_name = resolve_file_name(options.file_name.as_deref(), &result.default_stem)?;
    let bytes = export_table(&result.table, &options.strategy)?;
    let path = if dry_run {
        None
    } else {
        Some(write_download(&options.out_dir, &file_name, &bytes)?)
    };
    Ok(ExportReport {
        file_name,
        path,
        bytes: bytes.len(),
    })
}
