//! Machine-readable summary of a `run` pass.

use std::path::PathBuf;

use serde::Serialize;
use sheetsift_core::{ExportReport, WorkflowRequest, WorkflowResult};
use sheetsift_model::{Action, SortDirection, StatsSummary};
use sheetsift_output::XLSX_MIME;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub source: String,
    pub header_row: usize,
    pub columns: Vec<String>,
    pub action: Action,
    pub filters: Vec<FilterReport>,
    pub sort: Option<SortReport>,
    pub source_rows: usize,
    pub result_rows: usize,
    pub stats: StatsSummary,
    pub file_name: String,
    pub content_type: &'static str,
    /// Absent for dry runs.
    pub output: Option<PathBuf>,
    pub bytes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterReport {
    pub column: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SortReport {
    pub column: String,
    pub direction: SortDirection,
}

impl RunReport {
    pub fn new(
        source: &str,
        header_row: usize,
        request: &WorkflowRequest,
        result: &WorkflowResult,
        export: &ExportReport,
    ) -> Self {
        Self {
            source: source.to_string(),
            header_row,
            columns: result
                .table
                .get_column_names()
                .into_iter()
                .map(|name| name.to_string())
                .collect(),
            action: result.action,
            filters: request
                .filters
                .iter()
                .map(|f| FilterReport {
                    column: f.column.clone(),
                    value: f.value.to_string(),
                })
                .collect(),
            sort: request.sort.as_ref().map(|key| SortReport {
                column: key.column.clone(),
                direction: key.direction,
            }),
            source_rows: result.source_rows,
            result_rows: result.table.height(),
            stats: result.stats.clone(),
            file_name: export.file_name.clone(),
            content_type: XLSX_MIME,
            output: export.path.clone(),
            bytes: export.bytes,
        }
    }
}
