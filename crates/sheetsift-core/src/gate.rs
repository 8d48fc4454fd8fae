//! Header confirmation gate.
//!
//! Nothing downstream of loading accepts a bare [`LoadedSheet`]: filtering,
//! sorting and exporting all take a [`ConfirmedSheet`], and the only way to
//! obtain one is an affirmative answer here.

use polars::prelude::DataFrame;
use sheetsift_ingest::LoadedSheet;
use sheetsift_model::HeaderRow;

/// Question shown next to the detected columns.
pub const CONFIRM_HEADERS_PROMPT: &str = "Are these headers correct?";

/// Warning shown when the headers are rejected.
pub const HEADERS_REJECTED_WARNING: &str =
    "Please adjust the header row number to the row that holds the column names.";

/// A loaded sheet whose headers the user accepted.
#[derive(Debug, Clone)]
pub struct ConfirmedSheet {
    sheet: LoadedSheet,
}

impl ConfirmedSheet {
    pub fn sheet(&self) -> &LoadedSheet {
        &self.sheet
    }

    pub fn data(&self) -> &DataFrame {
        &self.sheet.data
    }

    pub fn columns(&self) -> Vec<String> {
        self.sheet.columns()
    }

    pub fn header_row(&self) -> HeaderRow {
        self.sheet.header_row
    }
}

#[derive(Debug, Clone)]
pub enum GateOutcome {
    Confirmed(ConfirmedSheet),
    /// The pass stops; the user should pick another header row.
    Rejected { header_row: HeaderRow },
}

impl GateOutcome {
    pub fn confirmed(self) -> Option<ConfirmedSheet> {
        match self {
            Self::Confirmed(sheet) => Some(sheet),
            Self::Rejected { .. } => None,
        }
    }
}

/// Turns the user's answer into a gate outcome.
pub fn confirm_headers(sheet: LoadedSheet, accepted: bool) -> GateOutcome {
    if accepted {
        tracing::info!(header_row = sheet.header_row.get(), "headers confirmed");
        GateOutcome::Confirmed(ConfirmedSheet { sheet })
    } else {
        tracing::warn!(header_row = sheet.header_row.get(), "headers rejected");
        GateOutcome::Rejected {
            header_row: sheet.header_row,
        }
    }
}
