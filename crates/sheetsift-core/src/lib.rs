//! Workflow layer of sheetsift.
//!
//! Ties loading, the header confirmation gate, transformations and export
//! into one pass over a [`Session`]. Both the one-shot CLI command and the
//! interactive flow go through [`apply_request`] and [`export_result`].

pub mod error;
pub mod gate;
pub mod interactive;
pub mod session;
pub mod workflow;

pub use error::{CoreError, Result};
pub use gate::{
    CONFIRM_HEADERS_PROMPT, ConfirmedSheet, GateOutcome, HEADERS_REJECTED_WARNING,
    confirm_headers,
};
pub use interactive::{
    InteractiveOutcome, Prompter, SECOND_FILTER_PROMPT, SORT_FILTERED_PROMPT, run_interactive,
};
pub use session::Session;
pub use workflow::{
    ExportReport, WorkflowRequest, WorkflowResult, apply_request, export_result, resolve_filters,
};
