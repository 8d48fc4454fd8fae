//! Error types for the workflow layer.

use thiserror::Error;

use sheetsift_ingest::IngestError;
use sheetsift_model::ModelError;
use sheetsift_output::OutputError;
use sheetsift_transform::TransformError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Model(#[from] ModelError),

    /// Neither a filter nor a sort key was requested.
    #[error("nothing to do: request at least one filter or a sort column")]
    NothingRequested,

    /// The prompt front end failed or was aborted.
    #[error("prompt failed: {message}")]
    Prompt { message: String },
}

impl CoreError {
    /// Whether the error is a header row beyond the end of the sheet.
    pub fn is_header_out_of_range(&self) -> bool {
        matches!(self, Self::Ingest(IngestError::HeaderRowOutOfRange { .. }))
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
