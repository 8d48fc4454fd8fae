use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("header row must be 1 or greater, got {0}")]
    InvalidHeaderRow(usize),
    #[error("invalid filter '{0}': expected COLUMN=VALUE")]
    InvalidFilter(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
