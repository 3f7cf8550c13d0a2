use std::io;

use thiserror::Error;

/// Error type for configuration, invariant and IO failures of a preparation run.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("{kind} id '{id}' is missing from the {kind} id map")]
    UnmappedIdentifier { kind: &'static str, id: String },
    #[error("empty dataset: {0}")]
    EmptyDataset(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PrepError>;
