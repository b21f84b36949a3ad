use std::io;

use thiserror::Error;

use extract::errors::ExtractError;

use crate::config::ConfigError;

/// Errors that end the CLI run.
#[derive(Debug, Error)]
pub enum CLIError {
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no columns specified; add at least one --column")]
    NoColumns,

    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
}
