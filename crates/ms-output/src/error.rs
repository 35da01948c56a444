//! Error types for ms-output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when writing reports.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// A report file could not be written; `source` says why.
    #[error("failed to write {}: {source}", path.display())]
    Report {
        path:   PathBuf,
        #[source]
        source: Box<OutputError>,
    },
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
