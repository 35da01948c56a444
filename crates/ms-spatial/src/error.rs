//! Spatial-subsystem error type.

use thiserror::Error;

use ms_core::LinkId;

/// Errors produced by `ms-spatial`.  All of them are fatal at startup: a
/// filter or network that failed to load is never handed out half-built.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("region row {row}: invalid WKT: {message}")]
    Wkt { row: usize, message: String },

    #[error("region {index}: expected POLYGON or MULTIPOLYGON, got {kind}")]
    NotPolygonal { index: usize, kind: &'static str },

    #[error("missing required column {0:?}")]
    MissingColumn(&'static str),

    #[error("link {0} defined twice")]
    DuplicateLink(LinkId),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
