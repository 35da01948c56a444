use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("event row {row}: {kind} event is missing {field:?}")]
    MissingField {
        row:   usize,
        kind:  String,
        field: &'static str,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EventResult<T> = Result<T, EventError>;
