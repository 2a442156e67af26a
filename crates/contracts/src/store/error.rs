use crate::shared::calendar::CalendarError;
use thiserror::Error;

/// Failure of a row-store call. Every widget shows it as a single message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("{0}")]
    Unsupported(String),

    /// Produced by the in-memory store on request.
    #[error("injected failure: {0}")]
    Injected(String),
}

impl From<CalendarError> for StoreError {
    fn from(err: CalendarError) -> Self {
        StoreError::InvalidQuery(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}
