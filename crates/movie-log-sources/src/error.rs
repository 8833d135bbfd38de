use thiserror::Error;

/// Failures of a movie lookup.
///
/// `Canceled` is not a user-facing failure: a superseded request ends with it
/// and callers are expected to drop the outcome silently.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    NotFound(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("request canceled")]
    Canceled,
}

impl SourceError {
    pub fn is_canceled(&self) -> bool {
        matches!(self, SourceError::Canceled)
    }
}
