//! Error type for the injected search capability.

use thiserror::Error;

/// Failure modes of a search request.
///
/// `Cancelled` is not surfaced to the user: a superseded request's outcome
/// is discarded whether it succeeded or failed. Every other variant
/// transitions the controller to the `Error` phase.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// The request was cooperatively cancelled.
    #[error("request cancelled")]
    Cancelled,

    /// The service answered with a non-success status.
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    /// The service could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Deserialization(String),
}

impl SearchError {
    /// Whether this failure is a cancellation, i.e. a no-op rather than an
    /// error transition.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_cancelled_classifies_as_cancellation() {
        assert!(SearchError::Cancelled.is_cancelled());
        assert!(!SearchError::Http { status: 500 }.is_cancelled());
        assert!(!SearchError::Connection("refused".into()).is_cancelled());
    }
}
