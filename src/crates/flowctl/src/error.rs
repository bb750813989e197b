//! Error types for flowctl.

use crate::api::ResultType;
use thiserror::Error;

/// Result type alias for flowctl operations.
pub type Result<T> = std::result::Result<T, FlowCtlError>;

/// Errors that can occur when assembling or using an execution context.
#[derive(Debug, Error)]
pub enum FlowCtlError {
    /// A required context field was never set before `build()`.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A result type has no registered writer.
    #[error("no result writer registered for result type: {0}")]
    MissingResultWriter(ResultType),

    /// Client factory rejected its configuration.
    #[error("client configuration error: {0}")]
    Client(String),

    /// Session operation failed.
    #[error("session error: {0}")]
    Session(String),

    /// IO error while writing to the output sink.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize a command result.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl FlowCtlError {
    /// Check if this error is a construction-time configuration error.
    ///
    /// The hosting driver treats these as fatal startup failures: an
    /// incompletely configured context must never reach command execution.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FlowCtlError::MissingField(_) | FlowCtlError::MissingResultWriter(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = FlowCtlError::MissingField("session");
        assert_eq!(err.to_string(), "missing required field: session");
        assert!(err.is_configuration());
    }

    #[test]
    fn test_missing_writer_display() {
        let err = FlowCtlError::MissingResultWriter(ResultType::Json);
        assert_eq!(
            err.to_string(),
            "no result writer registered for result type: json"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn test_collaborator_errors_are_not_configuration() {
        assert!(!FlowCtlError::Client("bad url".to_string()).is_configuration());
        assert!(!FlowCtlError::Session("bad name".to_string()).is_configuration());
    }
}
