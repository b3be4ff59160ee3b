//! Error types for A2A protocol operations

use thiserror::Error;

/// Main error type for A2A protocol operations
///
/// Every variant is surfaced to the immediate caller; nothing in this crate
/// retries. Messages are written to be shown to a user verbatim.
#[derive(Debug, Error)]
pub enum A2AError {
    /// Transport-level error (network, connection, unexpected HTTP status)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The agent answered with an explicit error field
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Validation error (invalid request or response)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The agent descriptor could not be fetched or parsed
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// A task could not be created on the task endpoint
    #[error("Task submission failed: {0}")]
    Submission(String),

    /// The remote task reached the `failed` state
    #[error("Task failed: {reason}")]
    TaskFailed { reason: String },

    /// Task not found error
    #[error("Task not found: {task_id}")]
    TaskNotFound { task_id: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No terminal outcome within the time budget
    #[error("Request timeout")]
    Timeout,

    /// The manager could not forward a question to the chosen specialist
    #[error("Routing error: {0}")]
    Routing(String),

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

/// Result type alias for A2A operations
pub type A2AResult<T> = Result<T, A2AError>;

impl From<reqwest::Error> for A2AError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            A2AError::Timeout
        } else if err.is_connect() {
            A2AError::Transport(format!("Connection error: {}", err))
        } else {
            A2AError::Transport(err.to_string())
        }
    }
}

impl From<&str> for A2AError {
    fn from(s: &str) -> Self {
        A2AError::Other(s.to_string())
    }
}

impl From<String> for A2AError {
    fn from(s: String) -> Self {
        A2AError::Other(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = A2AError::TaskFailed {
            reason: "model unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Task failed: model unavailable");

        let err = A2AError::Protocol("Invalid Request".to_string());
        assert_eq!(err.to_string(), "Protocol error: Invalid Request");

        assert_eq!(A2AError::Timeout.to_string(), "Request timeout");
    }

    #[test]
    fn test_error_from_str() {
        let err: A2AError = "boom".into();
        assert!(matches!(err, A2AError::Other(msg) if msg == "boom"));
    }
}
