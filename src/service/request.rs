//! A2A service request types

use std::collections::HashMap;

use crate::protocol::operation::A2AOperation;

/// A request to the A2A service
///
/// This wraps an A2A operation with additional context needed for execution
#[derive(Debug, Clone)]
pub struct A2ARequest {
    /// The A2A operation to execute
    pub operation: A2AOperation,

    /// Request context (target agent, metadata)
    pub context: RequestContext,
}

impl A2ARequest {
    /// Create a new A2A request
    pub fn new(operation: A2AOperation, context: RequestContext) -> Self {
        Self { operation, context }
    }
}

/// Request context containing metadata and configuration
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Base URL of the target agent
    pub agent_url: String,

    /// Additional metadata headers
    pub metadata: HashMap<String, String>,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(agent_url: impl Into<String>) -> Self {
        Self {
            agent_url: agent_url.into(),
            metadata: HashMap::new(),
        }
    }

    /// Add a metadata header
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::message::Message;

    #[test]
    fn test_request_context_creation() {
        let context = RequestContext::new("http://localhost:8002").with_metadata("key", "value");

        assert_eq!(context.agent_url, "http://localhost:8002");
        assert_eq!(context.metadata.get("key"), Some(&"value".to_string()));
    }

    #[test]
    fn test_request_creation() {
        let operation = A2AOperation::SendMessage {
            message: Message::user("Test"),
            stream: false,
        };

        let request = A2ARequest::new(operation, RequestContext::new("http://localhost:8002"));

        assert_eq!(request.context.agent_url, "http://localhost:8002");
        assert!(!request.operation.is_streaming());
    }
}
