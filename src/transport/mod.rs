//! Transport abstraction layer for A2A protocol

pub mod http;
pub mod local;
#[cfg(test)]
pub(crate) mod mock;

use std::{
    collections::HashMap,
    task::{Context, Poll},
};

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

pub use http::HttpTransport;
pub use local::{AgentHandler, LocalTransport};

use crate::{codec::EventStream, protocol::error::A2AError};

/// Protocol-agnostic transport request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// The endpoint path relative to the agent base URL (e.g., "/tasks", "/tasks/123")
    pub endpoint: String,

    /// HTTP method or equivalent operation (e.g., "POST", "GET")
    pub method: String,

    /// Headers or metadata for the request
    pub headers: HashMap<String, String>,

    /// Request body as bytes
    pub body: Bytes,
}

impl TransportRequest {
    /// Create a new transport request
    pub fn new(endpoint: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: method.into(),
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Add a header to the request
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body
    pub fn body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }
}

/// Protocol-agnostic transport response
#[derive(Debug)]
pub struct TransportResponse {
    /// Status code (e.g., HTTP status code)
    pub status: u16,

    /// Response headers or metadata
    pub headers: HashMap<String, String>,

    /// Response body as bytes
    pub body: Bytes,
}

impl TransportResponse {
    /// Create a new transport response
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Create a response whose body is the given JSON value
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status)
            .header("Content-Type", "application/json")
            .body(Bytes::from(value.to_string()))
    }

    /// Add a header to the response
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the response body
    pub fn body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }

    /// Check if the response indicates success (2xx status code)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Core transport trait for executing protocol-agnostic requests
///
/// This trait abstracts over the way bytes reach an agent (HTTP, in-process)
/// allowing the A2A protocol layer to work with any underlying transport.
#[async_trait]
pub trait Transport: Clone + Send + Sync + 'static {
    /// Check if the transport is ready to accept requests
    ///
    /// This is used by Tower's Service trait to implement backpressure
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), A2AError>>;

    /// Execute a transport request asynchronously
    ///
    /// # Arguments
    ///
    /// * `request` - The protocol-agnostic request to execute
    ///
    /// # Returns
    ///
    /// A protocol-agnostic response or an error
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, A2AError>;

    /// Execute a request whose reply is a stream of events
    ///
    /// The stream is finite; its end marks completion.
    async fn execute_streaming(&self, request: TransportRequest) -> Result<EventStream, A2AError> {
        Err(A2AError::Transport(format!(
            "streaming not supported by transport for {}",
            request.endpoint
        )))
    }

    /// Get the base URL for this transport
    fn base_url(&self) -> &Url;

    /// Check if this transport supports streaming responses
    fn supports_streaming(&self) -> bool {
        false
    }
}

/// Absolute URL of an endpoint below an agent base URL
///
/// The base keeps its path; a trailing slash is dropped so that the empty
/// endpoint addresses the base itself.
pub(crate) fn endpoint_url(base: &Url, endpoint: &str) -> String {
    format!("{}{}", base.as_str().trim_end_matches('/'), endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let base = Url::parse("http://localhost:8002").unwrap();
        assert_eq!(endpoint_url(&base, ""), "http://localhost:8002");
        assert_eq!(
            endpoint_url(&base, "/.well-known/agent.json"),
            "http://localhost:8002/.well-known/agent.json"
        );

        let base = Url::parse("http://localhost/agents/hr/").unwrap();
        assert_eq!(endpoint_url(&base, "/tasks/1"), "http://localhost/agents/hr/tasks/1");
    }

    #[test]
    fn test_response_status() {
        assert!(TransportResponse::new(204).is_success());
        assert!(!TransportResponse::new(404).is_success());
        assert!(!TransportResponse::new(500).is_success());
    }
}
