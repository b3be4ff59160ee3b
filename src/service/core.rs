//! Core A2A protocol service implementation

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use serde_json::Value;
use tower_service::Service;

use crate::{
    codec::{error_message, Codec},
    protocol::{error::A2AError, operation::A2AOperation},
    service::{A2ARequest, A2AResponse},
    transport::{Transport, TransportRequest, TransportResponse},
};

/// Core A2A protocol service that wraps a transport
///
/// This service implements the Tower `Service` trait and provides the core logic
/// for executing A2A operations over any transport (HTTP, in-process)
pub struct A2AProtocolService<T> {
    transport: T,
    codec: Arc<dyn Codec>,
}

impl<T> A2AProtocolService<T>
where
    T: Transport,
{
    /// Create a new A2A protocol service
    ///
    /// # Arguments
    ///
    /// * `transport` - The underlying transport implementation
    /// * `codec` - The codec for serialization/deserialization
    pub fn new(transport: T, codec: Arc<dyn Codec>) -> Self {
        Self { transport, codec }
    }

    /// The wrapped transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build a transport request from an A2A operation
    fn build_transport_request(
        req: &A2ARequest,
        codec: &dyn Codec,
    ) -> Result<TransportRequest, A2AError> {
        let endpoint = req.operation.endpoint();
        let method = req.operation.method();

        let mut transport_req = TransportRequest::new(endpoint, method);

        transport_req = transport_req.header("Content-Type", codec.content_type());
        transport_req = transport_req.header("Accept", codec.content_type());

        // Add custom metadata headers
        for (key, value) in &req.context.metadata {
            transport_req = transport_req.header(key.clone(), value.clone());
        }

        // Encode request body (if needed)
        let body = codec.encode_request(&req.operation)?;
        if !body.is_empty() && method != "GET" {
            transport_req = transport_req.body(body);
        }

        Ok(transport_req)
    }

    /// Parse a transport response into an A2A response
    fn parse_transport_response(
        transport_resp: TransportResponse,
        codec: &dyn Codec,
        operation: &A2AOperation,
    ) -> Result<A2AResponse, A2AError> {
        // Check for error status codes
        if !transport_resp.is_success() {
            return Err(Self::handle_error_response(&transport_resp, operation));
        }

        // Decode the response body
        codec.decode_response(&transport_resp.body, operation)
    }

    /// Handle error responses from the transport
    ///
    /// The error kind follows the operation that failed: discovery and task
    /// submission have their own kinds, and a message reply carrying an
    /// `error` field is a protocol error whatever its status.
    fn handle_error_response(transport_resp: &TransportResponse, operation: &A2AOperation) -> A2AError {
        let json = serde_json::from_slice::<Value>(&transport_resp.body).ok();
        let message = json.as_ref().and_then(|json| {
            json.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| error_message(json))
        });
        let detail = match &message {
            Some(message) => format!("HTTP {}: {}", transport_resp.status, message),
            None => format!("HTTP error: {}", transport_resp.status),
        };

        match operation {
            A2AOperation::DiscoverAgent => A2AError::Discovery(detail),
            A2AOperation::CreateTask { .. } => A2AError::Submission(detail),
            A2AOperation::GetTask { task_id } if transport_resp.status == 404 => {
                A2AError::TaskNotFound {
                    task_id: task_id.clone(),
                }
            }
            A2AOperation::SendMessage { .. } => match json.as_ref().and_then(error_message) {
                Some(message) => A2AError::Protocol(message),
                None => A2AError::Transport(detail),
            },
            A2AOperation::GetTask { .. } => A2AError::Transport(detail),
        }
    }
}

impl<T> Service<A2ARequest> for A2AProtocolService<T>
where
    T: Transport + Clone,
{
    type Response = A2AResponse;
    type Error = A2AError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.transport.poll_ready(cx)
    }

    fn call(&mut self, req: A2ARequest) -> Self::Future {
        let transport = self.transport.clone();
        let codec = self.codec.clone();

        Box::pin(async move {
            // Convert A2A request to transport request
            let transport_req = Self::build_transport_request(&req, codec.as_ref())?;

            if req.operation.is_streaming() {
                let events = transport.execute_streaming(transport_req).await?;
                return Ok(A2AResponse::Events(events));
            }

            // Execute via transport
            let transport_resp = transport.execute(transport_req).await?;

            // Parse transport response to A2A response
            let response =
                Self::parse_transport_response(transport_resp, codec.as_ref(), &req.operation)?;

            Ok(response)
        })
    }
}

impl<T> Clone for A2AProtocolService<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            codec: self.codec.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use futures::StreamExt;
    use serde_json::json;

    use crate::{
        codec::{JsonCodec, JsonRpcCodec},
        protocol::message::Message,
        service::RequestContext,
        transport::mock::MockTransport,
    };

    use super::*;

    fn request(operation: A2AOperation) -> A2ARequest {
        A2ARequest::new(operation, RequestContext::new("mock://agent"))
    }

    fn send(stream: bool) -> A2AOperation {
        A2AOperation::SendMessage {
            message: Message::user("Hello"),
            stream,
        }
    }

    #[tokio::test]
    async fn test_service_send_message() {
        let transport = MockTransport::new(|req| {
            assert_eq!(req.method, "POST");
            assert_eq!(req.endpoint, "");
            assert_eq!(req.headers.get("Content-Type").unwrap(), "application/json");

            let body = json!({
                "jsonrpc": "2.0",
                "result": {"artifacts": [{"parts": [{"text": "hi"}]}]},
                "id": 1
            });
            TransportResponse::new(200).body(Bytes::from(body.to_string()))
        });

        let mut service = A2AProtocolService::new(transport, Arc::new(JsonRpcCodec::new()));

        let response = service.call(request(send(false))).await.unwrap();
        let reply = response.into_reply().unwrap();
        assert_eq!(reply["artifacts"][0]["parts"][0]["text"], "hi");
    }

    #[tokio::test]
    async fn test_get_requests_carry_no_body() {
        let transport = MockTransport::new(|req| {
            assert!(req.body.is_empty());
            TransportResponse::new(200).body(Bytes::from(r#"{"status": "working"}"#))
        });

        let mut service = A2AProtocolService::new(transport, Arc::new(JsonCodec::new()));
        let operation = A2AOperation::GetTask {
            task_id: "task-123".to_string(),
        };

        assert!(service.call(request(operation)).await.unwrap().into_task().is_some());
    }

    #[tokio::test]
    async fn test_error_kind_follows_operation() {
        let transport = MockTransport::new(|_req| {
            TransportResponse::new(500).body(Bytes::from(r#"{"message": "down"}"#))
        });
        let mut service = A2AProtocolService::new(transport, Arc::new(JsonCodec::new()));

        let result = service.call(request(A2AOperation::DiscoverAgent)).await;
        assert!(matches!(result, Err(A2AError::Discovery(msg)) if msg == "HTTP 500: down"));

        let create = A2AOperation::CreateTask {
            input: "q".to_string(),
        };
        let result = service.call(request(create)).await;
        assert!(matches!(result, Err(A2AError::Submission(_))));

        let result = service.call(request(send(false))).await;
        assert!(matches!(result, Err(A2AError::Transport(_))));
    }

    #[tokio::test]
    async fn test_task_not_found() {
        let transport = MockTransport::new(|_req| TransportResponse::new(404));
        let mut service = A2AProtocolService::new(transport, Arc::new(JsonCodec::new()));

        let operation = A2AOperation::GetTask {
            task_id: "task-9".to_string(),
        };
        match service.call(request(operation)).await {
            Err(A2AError::TaskNotFound { task_id }) => assert_eq!(task_id, "task-9"),
            other => panic!("Expected TaskNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_body_on_message_is_protocol_error() {
        let transport = MockTransport::new(|_req| {
            TransportResponse::new(400).body(Bytes::from(
                r#"{"jsonrpc":"2.0","error":{"code":-32602,"message":"bad params"},"id":1}"#,
            ))
        });
        let mut service = A2AProtocolService::new(transport, Arc::new(JsonRpcCodec::new()));

        let result = service.call(request(send(false))).await;
        assert!(matches!(result, Err(A2AError::Protocol(msg)) if msg == "bad params"));
    }

    #[tokio::test]
    async fn test_streaming_returns_events() {
        let transport = MockTransport::new(|_req| TransportResponse::new(500))
            .with_events(vec![json!({"kind": "artifact-update", "artifact": {"parts": [{"text": "a"}]}})]);
        let mut service = A2AProtocolService::new(transport, Arc::new(JsonRpcCodec::new()));

        let events = service.call(request(send(true))).await.unwrap().into_events().unwrap();
        let events: Vec<_> = events.collect().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].as_ref().unwrap().artifact_text(), Some("a".to_string()));
    }
}
