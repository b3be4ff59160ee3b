//! JSON-RPC 2.0 codec for A2A protocol
//!
//! This codec wraps message operations in JSON-RPC 2.0 envelopes for agents
//! that use the JSON-RPC protocol binding. Discovery and task resources are
//! delegated to the inner JSON codec.

use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    codec::Codec,
    protocol::{error::A2AError, operation::A2AOperation},
    service::response::A2AResponse,
};

use super::json::JsonCodec;

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: &'static str,
    method: &'static str,
    params: Value,
    id: u64,
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Deserialize)]
#[allow(unused)]
struct JsonRpcResponse {
    #[serde(default)]
    jsonrpc: String,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
    #[serde(default)]
    id: Value,
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Deserialize)]
#[allow(unused)]
struct JsonRpcError {
    #[serde(default)]
    code: Option<i64>,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

/// JSON-RPC 2.0 codec that wraps A2A message operations
///
/// Request ids are integers, increasing per codec instance.
#[derive(Debug)]
pub struct JsonRpcCodec {
    /// Inner JSON codec for the REST resources
    inner: JsonCodec,
    next_id: AtomicU64,
}

impl JsonRpcCodec {
    /// Create a new JSON-RPC codec
    pub fn new() -> Self {
        Self {
            inner: JsonCodec::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Map a message operation to a JSON-RPC method name
    fn method_for(stream: bool) -> &'static str {
        if stream {
            "message/stream"
        } else {
            "message/send"
        }
    }
}

impl Default for JsonRpcCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for JsonRpcCodec {
    fn encode_request(&self, operation: &A2AOperation) -> Result<Bytes, A2AError> {
        let A2AOperation::SendMessage { message, stream } = operation else {
            return self.inner.encode_request(operation);
        };

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method: Self::method_for(*stream),
            params: json!({ "message": message }),
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };

        let bytes = serde_json::to_vec(&request)?;
        Ok(Bytes::from(bytes))
    }

    fn decode_response(
        &self,
        body: &[u8],
        operation: &A2AOperation,
    ) -> Result<A2AResponse, A2AError> {
        if !matches!(operation, A2AOperation::SendMessage { .. }) {
            return self.inner.decode_response(body, operation);
        }

        // Empty responses
        if body.is_empty() {
            return Ok(A2AResponse::Empty);
        }

        let jsonrpc_response: JsonRpcResponse = serde_json::from_slice(body)
            .map_err(|e| A2AError::Protocol(format!("Failed to parse JSON-RPC response: {}", e)))?;

        // A present error wins over any result
        if let Some(error) = jsonrpc_response.error {
            return Err(A2AError::Protocol(error.message));
        }

        // Without an error, an absent or null result is an empty reply
        Ok(A2AResponse::Reply(
            jsonrpc_response.result.unwrap_or(Value::Null),
        ))
    }

    fn content_type(&self) -> &str {
        "application/json"
    }
}

#[cfg(test)]
mod tests {
    use crate::protocol::message::Message;

    use super::*;

    fn send(stream: bool) -> A2AOperation {
        A2AOperation::SendMessage {
            message: Message::user("Hello"),
            stream,
        }
    }

    #[test]
    fn test_encode_send_message() {
        let codec = JsonRpcCodec::new();

        let bytes = codec.encode_request(&send(false)).unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["method"], "message/send");
        assert_eq!(json["params"]["message"]["role"], "user");
        assert_eq!(json["params"]["message"]["parts"][0]["kind"], "text");
        assert!(json["id"].is_u64());
    }

    #[test]
    fn test_request_ids_increase() {
        let codec = JsonRpcCodec::new();

        let first: Value = serde_json::from_slice(&codec.encode_request(&send(false)).unwrap()).unwrap();
        let second: Value = serde_json::from_slice(&codec.encode_request(&send(false)).unwrap()).unwrap();
        assert_eq!(first["id"], 1);
        assert_eq!(second["id"], 2);
    }

    #[test]
    fn test_encode_streaming_message() {
        let codec = JsonRpcCodec::new();

        let json: Value = serde_json::from_slice(&codec.encode_request(&send(true)).unwrap()).unwrap();
        assert_eq!(json["method"], "message/stream");
    }

    #[test]
    fn test_task_operations_use_rest_bodies() {
        let codec = JsonRpcCodec::new();
        let op = A2AOperation::CreateTask {
            input: "q".to_string(),
        };

        let json: Value = serde_json::from_slice(&codec.encode_request(&op).unwrap()).unwrap();
        assert_eq!(json, json!({"input": "q"}));
    }

    #[test]
    fn test_decode_success_response() {
        let codec = JsonRpcCodec::new();
        let json = r#"{
            "jsonrpc": "2.0",
            "result": {
                "id": "task-123",
                "status": {"state": "completed"},
                "artifacts": [{"parts": [{"kind": "text", "text": "Answer"}]}]
            },
            "id": 1
        }"#;

        match codec.decode_response(json.as_bytes(), &send(false)).unwrap() {
            A2AResponse::Reply(result) => assert_eq!(result["id"], "task-123"),
            other => panic!("Expected Reply response, got {:?}", other),
        }
    }

    #[test]
    fn test_error_takes_precedence_over_result() {
        let codec = JsonRpcCodec::new();
        let json = r#"{
            "jsonrpc": "2.0",
            "result": {"parts": [{"text": "ignored"}]},
            "error": {"code": -32600, "message": "Invalid Request"},
            "id": 1
        }"#;

        match codec.decode_response(json.as_bytes(), &send(false)) {
            Err(A2AError::Protocol(msg)) => assert_eq!(msg, "Invalid Request"),
            other => panic!("Expected Protocol error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_missing_or_null_result() {
        let codec = JsonRpcCodec::new();

        for json in [
            r#"{"jsonrpc": "2.0", "id": 1}"#,
            r#"{"jsonrpc": "2.0", "result": null, "id": 1}"#,
        ] {
            let response = codec.decode_response(json.as_bytes(), &send(false)).unwrap();
            assert_eq!(response.into_reply(), Some(Value::Null));
        }
    }
}
