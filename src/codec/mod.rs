//! Serialization codecs for different protocol bindings

pub mod json;
pub mod jsonrpc;
pub mod metadata;
pub mod sse;

pub use json::JsonCodec;
pub use jsonrpc::JsonRpcCodec;
pub use sse::{EventStream, SseCodec, StreamEvent};

use crate::{
    protocol::{error::A2AError, operation::A2AOperation},
    service::response::A2AResponse,
};
use bytes::Bytes;
use serde_json::Value;

/// Codec trait for encoding and decoding A2A protocol messages
///
/// Different codecs implement different protocol bindings (HTTP+JSON, JSON-RPC).
pub trait Codec: Send + Sync {
    /// Serialize an A2A operation to bytes for transport
    ///
    /// Operations without a request body encode to empty bytes.
    fn encode_request(&self, operation: &A2AOperation) -> Result<Bytes, A2AError>;

    /// Deserialize transport response bytes to an A2A response
    ///
    /// # Arguments
    ///
    /// * `body` - The response body bytes
    /// * `operation` - The operation the request was encoded from
    fn decode_response(
        &self,
        body: &[u8],
        operation: &A2AOperation,
    ) -> Result<A2AResponse, A2AError>;

    /// Get the content type for this codec
    fn content_type(&self) -> &str;
}

/// Message of an `error` field, when the payload carries one
///
/// Accepts both `"error": "text"` and `"error": {"message": "text"}`.
pub(crate) fn error_message(payload: &Value) -> Option<String> {
    match payload.get("error")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(
            other
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_error_message_forms() {
        assert_eq!(
            error_message(&json!({"error": {"code": -1, "message": "nope"}})),
            Some("nope".to_string())
        );
        assert_eq!(error_message(&json!({"error": "flat"})), Some("flat".to_string()));
        assert_eq!(error_message(&json!({"error": null})), None);
        assert_eq!(error_message(&json!({"result": {}})), None);
    }
}
