//! Server-Sent Events (SSE) codec for streaming A2A responses
//!
//! This codec handles parsing SSE event streams whose data lines carry either
//! JSON-RPC 2.0 responses or bare event objects.

use std::fmt::Display;

use bytes::Bytes;
use eventsource_stream::Eventsource;
use futures::{
    future,
    stream::{BoxStream, Stream, StreamExt},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    codec::error_message,
    protocol::{error::A2AError, task::TaskStatus, Artifact, Message},
};

/// Stream of decoded events, as handed from a transport to the client
pub type EventStream = BoxStream<'static, Result<StreamEvent, A2AError>>;

/// Streaming event containing A2A protocol data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamEvent {
    /// Event kind (e.g., "artifact-update", "status-update")
    pub kind: String,

    /// Event payload
    pub payload: Value,

    /// Whether this is the final event in the stream
    #[serde(default)]
    pub final_event: bool,
}

impl StreamEvent {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        let final_event = payload.get("final").and_then(Value::as_bool).unwrap_or(false);
        Self {
            kind: kind.into(),
            payload,
            final_event,
        }
    }

    /// Decode one event object
    ///
    /// JSON-RPC envelopes are unwrapped; an `error` member becomes an error.
    pub fn from_value(mut value: Value) -> Result<Self, A2AError> {
        if let Some(message) = error_message(&value) {
            return Err(A2AError::Protocol(format!("SSE stream error: {}", message)));
        }

        if let Some(result) = value.get_mut("result").map(Value::take) {
            value = result;
        }

        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .unwrap_or("event")
            .to_string();

        Ok(Self::new(kind, value))
    }

    /// State carried by a status update, either under `status.state` or `state`
    fn state(&self) -> Option<TaskStatus> {
        let state = self
            .payload
            .pointer("/status/state")
            .or_else(|| self.payload.get("state"))?;
        serde_json::from_value(state.clone()).ok()
    }

    /// Check if this event represents a terminal state
    pub fn is_terminal(&self) -> bool {
        self.final_event || self.state().is_some_and(|state| state.is_terminal())
    }

    /// Failure reason, if this event reports the task as failed
    pub fn failure(&self) -> Option<String> {
        if self.state()? != TaskStatus::Failed {
            return None;
        }

        let from_message = self
            .payload
            .pointer("/status/message")
            .cloned()
            .and_then(|message| serde_json::from_value::<Message>(message).ok())
            .and_then(|message| message.first_text().map(str::to_string));

        Some(
            from_message
                .or_else(|| error_message(&self.payload))
                .unwrap_or_else(|| "unknown error".to_string()),
        )
    }

    /// Text of the artifact carried by this event
    ///
    /// Artifact updates carry a single `artifact`; task snapshots carry an
    /// `artifacts` list, of which the first is read.
    pub fn artifact_text(&self) -> Option<String> {
        let artifact = self
            .payload
            .get("artifact")
            .or_else(|| self.payload.pointer("/artifacts/0"))?;

        let artifact: Artifact = serde_json::from_value(artifact.clone()).ok()?;
        artifact.first_text().map(str::to_string)
    }
}

/// SSE codec for parsing streaming responses
#[derive(Debug, Clone, Default)]
pub struct SseCodec;

impl SseCodec {
    /// Create a new SSE codec
    pub fn new() -> Self {
        Self
    }

    /// Whether a response with this `Content-Type` carries an event stream
    ///
    /// A missing header is given the benefit of the doubt.
    pub fn is_event_stream(content_type: Option<&str>) -> bool {
        content_type.map_or(true, |content_type| {
            content_type
                .split(';')
                .next()
                .is_some_and(|media| media.trim().eq_ignore_ascii_case("text/event-stream"))
        })
    }

    /// Error for a streaming request answered with a plain body
    ///
    /// A JSON-RPC server rejecting `message/stream` answers with an ordinary
    /// JSON envelope; its `error` message is surfaced when present.
    pub fn unexpected_body(content_type: Option<&str>, body: &[u8]) -> A2AError {
        let reported = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|payload| error_message(&payload));

        A2AError::Protocol(reported.unwrap_or_else(|| {
            format!(
                "Expected an event stream, got '{}'",
                content_type.unwrap_or("no content type")
            )
        }))
    }

    /// Parse an SSE byte stream into a stream of events
    ///
    /// This method takes a byte stream (typically from reqwest) and parses it
    /// into individual events. Events without data are skipped.
    pub fn parse_stream<S, E>(&self, byte_stream: S) -> EventStream
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        byte_stream
            .eventsource()
            .filter_map(|result| {
                future::ready(match result {
                    Ok(event) if event.data.trim().is_empty() => None,
                    Ok(event) => Some(
                        serde_json::from_str::<Value>(&event.data)
                            .map_err(|e| {
                                A2AError::Protocol(format!("Failed to parse SSE event data: {}", e))
                            })
                            .and_then(StreamEvent::from_value),
                    ),
                    Err(e) => Some(Err(A2AError::Transport(format!("SSE stream error: {}", e)))),
                })
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn byte_stream(data: &'static str) -> impl Stream<Item = Result<Bytes, std::io::Error>> {
        futures::stream::once(async move { Ok(Bytes::from(data)) })
    }

    #[test]
    fn test_is_event_stream() {
        assert!(SseCodec::is_event_stream(Some("text/event-stream")));
        assert!(SseCodec::is_event_stream(Some("Text/Event-Stream; charset=utf-8")));
        assert!(SseCodec::is_event_stream(None));
        assert!(!SseCodec::is_event_stream(Some("application/json")));
    }

    #[test]
    fn test_unexpected_body_surfaces_rpc_error() {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32603, "message": "model offline"}
        });

        let error = SseCodec::unexpected_body(
            Some("application/json"),
            &serde_json::to_vec(&body).unwrap(),
        );
        assert!(matches!(error, A2AError::Protocol(msg) if msg == "model offline"));
    }

    #[test]
    fn test_unexpected_body_without_error() {
        let error = SseCodec::unexpected_body(Some("text/html"), b"<html></html>");
        assert!(matches!(error, A2AError::Protocol(msg) if msg.contains("text/html")));
    }

    #[test]
    fn test_event_is_terminal() {
        let event = StreamEvent::new("status-update", json!({"status": {"state": "completed"}}));
        assert!(event.is_terminal());

        let event = StreamEvent::new("artifact-update", json!({"final": true}));
        assert!(event.is_terminal());

        let event = StreamEvent::new("status-update", json!({"state": "working"}));
        assert!(!event.is_terminal());
    }

    #[test]
    fn test_event_failure() {
        let event = StreamEvent::new(
            "status-update",
            json!({"status": {"state": "failed", "message": {"parts": [{"text": "quota exceeded"}]}}}),
        );
        assert_eq!(event.failure(), Some("quota exceeded".to_string()));

        let event = StreamEvent::new("status-update", json!({"state": "failed"}));
        assert_eq!(event.failure(), Some("unknown error".to_string()));

        let event = StreamEvent::new("status-update", json!({"state": "completed"}));
        assert_eq!(event.failure(), None);
    }

    #[test]
    fn test_artifact_text() {
        let event = StreamEvent::new(
            "artifact-update",
            json!({"artifact": {"parts": [{"kind": "text", "text": "partial"}]}}),
        );
        assert_eq!(event.artifact_text(), Some("partial".to_string()));

        let event = StreamEvent::new(
            "task",
            json!({"artifacts": [{"parts": [{"text": "first"}]}, {"parts": [{"text": "second"}]}]}),
        );
        assert_eq!(event.artifact_text(), Some("first".to_string()));

        let event = StreamEvent::new("status-update", json!({"state": "working"}));
        assert_eq!(event.artifact_text(), None);
    }

    #[tokio::test]
    async fn test_parse_sse_stream() {
        let sse_data = "data: {\"jsonrpc\":\"2.0\",\"result\":{\"kind\":\"status-update\",\"state\":\"working\"},\"id\":1}\n\n\
                        data: {\"kind\":\"artifact-update\",\"final\":true}\n\n";

        let mut events = SseCodec::new().parse_stream(byte_stream(sse_data));

        let first = events.next().await.unwrap().unwrap();
        assert_eq!(first.kind, "status-update");
        assert!(!first.final_event);

        let second = events.next().await.unwrap().unwrap();
        assert_eq!(second.kind, "artifact-update");
        assert!(second.final_event);

        assert!(events.next().await.is_none());
    }

    #[tokio::test]
    async fn test_parse_sse_error() {
        let sse_data = "data: {\"jsonrpc\":\"2.0\",\"error\":{\"code\":-32600,\"message\":\"Invalid Request\"},\"id\":1}\n\n";

        let mut events = SseCodec::new().parse_stream(byte_stream(sse_data));

        match events.next().await.unwrap() {
            Err(A2AError::Protocol(msg)) => assert!(msg.contains("Invalid Request")),
            other => panic!("Expected Protocol error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_parse_malformed_event_data() {
        let mut events = SseCodec::new().parse_stream(byte_stream("data: not json\n\n"));

        assert!(matches!(
            events.next().await.unwrap(),
            Err(A2AError::Protocol(_))
        ));
    }
}
