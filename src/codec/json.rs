//! JSON codec for HTTP+JSON binding

use bytes::Bytes;
use serde_json::{json, Value};

use crate::{
    codec::{error_message, Codec},
    protocol::{
        agent::AgentDescriptor,
        error::A2AError,
        operation::A2AOperation,
        task::{Task, TaskCreated},
    },
    service::response::A2AResponse,
};

/// JSON codec for the HTTP+JSON protocol binding
///
/// Also used by [`JsonRpcCodec`](super::JsonRpcCodec) for the discovery and
/// task endpoints, which are plain REST resources in both bindings.
#[derive(Debug, Clone, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Create a new JSON codec
    pub fn new() -> Self {
        Self
    }
}

impl Codec for JsonCodec {
    fn encode_request(&self, operation: &A2AOperation) -> Result<Bytes, A2AError> {
        let json = match operation {
            A2AOperation::SendMessage { message, .. } => json!({ "message": message }),
            A2AOperation::CreateTask { input } => json!({ "input": input }),
            // GET requests don't have bodies
            A2AOperation::DiscoverAgent | A2AOperation::GetTask { .. } => return Ok(Bytes::new()),
        };

        let bytes = serde_json::to_vec(&json)?;
        Ok(Bytes::from(bytes))
    }

    fn decode_response(
        &self,
        body: &[u8],
        operation: &A2AOperation,
    ) -> Result<A2AResponse, A2AError> {
        match operation {
            A2AOperation::DiscoverAgent => {
                let descriptor: AgentDescriptor = serde_json::from_slice(body).map_err(|e| {
                    A2AError::Discovery(format!("malformed agent descriptor: {}", e))
                })?;
                Ok(A2AResponse::Descriptor(Box::new(descriptor)))
            }
            A2AOperation::SendMessage { .. } => {
                if body.is_empty() {
                    return Ok(A2AResponse::Empty);
                }

                let reply: Value = serde_json::from_slice(body)?;
                if let Some(message) = error_message(&reply) {
                    return Err(A2AError::Protocol(message));
                }
                Ok(A2AResponse::Reply(reply))
            }
            A2AOperation::CreateTask { .. } => {
                let created: TaskCreated = serde_json::from_slice(body).map_err(|e| {
                    A2AError::Submission(format!("malformed task creation response: {}", e))
                })?;
                Ok(A2AResponse::TaskCreated {
                    task_id: created.task_id,
                })
            }
            A2AOperation::GetTask { .. } => {
                let task: Task = serde_json::from_slice(body)?;
                Ok(A2AResponse::Task(Box::new(task)))
            }
        }
    }

    fn content_type(&self) -> &str {
        "application/json"
    }
}

#[cfg(test)]
mod tests {
    use crate::protocol::{message::Message, task::TaskStatus};

    use super::*;

    #[test]
    fn test_encode_create_task() {
        let codec = JsonCodec::new();
        let op = A2AOperation::CreateTask {
            input: "hello".to_string(),
        };

        let json: Value = serde_json::from_slice(&codec.encode_request(&op).unwrap()).unwrap();
        assert_eq!(json, json!({"input": "hello"}));
    }

    #[test]
    fn test_get_requests_have_no_body() {
        let codec = JsonCodec::new();
        assert!(codec
            .encode_request(&A2AOperation::DiscoverAgent)
            .unwrap()
            .is_empty());
        assert!(codec
            .encode_request(&A2AOperation::GetTask {
                task_id: "t".to_string()
            })
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_encode_send_message() {
        let codec = JsonCodec::new();
        let op = A2AOperation::SendMessage {
            message: Message::user("Hi"),
            stream: false,
        };

        let json: Value = serde_json::from_slice(&codec.encode_request(&op).unwrap()).unwrap();
        assert_eq!(json["message"]["parts"][0]["text"], "Hi");
    }

    #[test]
    fn test_decode_malformed_descriptor() {
        let codec = JsonCodec::new();
        let result = codec.decode_response(b"{\"name\": 3}", &A2AOperation::DiscoverAgent);
        assert!(matches!(result, Err(A2AError::Discovery(_))));

        let result = codec.decode_response(b"", &A2AOperation::DiscoverAgent);
        assert!(matches!(result, Err(A2AError::Discovery(_))));
    }

    #[test]
    fn test_decode_task_created() {
        let codec = JsonCodec::new();
        let op = A2AOperation::CreateTask {
            input: "x".to_string(),
        };

        match codec.decode_response(br#"{"task_id": "t-1"}"#, &op).unwrap() {
            A2AResponse::TaskCreated { task_id } => assert_eq!(task_id, "t-1"),
            other => panic!("Expected TaskCreated response, got {:?}", other),
        }

        let result = codec.decode_response(b"{}", &op);
        assert!(matches!(result, Err(A2AError::Submission(_))));
    }

    #[test]
    fn test_decode_task_state() {
        let codec = JsonCodec::new();
        let op = A2AOperation::GetTask {
            task_id: "t-1".to_string(),
        };
        let body = br#"{"status": "completed", "artifacts": [{"parts": [{"text": "done"}]}]}"#;

        let task = codec.decode_response(body, &op).unwrap().into_task().unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.artifacts[0].first_text(), Some("done"));
    }

    #[test]
    fn test_decode_reply_error_field() {
        let codec = JsonCodec::new();
        let op = A2AOperation::SendMessage {
            message: Message::user("Hi"),
            stream: false,
        };

        let result = codec.decode_response(br#"{"error": {"message": "overloaded"}}"#, &op);
        assert!(matches!(result, Err(A2AError::Protocol(msg)) if msg == "overloaded"));
    }
}
