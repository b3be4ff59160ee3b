//! Canonical answer text from whatever reply shape an agent produced
//!
//! Agents answer `message/send` with a task carrying artifacts, with a bare
//! message, or with a wrapper holding either. The rules, in order:
//!
//! 1. a task with artifacts yields its first artifact's first part text;
//! 2. a message with parts yields its first part text;
//! 3. anything else yields [`NO_RESPONSE`].
//!
//! A shape that matches but whose first part carries no text falls through
//! to the next candidate.

use serde_json::Value;

use crate::protocol::{Artifact, Message, MessagePart, Task};

/// Text returned when a reply carries no extractable answer
pub const NO_RESPONSE: &str = "No response received";

/// A reply value seen through one of the shapes the normalizer understands
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// A task carrying at least one artifact
    Task(Task),

    /// A message carrying at least one part
    Message(Message),

    /// Nothing recognizable
    Unrecognized,
}

impl ResponseShape {
    /// Every shape found in `value`, in precedence order
    ///
    /// Task shapes are looked for on the value itself and under `task` and
    /// `result`; message shapes on the value itself and under `message`,
    /// `status.message` and `result`. A value matching nothing classifies as
    /// a single [`ResponseShape::Unrecognized`].
    pub fn classify(value: &Value) -> Vec<ResponseShape> {
        let task_candidates = [Some(value), value.get("task"), value.get("result")];
        let message_candidates = [
            Some(value),
            value.get("message"),
            value.pointer("/status/message"),
            value.get("result"),
            value.pointer("/result/status/message"),
        ];

        let tasks = task_candidates.into_iter().flatten().filter_map(task_shape);
        let messages = message_candidates
            .into_iter()
            .flatten()
            .filter_map(message_shape);

        let shapes: Vec<_> = tasks.chain(messages).collect();
        if shapes.is_empty() {
            vec![ResponseShape::Unrecognized]
        } else {
            shapes
        }
    }

    /// Answer text this shape yields, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            ResponseShape::Task(task) => task.artifacts.first().and_then(Artifact::first_text),
            ResponseShape::Message(message) => message.first_text(),
            ResponseShape::Unrecognized => None,
        }
    }
}

fn task_shape(value: &Value) -> Option<ResponseShape> {
    let artifacts = value.get("artifacts")?;
    let artifacts: Vec<Artifact> = serde_json::from_value(artifacts.clone()).ok()?;
    if artifacts.is_empty() {
        return None;
    }

    let id = value.get("id").and_then(Value::as_str).unwrap_or_default();
    let mut task = Task::new(id);
    artifacts.into_iter().for_each(|artifact| task.push_artifact(artifact));
    Some(ResponseShape::Task(task))
}

fn message_shape(value: &Value) -> Option<ResponseShape> {
    let parts = value.get("parts")?;
    let parts: Vec<MessagePart> = serde_json::from_value(parts.clone()).ok()?;
    if parts.is_empty() {
        return None;
    }

    let role = value
        .get("role")
        .cloned()
        .and_then(|role| serde_json::from_value(role).ok())
        .unwrap_or_default();
    let message_id = value
        .get("messageId")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(ResponseShape::Message(Message {
        role,
        parts,
        message_id,
    }))
}

/// Extract the canonical answer text from a decoded reply
pub fn normalize(value: &Value) -> String {
    ResponseShape::classify(value)
        .iter()
        .find_map(ResponseShape::text)
        .unwrap_or(NO_RESPONSE)
        .to_string()
}

/// Extract the canonical answer text from a finished task
pub fn normalize_task(task: &Task) -> String {
    task.artifacts
        .first()
        .and_then(Artifact::first_text)
        .unwrap_or(NO_RESPONSE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_task_artifact_text() {
        let reply = json!({
            "id": "t-1",
            "status": {"state": "completed"},
            "artifacts": [
                {"parts": [{"kind": "text", "text": "from artifact"}]},
                {"parts": [{"kind": "text", "text": "second artifact"}]}
            ]
        });
        assert_eq!(normalize(&reply), "from artifact");
    }

    #[test]
    fn test_message_parts_text() {
        let reply = json!({"role": "agent", "parts": [{"kind": "text", "text": "from message"}]});
        assert_eq!(normalize(&reply), "from message");
    }

    #[test]
    fn test_task_wins_over_message() {
        let reply = json!({
            "task": {"artifacts": [{"parts": [{"text": "task text"}]}]},
            "message": {"parts": [{"text": "message text"}]}
        });
        assert_eq!(normalize(&reply), "task text");

        let reply = json!({
            "status": {"state": "completed", "message": {"parts": [{"text": "status text"}]}},
            "artifacts": [{"parts": [{"text": "artifact text"}]}]
        });
        assert_eq!(normalize(&reply), "artifact text");
    }

    #[test]
    fn test_empty_artifacts_fall_back_to_message() {
        let reply = json!({
            "artifacts": [],
            "status": {"state": "completed", "message": {"parts": [{"text": "status text"}]}}
        });
        assert_eq!(normalize(&reply), "status text");
    }

    #[test]
    fn test_non_text_first_part_falls_through() {
        let reply = json!({
            "artifacts": [{"parts": [{"kind": "data", "data": {"rows": 3}}]}],
            "message": {"parts": [{"text": "summary"}]}
        });
        assert_eq!(normalize(&reply), "summary");
    }

    #[test]
    fn test_sentinel_for_unrecognized() {
        assert_eq!(normalize(&json!({})), NO_RESPONSE);
        assert_eq!(normalize(&json!("just a string")), NO_RESPONSE);
        assert_eq!(normalize(&json!({"parts": []})), NO_RESPONSE);
        assert_eq!(
            ResponseShape::classify(&json!({"foo": 1})),
            vec![ResponseShape::Unrecognized]
        );
    }

    #[test]
    fn test_normalize_task() {
        let task = Task::new("t").with_artifact(Artifact::text("done"));
        assert_eq!(normalize_task(&task), "done");
        assert_eq!(normalize_task(&Task::new("t")), NO_RESPONSE);
    }
}
