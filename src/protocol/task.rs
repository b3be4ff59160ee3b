//! A2A task types and lifecycle management

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Artifact;

/// A task in the A2A protocol
///
/// Tasks represent asynchronous work performed by an agent. A task is created
/// by a transport call and then only changes through polling or streaming
/// updates. Its artifact list is append-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    #[serde(default)]
    pub id: String,

    /// Current status of the task
    #[serde(default, deserialize_with = "deserialize_status")]
    pub status: TaskStatus,

    /// Output attached by the worker, in attachment order
    #[serde(default)]
    pub artifacts: Vec<Artifact>,

    /// Failure information reported by the server (a string or `{"message": ...}`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl Task {
    /// Create a new task in the `submitted` state
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Check if the task is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Update the task status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach an artifact
    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.push_artifact(artifact);
        self
    }

    /// Set the failure reason
    pub fn with_error(mut self, reason: impl Into<String>) -> Self {
        self.error = Some(Value::String(reason.into()));
        self
    }

    /// Append an artifact; artifacts are never removed or reordered
    pub fn push_artifact(&mut self, artifact: Artifact) {
        self.artifacts.push(artifact);
    }

    /// Fold a newer snapshot of the same task into this one
    ///
    /// Status and error follow the snapshot. The artifact list is replaced only
    /// when the snapshot carries at least as many artifacts as already observed.
    pub fn absorb(&mut self, snapshot: Task) {
        self.status = snapshot.status;
        if snapshot.error.is_some() {
            self.error = snapshot.error;
        }
        if snapshot.artifacts.len() >= self.artifacts.len() {
            self.artifacts = snapshot.artifacts;
        }
    }

    /// Human-readable failure reason reported by the server
    pub fn failure_reason(&self) -> String {
        match &self.error {
            Some(Value::String(reason)) => reason.clone(),
            Some(other) => other
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
            None => "unknown error".to_string(),
        }
    }
}

/// Task status in the task lifecycle
///
/// `submitted → {working, completed, failed}`, `working → {working, completed, failed}`.
/// Completed and failed are terminal. Peers speaking the wider A2A state set are
/// folded into these four: cancellation and rejection count as failure, states
/// awaiting client input count as still working.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Task has been received and is queued for processing
    #[default]
    Submitted,

    /// Task is currently being processed
    #[serde(alias = "input-required", alias = "auth-required")]
    Working,

    /// Task completed successfully
    Completed,

    /// Task failed with an error
    #[serde(alias = "canceled", alias = "cancelled", alias = "rejected")]
    Failed,
}

impl TaskStatus {
    /// Check if this is a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

/// Accepts both `"status": "working"` and the A2A form `"status": {"state": "working"}`
fn deserialize_status<'de, D>(deserializer: D) -> Result<TaskStatus, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StatusRepr {
        Plain(TaskStatus),
        Object { state: TaskStatus },
    }

    Ok(match StatusRepr::deserialize(deserializer)? {
        StatusRepr::Plain(status) | StatusRepr::Object { state: status } => status,
    })
}

/// Response of the task creation endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskCreated {
    /// Identifier of the created task
    #[serde(alias = "taskId")]
    pub task_id: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::protocol::message::MessagePart;

    use super::*;

    fn text_artifact(text: &str) -> Artifact {
        Artifact::new(vec![MessagePart::text(text)])
    }

    #[test]
    fn test_task_creation() {
        let task = Task::new("task-123");

        assert_eq!(task.id, "task-123");
        assert_eq!(task.status, TaskStatus::Submitted);
        assert!(!task.is_terminal());
        assert!(task.artifacts.is_empty());
    }

    #[test]
    fn test_task_lifecycle() {
        let task = Task::new("task-123").with_status(TaskStatus::Working);
        assert!(!task.is_terminal());

        let task = task.with_status(TaskStatus::Completed);
        assert!(task.is_terminal());

        assert!(TaskStatus::Failed.is_terminal());
        assert!(!TaskStatus::Submitted.is_terminal());
    }

    #[test]
    fn test_status_object_form() {
        let task: Task = serde_json::from_value(json!({
            "id": "t",
            "status": {"state": "completed"},
        }))
        .unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[test]
    fn test_wider_state_set_is_folded() {
        let task: Task = serde_json::from_value(json!({"status": "canceled"})).unwrap();
        assert_eq!(task.status, TaskStatus::Failed);

        let task: Task = serde_json::from_value(json!({"status": "input-required"})).unwrap();
        assert_eq!(task.status, TaskStatus::Working);
    }

    #[test]
    fn test_absorb_never_shrinks_artifacts() {
        let mut task = Task::new("t")
            .with_artifact(text_artifact("a"))
            .with_artifact(text_artifact("b"));

        let stale = Task::new("t").with_status(TaskStatus::Working);
        task.absorb(stale);
        assert_eq!(task.artifacts.len(), 2);
        assert_eq!(task.status, TaskStatus::Working);

        let newer = Task::new("t")
            .with_status(TaskStatus::Completed)
            .with_artifact(text_artifact("a"))
            .with_artifact(text_artifact("b"))
            .with_artifact(text_artifact("c"));
        task.absorb(newer);
        assert_eq!(task.artifacts.len(), 3);
        assert!(task.is_terminal());
    }

    #[test]
    fn test_failure_reason() {
        assert_eq!(Task::new("t").failure_reason(), "unknown error");
        assert_eq!(Task::new("t").with_error("quota").failure_reason(), "quota");

        let task: Task =
            serde_json::from_value(json!({"status": "failed", "error": {"message": "boom"}}))
                .unwrap();
        assert_eq!(task.failure_reason(), "boom");
    }

    #[test]
    fn test_task_created_aliases() {
        let created: TaskCreated = serde_json::from_value(json!({"task_id": "a"})).unwrap();
        assert_eq!(created.task_id, "a");

        let created: TaskCreated = serde_json::from_value(json!({"taskId": "b"})).unwrap();
        assert_eq!(created.task_id, "b");
    }

    #[test]
    fn test_task_serialization() {
        let task = Task::new("task-123").with_artifact(text_artifact("out"));

        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"id\":\"task-123\""));
        assert!(json.contains("\"status\":\"submitted\""));

        let deserialized: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(task, deserialized);
    }
}
