//! A2A protocol operations

use super::message::Message;

/// A2A protocol operations
///
/// The abstract operations a client performs against one agent endpoint.
/// Each operation is binding-independent; codecs decide how it is written.
#[derive(Debug, Clone)]
pub enum A2AOperation {
    /// Fetch the agent descriptor
    DiscoverAgent,

    /// Send a message to the agent
    SendMessage {
        /// The message to send
        message: Message,

        /// Whether the reply is delivered as an event stream
        stream: bool,
    },

    /// Submit a job on the task endpoint
    CreateTask {
        /// Text handed to the worker
        input: String,
    },

    /// Fetch the current state of a task
    GetTask {
        /// The task ID to retrieve
        task_id: String,
    },
}

impl A2AOperation {
    /// Get the endpoint path for this operation, relative to the agent base URL
    pub fn endpoint(&self) -> String {
        match self {
            A2AOperation::DiscoverAgent => "/.well-known/agent.json".to_string(),
            A2AOperation::SendMessage { .. } => String::new(),
            A2AOperation::CreateTask { .. } => "/tasks".to_string(),
            A2AOperation::GetTask { task_id } => format!("/tasks/{}", task_id),
        }
    }

    /// Get the HTTP method for this operation
    pub fn method(&self) -> &'static str {
        match self {
            A2AOperation::DiscoverAgent => "GET",
            A2AOperation::SendMessage { .. } => "POST",
            A2AOperation::CreateTask { .. } => "POST",
            A2AOperation::GetTask { .. } => "GET",
        }
    }

    /// Check if this operation expects a streaming response
    pub fn is_streaming(&self) -> bool {
        matches!(self, A2AOperation::SendMessage { stream: true, .. })
    }
}
