//! A2A service response types

use serde_json::Value;

use crate::{
    codec::EventStream,
    protocol::{agent::AgentDescriptor, task::Task},
};

/// Response from an A2A service operation
pub enum A2AResponse {
    /// Agent descriptor (from DiscoverAgent)
    Descriptor(Box<AgentDescriptor>),

    /// Untyped reply to a message, left to the normalizer (from SendMessage)
    Reply(Value),

    /// Identifier of a freshly created task (from CreateTask)
    TaskCreated {
        /// The created task's identifier
        task_id: String,
    },

    /// Task snapshot (from GetTask)
    Task(Box<Task>),

    /// Event stream (from streaming SendMessage)
    Events(EventStream),

    /// Empty response (for operations with no return value)
    Empty,
}

impl A2AResponse {
    /// Extract a task from the response, if present
    pub fn into_task(self) -> Option<Task> {
        match self {
            A2AResponse::Task(task) => Some(*task),
            _ => None,
        }
    }

    /// Extract an agent descriptor from the response, if present
    pub fn into_descriptor(self) -> Option<AgentDescriptor> {
        match self {
            A2AResponse::Descriptor(descriptor) => Some(*descriptor),
            _ => None,
        }
    }

    /// Extract a message reply from the response, if present
    pub fn into_reply(self) -> Option<Value> {
        match self {
            A2AResponse::Reply(reply) => Some(reply),
            _ => None,
        }
    }

    /// Extract a created task's identifier from the response, if present
    pub fn into_task_id(self) -> Option<String> {
        match self {
            A2AResponse::TaskCreated { task_id } => Some(task_id),
            _ => None,
        }
    }

    /// Extract an event stream from the response, if present
    pub fn into_events(self) -> Option<EventStream> {
        match self {
            A2AResponse::Events(events) => Some(events),
            _ => None,
        }
    }

    /// Check if the response is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, A2AResponse::Empty)
    }
}

impl std::fmt::Debug for A2AResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            A2AResponse::Descriptor(descriptor) => f.debug_tuple("Descriptor").field(descriptor).finish(),
            A2AResponse::Reply(reply) => f.debug_tuple("Reply").field(reply).finish(),
            A2AResponse::TaskCreated { task_id } => f
                .debug_struct("TaskCreated")
                .field("task_id", task_id)
                .finish(),
            A2AResponse::Task(task) => f.debug_tuple("Task").field(task).finish(),
            A2AResponse::Events(_) => f.write_str("Events(..)"),
            A2AResponse::Empty => f.write_str("Empty"),
        }
    }
}
