//! Core A2A protocol types and definitions

use serde::{Deserialize, Serialize};

pub mod agent;
pub mod error;
pub mod message;
pub mod operation;
pub mod routing;
pub mod task;

pub use agent::{AgentDescriptor, AgentSummary};
pub use error::A2AError;
pub use message::{Message, MessagePart, Role};
pub use operation::A2AOperation;
pub use routing::{ConversationEntry, QuestionEnvelope, RoutingDecision};
pub use task::{Task, TaskCreated, TaskStatus};

/// Artifacts represent task outputs
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    /// Identifier of the Artifact
    #[serde(rename = "artifactId", default, skip_serializing_if = "String::is_empty")]
    pub artifact_id: String,

    /// Contents of the Artifact
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

impl Artifact {
    /// Create an artifact without an identifier
    pub fn new(parts: Vec<MessagePart>) -> Self {
        Self {
            artifact_id: String::new(),
            parts,
        }
    }

    /// Create an artifact holding a single text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![MessagePart::text(text)])
    }

    /// Text of the first part, if that part is textual
    pub fn first_text(&self) -> Option<&str> {
        self.parts.first().and_then(MessagePart::as_text)
    }
}
