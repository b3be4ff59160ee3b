//! Routing decisions and the question envelope exchanged between agents

use serde::{Deserialize, Serialize};

use super::{agent::AgentSummary, error::A2AError, message::Message};

/// Record of which specialist a question was sent to and why
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoutingDecision {
    /// The agent that made the decision
    pub from: AgentSummary,

    /// The specialist the question was forwarded to
    pub to: AgentSummary,

    /// Why this specialist was chosen
    pub reason: String,
}

impl RoutingDecision {
    pub fn new(from: AgentSummary, to: AgentSummary, reason: impl Into<String>) -> Self {
        Self {
            from,
            to,
            reason: reason.into(),
        }
    }
}

/// One turn of a conversation, owned by the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationEntry {
    pub role: String,
    pub content: String,
}

impl ConversationEntry {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// A turn written by the user
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// A turn written by the answering agent
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// The JSON text carried in the single part of every outgoing message
///
/// Embedding prior turns here lets the receiving agent see the conversation
/// without a separate session protocol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionEnvelope {
    pub current_question: String,

    #[serde(default)]
    pub conversation_history: Vec<ConversationEntry>,
}

impl QuestionEnvelope {
    pub fn new(question: impl Into<String>, history: Vec<ConversationEntry>) -> Self {
        Self {
            current_question: question.into(),
            conversation_history: history,
        }
    }

    /// Read an envelope from message text
    ///
    /// Text that is not an envelope is taken as a bare question with no history.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| Self::new(raw, Vec::new()))
    }

    /// Serialize the envelope to its JSON text
    pub fn to_text(&self) -> Result<String, A2AError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Build the user message carrying this envelope
    pub fn to_message(&self) -> Result<Message, A2AError> {
        Ok(Message::user(self.to_text()?))
    }
}
