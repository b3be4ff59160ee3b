//! A2A message types

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

/// A message in the A2A protocol
///
/// Messages are the primary unit of communication between agents. Outgoing
/// messages always carry a single text part and a fresh identifier; once
/// built they are not mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Role of the message sender
    #[serde(default)]
    pub role: Role,

    /// Message content parts
    #[serde(default)]
    pub parts: Vec<MessagePart>,

    /// Message identifier
    #[serde(rename = "messageId", default, skip_serializing_if = "String::is_empty")]
    pub message_id: String,
}

impl Message {
    /// Create a new message with a single text part and a fresh identifier
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![MessagePart::text(text)],
            message_id: Uuid::now_v7().simple().to_string(),
        }
    }

    /// Create a user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an agent message with text content
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Role::Agent, text)
    }

    /// Text of the first part, if that part is textual
    pub fn first_text(&self) -> Option<&str> {
        self.parts.first().and_then(MessagePart::as_text)
    }
}

/// Role of a message sender
///
/// Peers that omit the role are treated as replying agents.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message from a user
    User,

    /// Message from an AI agent
    #[default]
    Agent,
}

/// A part of a message or artifact
///
/// This system only ever emits text parts, written as `{"kind": "text", "text": ...}`.
/// Parts received from peers are accepted with or without the `kind` tag; anything
/// that is not textual is kept as opaque data and never yields text.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessagePart {
    /// Text content
    Text {
        /// The text content
        text: String,
    },

    /// Any non-text part (file, structured data, unknown kinds)
    Other(Value),
}

impl MessagePart {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// The text content, if this is a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessagePart::Text { text } => Some(text),
            MessagePart::Other(_) => None,
        }
    }
}

impl Serialize for MessagePart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MessagePart::Text { text } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("kind", "text")?;
                map.serialize_entry("text", text)?;
                map.end()
            }
            MessagePart::Other(value) => value.serialize(serializer),
        }
    }
}
