//! Agent discovery types

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

/// Agent descriptor for agent discovery
///
/// Published at `/.well-known/agent.json`. Only `name` and `url` are required
/// on the wire. A client fetches it once per endpoint and keeps it unchanged
/// for its own lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentDescriptor {
    /// Stable identifier used by routing decisions
    #[serde(default)]
    pub id: String,

    /// Name of the agent
    pub name: String,

    /// Base URL of the agent
    pub url: Url,

    /// Display color
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,

    /// Human-readable description of the agent
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Capability names
    ///
    /// Accepted as a list of names or as an object of boolean flags, in which
    /// case the flags set to `true` become the capability names.
    #[serde(default, deserialize_with = "deserialize_capabilities")]
    pub capabilities: BTreeSet<String>,
}

impl AgentDescriptor {
    /// Create a new agent descriptor
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: Url) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url,
            color: String::new(),
            description: String::new(),
            capabilities: BTreeSet::new(),
        }
    }

    /// Set the display color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a capability
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    /// Check whether the agent advertises a capability
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    /// The subset of this descriptor carried inside routing decisions
    pub fn summary(&self) -> AgentSummary {
        AgentSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            url: Some(self.url.to_string()),
            color: (!self.color.is_empty()).then(|| self.color.clone()),
        }
    }
}

/// Descriptor subset identifying one side of a routing decision
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentSummary {
    /// Agent identifier
    pub id: String,

    /// Agent display name
    pub name: String,

    /// Agent base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Agent display color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl AgentSummary {
    /// Create a summary with only an id and a name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: None,
            color: None,
        }
    }
}

fn deserialize_capabilities<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CapabilitiesRepr {
        Names(BTreeSet<String>),
        Flags(BTreeMap<String, serde_json::Value>),
    }

    Ok(match CapabilitiesRepr::deserialize(deserializer)? {
        CapabilitiesRepr::Names(names) => names,
        CapabilitiesRepr::Flags(flags) => flags
            .into_iter()
            .filter(|(_, enabled)| enabled.as_bool() == Some(true))
            .map(|(name, _)| name)
            .collect(),
    })
}
