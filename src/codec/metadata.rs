//! Routing metadata carried inside reply text
//!
//! A manager appends its routing decision to the specialist's answer as an
//! HTML comment, so the decision survives any transport that only moves text:
//!
//! ```text
//! <answer>
//!
//! <!-- ROUTING_METADATA:{"from":...,"to":...,"reason":...}:END_ROUTING_METADATA -->
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::protocol::{error::A2AError, routing::RoutingDecision};

const OPEN: &str = "<!-- ROUTING_METADATA:";
const CLOSE: &str = ":END_ROUTING_METADATA -->";

fn wrapper_regex() -> &'static Regex {
    static WRAPPER: OnceLock<Regex> = OnceLock::new();
    WRAPPER.get_or_init(|| {
        Regex::new(r"(?s)<!--\s*ROUTING_METADATA:(.*?):END_ROUTING_METADATA\s*-->")
            .expect("routing metadata pattern is valid")
    })
}

/// Reply text with any routing wrapper removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The text the user should see
    pub clean_text: String,

    /// The routing decision, when a well-formed wrapper was present
    pub metadata: Option<RoutingDecision>,
}

/// Append a routing decision to reply text
pub fn encode(text: &str, decision: &RoutingDecision) -> Result<String, A2AError> {
    let json = serde_json::to_string(decision)?;
    Ok(format!("{}\n\n{}{}{}", text, OPEN, json, CLOSE))
}

/// Split reply text into display text and routing decision
///
/// The first wrapper whose payload parses is removed and the remainder
/// trimmed. A wrapper that never parses is still stripped, with no decision
/// reported. Text without a wrapper is returned unchanged.
pub fn decode(text: &str) -> Decoded {
    let regex = wrapper_regex();

    let parsed = regex.captures_iter(text).find_map(|captures| {
        let whole = captures.get(0)?;
        let decision = serde_json::from_str::<RoutingDecision>(captures.get(1)?.as_str()).ok()?;
        Some((whole.range(), decision))
    });

    if let Some((range, decision)) = parsed {
        return Decoded {
            clean_text: strip(text, range),
            metadata: Some(decision),
        };
    }

    match regex.find(text) {
        Some(malformed) => {
            tracing::debug!("discarding unparseable routing metadata");
            Decoded {
                clean_text: strip(text, malformed.range()),
                metadata: None,
            }
        }
        None => Decoded {
            clean_text: text.to_string(),
            metadata: None,
        },
    }
}

fn strip(text: &str, range: std::ops::Range<usize>) -> String {
    let mut clean = String::with_capacity(text.len());
    clean.push_str(&text[..range.start]);
    clean.push_str(&text[range.end..]);
    clean.trim().to_string()
}
