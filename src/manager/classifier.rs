//! Choosing a specialist for a question

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::protocol::{
    agent::AgentSummary,
    error::A2AError,
    routing::{ConversationEntry, RoutingDecision},
};

/// Decides which specialist should answer a question
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Pick a specialist for `question`, given the conversation so far
    async fn classify(
        &self,
        question: &str,
        history: &[ConversationEntry],
    ) -> Result<RoutingDecision, A2AError>;
}

/// One destination of a [`KeywordClassifier`]
#[derive(Debug, Clone)]
struct Route {
    to: AgentSummary,
    keywords: BTreeSet<String>,
}

/// Deterministic classifier scoring whole-word keyword hits
///
/// The route with the most distinct hits wins; ties go to the route added
/// first. A question with no hits inherits the topic of the latest user turn
/// in the history that has one, and otherwise goes to the first route.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    from: AgentSummary,
    routes: Vec<Route>,
}

const TECH_KEYWORDS: &[&str] = &[
    "ai", "algorithm", "api", "apis", "backend", "bug", "cloud", "code", "coding", "database",
    "databases", "debug", "deploy", "deployment", "devops", "docker", "frontend", "git",
    "javascript", "kubernetes", "ml", "programming", "python", "rest", "rust", "server", "software",
    "sql", "technology",
];

const HR_KEYWORDS: &[&str] = &[
    "burnout", "career", "colleague", "colleagues", "communicate", "communication", "conflict",
    "coworker", "feedback", "hiring", "interpersonal", "leader", "leadership", "manager", "mentor",
    "motivation", "negotiate", "onboarding", "promotion", "raise", "salary", "team", "teams",
];

const DESIGN_KEYWORDS: &[&str] = &[
    "accessibility", "accessible", "button", "color", "component", "components", "design",
    "figma", "interaction", "layout", "prototype", "typography", "ui", "usability", "ux",
    "wireframe",
];

impl KeywordClassifier {
    /// A classifier deciding on behalf of `from`, with no routes yet
    pub fn new(from: AgentSummary) -> Self {
        Self {
            from,
            routes: Vec::new(),
        }
    }

    /// Add a destination matched by `keywords`
    pub fn with_route(mut self, to: AgentSummary, keywords: &[&str]) -> Self {
        self.routes.push(Route {
            to,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        });
        self
    }

    /// The tech / HR / design registry, tech first so it is the fallback
    pub fn standard(
        from: AgentSummary,
        tech: AgentSummary,
        hr: AgentSummary,
        design: AgentSummary,
    ) -> Self {
        Self::new(from)
            .with_route(tech, TECH_KEYWORDS)
            .with_route(hr, HR_KEYWORDS)
            .with_route(design, DESIGN_KEYWORDS)
    }

    /// Best route for `text` and the keywords it matched, if any matched
    fn best_match(&self, text: &str) -> Option<(&Route, Vec<String>)> {
        let words: BTreeSet<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .collect();

        let mut best: Option<(&Route, Vec<String>)> = None;
        for route in &self.routes {
            let hits: Vec<String> = route.keywords.intersection(&words).cloned().collect();
            let beats = match &best {
                Some((_, best_hits)) => hits.len() > best_hits.len(),
                None => !hits.is_empty(),
            };
            if beats {
                best = Some((route, hits));
            }
        }
        best
    }
}

#[async_trait]
impl Classifier for KeywordClassifier {
    async fn classify(
        &self,
        question: &str,
        history: &[ConversationEntry],
    ) -> Result<RoutingDecision, A2AError> {
        if let Some((route, hits)) = self.best_match(question) {
            let reason = format!("question mentions {}", hits.join(", "));
            return Ok(RoutingDecision::new(self.from.clone(), route.to.clone(), reason));
        }

        let earlier = history
            .iter()
            .rev()
            .filter(|entry| entry.role == "user")
            .find_map(|entry| self.best_match(&entry.content));
        if let Some((route, hits)) = earlier {
            let reason = format!("follow-up to an earlier question about {}", hits.join(", "));
            return Ok(RoutingDecision::new(self.from.clone(), route.to.clone(), reason));
        }

        let fallback = self
            .routes
            .first()
            .ok_or_else(|| A2AError::Routing("no specialists to route to".to_string()))?;
        Ok(RoutingDecision::new(
            self.from.clone(),
            fallback.to.clone(),
            format!("no topic recognised, defaulting to {}", fallback.to.name),
        ))
    }
}
