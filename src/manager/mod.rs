//! The routing agent
//!
//! A [`Manager`] receives a question envelope, asks its [`Classifier`] which
//! specialist should answer, forwards the envelope to that specialist and
//! returns the answer with the routing decision embedded in it.

pub mod classifier;

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

pub use classifier::{Classifier, KeywordClassifier};

use crate::{
    client::{A2AClient, SendOptions},
    codec::metadata,
    protocol::{
        agent::{AgentDescriptor, AgentSummary},
        error::A2AError,
        routing::QuestionEnvelope,
    },
    transport::{AgentHandler, Transport},
};

/// Routing agent forwarding questions to registered specialists
pub struct Manager<T: Transport> {
    descriptor: AgentDescriptor,
    classifier: Arc<dyn Classifier>,
    specialists: Mutex<HashMap<String, A2AClient<T>>>,
}

impl<T: Transport> Manager<T> {
    pub fn new(descriptor: AgentDescriptor, classifier: impl Classifier + 'static) -> Self {
        Self::with_shared_classifier(descriptor, Arc::new(classifier))
    }

    pub fn with_shared_classifier(descriptor: AgentDescriptor, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            descriptor,
            classifier,
            specialists: Mutex::new(HashMap::new()),
        }
    }

    /// Register the client used to reach a specialist
    ///
    /// Routing decisions name specialists by id; a later registration under
    /// the same id replaces the earlier one.
    pub fn with_specialist(mut self, specialist: &AgentSummary, client: A2AClient<T>) -> Self {
        self.specialists
            .get_mut()
            .insert(specialist.id.clone(), client);
        self
    }

    /// Answer one incoming message
    ///
    /// Text that is not a question envelope is taken as a bare question.
    ///
    /// # Errors
    ///
    /// `A2AError::Routing` when the chosen specialist is not registered;
    /// classifier and specialist failures are passed through.
    pub async fn answer(&self, raw_input: &str) -> Result<String, A2AError> {
        let envelope = QuestionEnvelope::parse(raw_input);
        tracing::info!(
            question = %envelope.current_question,
            turns = envelope.conversation_history.len(),
            "question received"
        );

        let decision = self
            .classifier
            .classify(&envelope.current_question, &envelope.conversation_history)
            .await?;
        tracing::info!(to = %decision.to.name, reason = %decision.reason, "routing question");

        let reply = {
            let mut specialists = self.specialists.lock().await;
            let client = specialists.get_mut(&decision.to.id).ok_or_else(|| {
                A2AError::Routing(format!("no specialist registered as '{}'", decision.to.id))
            })?;

            client
                .send_message(
                    &envelope.current_question,
                    &envelope.conversation_history,
                    SendOptions::default(),
                )
                .await?
        };

        metadata::encode(&reply.text, &decision)
    }
}

#[async_trait]
impl<T: Transport> AgentHandler for Manager<T> {
    fn descriptor(&self) -> AgentDescriptor {
        self.descriptor.clone()
    }

    async fn answer(&self, input: &str) -> Result<String, A2AError> {
        Manager::answer(self, input).await
    }
}
