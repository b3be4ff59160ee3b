//! High-level A2A agent client

use tokio::time::Instant;
use tower::ServiceExt;
use tower_service::Service;
use tracing::Instrument;

use crate::{
    client::{
        config::{ClientConfig, SendOptions, TransportMode},
        poller::TaskPoller,
        stream::StreamCollector,
    },
    codec::metadata,
    normalize::{normalize, NO_RESPONSE},
    protocol::{
        A2AError, A2AOperation, AgentDescriptor, ConversationEntry, Message, QuestionEnvelope,
        RoutingDecision, Task,
    },
    service::{A2ARequest, A2AResponse, RequestContext},
};

/// Answer returned by [`AgentClient::send_message`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReply {
    /// Answer text with any routing metadata removed
    pub text: String,

    /// Which specialist answered, when the agent reported it
    pub routing: Option<RoutingDecision>,
}

/// High-level A2A client for interacting with agents
///
/// This client wraps a Tower service and provides convenient methods for common A2A operations.
/// The service is generic over any implementation that satisfies the Service trait bounds.
///
/// # Example
///
/// ```rust,no_run
/// use a2a_router::prelude::*;
///
/// # async fn example() -> Result<(), A2AError> {
/// let url = "http://localhost:8002".parse().unwrap();
/// let mut client = A2AClientBuilder::new_http(url).build()?;
///
/// let reply = client.send_text("How do I give feedback to my team?").await?;
/// if let Some(routing) = &reply.routing {
///     println!("answered by {}", routing.to.name);
/// }
/// println!("{}", reply.text);
/// # Ok(())
/// # }
/// ```
pub struct AgentClient<S> {
    service: S,
    config: ClientConfig,
    descriptor: Option<AgentDescriptor>,
}

impl<S> AgentClient<S>
where
    S: Service<A2ARequest, Response = A2AResponse, Error = A2AError>,
{
    /// Create a new agent client
    ///
    /// # Arguments
    ///
    /// * `service` - The Tower service that handles requests
    /// * `config` - Client configuration
    pub fn new(service: S, config: ClientConfig) -> Self {
        Self {
            service,
            config,
            descriptor: None,
        }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The agent descriptor, once discovered
    pub fn descriptor(&self) -> Option<&AgentDescriptor> {
        self.descriptor.as_ref()
    }

    /// Build a request context from the client configuration
    fn build_context(&self) -> RequestContext {
        RequestContext::new(self.config.agent_url.clone())
    }

    async fn call(&mut self, operation: A2AOperation) -> Result<A2AResponse, A2AError> {
        let request = A2ARequest::new(operation, self.build_context());
        self.service.ready().await?.call(request).await
    }

    /// Discover the agent by fetching its descriptor
    ///
    /// This retrieves the agent's metadata from `/.well-known/agent.json`. The
    /// first successful result is kept for the lifetime of the client; later
    /// calls return it without network I/O.
    pub async fn discover(&mut self) -> Result<AgentDescriptor, A2AError> {
        if let Some(descriptor) = &self.descriptor {
            return Ok(descriptor.clone());
        }

        let response = self.call(A2AOperation::DiscoverAgent).await?;
        let descriptor = response.into_descriptor().ok_or_else(|| {
            A2AError::Discovery("Expected agent descriptor response from discover".into())
        })?;

        tracing::debug!(agent = %descriptor.name, url = %descriptor.url, "discovered agent");
        self.descriptor = Some(descriptor.clone());
        Ok(descriptor)
    }

    /// Ask the agent a question
    ///
    /// The question and prior turns travel as one JSON envelope in a single
    /// text part. The whole exchange (discovery included) runs under the
    /// timeout; when the timer wins the exchange is dropped and the call
    /// fails with [`A2AError::Timeout`], so a late reply is never returned.
    ///
    /// # Errors
    ///
    /// Discovery, protocol, submission, task and timeout failures are
    /// returned as-is; nothing is retried.
    pub async fn send_message(
        &mut self,
        text: &str,
        history: &[ConversationEntry],
        options: SendOptions,
    ) -> Result<AgentReply, A2AError> {
        let message = QuestionEnvelope::new(text, history.to_vec()).to_message()?;
        let budget = options.budget(self.config.timeout);

        let span = tracing::info_span!(
            "send_message",
            agent = %self.config.agent_url,
            mode = ?self.config.transport,
            message_id = %message.message_id,
        );

        async move {
            let started = Instant::now();
            let exchange = self.exchange(message, budget);

            let raw = match budget {
                None => exchange.await?,
                Some(budget) => match tokio::time::timeout(budget, exchange).await {
                    Ok(result) => result?,
                    Err(_) => {
                        tracing::warn!(budget_ms = budget.as_millis() as u64, "exchange timed out");
                        return Err(A2AError::Timeout);
                    }
                },
            };

            let decoded = metadata::decode(&raw);
            tracing::info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                routed_to = decoded.metadata.as_ref().map(|routing| routing.to.name.as_str()),
                "reply received"
            );

            Ok(AgentReply {
                text: decoded.clean_text,
                routing: decoded.metadata,
            })
        }
        .instrument(span)
        .await
    }

    /// Ask a question with no prior conversation and default options
    pub async fn send_text(&mut self, text: &str) -> Result<AgentReply, A2AError> {
        self.send_message(text, &[], SendOptions::default()).await
    }

    /// Discover, then obtain the raw answer text through the configured transport variant
    async fn exchange(
        &mut self,
        message: Message,
        budget: Option<std::time::Duration>,
    ) -> Result<String, A2AError> {
        self.discover().await?;

        match self.config.transport {
            TransportMode::Direct => {
                let response = self
                    .call(A2AOperation::SendMessage {
                        message,
                        stream: false,
                    })
                    .await?;

                match response {
                    A2AResponse::Reply(reply) => Ok(normalize(&reply)),
                    A2AResponse::Empty => Ok(NO_RESPONSE.to_string()),
                    other => Err(A2AError::Protocol(format!(
                        "Unexpected response to message/send: {:?}",
                        other
                    ))),
                }
            }
            TransportMode::Poll => {
                let input = message.first_text().unwrap_or_default().to_string();
                let mut poller = TaskPoller::new(self.config.poll_interval);
                if let Some(budget) = budget {
                    poller = poller.with_budget(budget);
                }
                poller.run(self, input).await
            }
            TransportMode::Stream => {
                let response = self
                    .call(A2AOperation::SendMessage {
                        message,
                        stream: true,
                    })
                    .await?;

                let events = response.into_events().ok_or_else(|| {
                    A2AError::Protocol("Expected event stream from message/stream".into())
                })?;
                StreamCollector::collect(events).await
            }
        }
    }

    /// Submit a job on the task endpoint and return its identifier
    ///
    /// # Errors
    ///
    /// Returns `A2AError::Submission` when the agent refuses or garbles the creation
    pub async fn create_task(&mut self, input: impl Into<String>) -> Result<String, A2AError> {
        let operation = A2AOperation::CreateTask {
            input: input.into(),
        };

        self.call(operation).await?.into_task_id().ok_or_else(|| {
            A2AError::Submission("Expected task identifier from task creation".into())
        })
    }

    /// Get a task by ID
    ///
    /// # Arguments
    ///
    /// * `task_id` - The unique identifier of the task to retrieve
    ///
    /// # Returns
    ///
    /// The task with the specified ID
    ///
    /// # Errors
    ///
    /// Returns `A2AError::TaskNotFound` if the task doesn't exist
    pub async fn get_task(&mut self, task_id: impl Into<String>) -> Result<Task, A2AError> {
        let operation = A2AOperation::GetTask {
            task_id: task_id.into(),
        };

        self.call(operation)
            .await?
            .into_task()
            .ok_or_else(|| A2AError::Protocol("Expected task response from get_task".into()))
    }
}

impl<S> std::fmt::Debug for AgentClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentClient")
            .field("config", &self.config)
            .field("descriptor", &self.descriptor.as_ref().map(|d| d.name.as_str()))
            .finish()
    }
}
