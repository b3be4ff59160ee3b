//! Validation layer for A2A protocol requests and responses

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower_layer::Layer;
use tower_service::Service;

use crate::{
    protocol::{error::A2AError, operation::A2AOperation},
    service::{A2ARequest, A2AResponse},
};

/// Layer that validates A2A protocol requests and responses
#[derive(Clone, Debug, Default)]
pub struct A2AValidationLayer;

impl A2AValidationLayer {
    /// Create a new validation layer
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for A2AValidationLayer {
    type Service = A2AValidationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        A2AValidationService { inner }
    }
}

/// Validation service that wraps an inner service
#[derive(Clone, Debug)]
pub struct A2AValidationService<S> {
    inner: S,
}

impl<S> A2AValidationService<S> {
    /// The wrapped service
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Validate an A2A request
    fn validate_request(req: &A2ARequest) -> Result<(), A2AError> {
        match &req.operation {
            A2AOperation::SendMessage { message, .. } => {
                // Outgoing messages carry exactly the envelope text
                match message.first_text() {
                    Some(text) if !text.is_empty() => {}
                    _ => {
                        return Err(A2AError::Validation(
                            "Message must start with a non-empty text part".into(),
                        ))
                    }
                }
            }
            A2AOperation::CreateTask { input } => {
                if input.is_empty() {
                    return Err(A2AError::Validation("Task input cannot be empty".into()));
                }
            }
            A2AOperation::GetTask { task_id } => {
                if task_id.is_empty() {
                    return Err(A2AError::Validation("Task ID cannot be empty".into()));
                }
            }
            A2AOperation::DiscoverAgent => {}
        }

        // Validate agent URL
        if req.context.agent_url.is_empty() {
            return Err(A2AError::Validation("Agent URL cannot be empty".into()));
        }

        Ok(())
    }

    /// Validate an A2A response
    fn validate_response(resp: &A2AResponse) -> Result<(), A2AError> {
        match resp {
            A2AResponse::Descriptor(descriptor) => {
                if descriptor.name.is_empty() {
                    return Err(A2AError::Discovery("Agent name cannot be empty".into()));
                }
            }
            A2AResponse::TaskCreated { task_id } => {
                if task_id.is_empty() {
                    return Err(A2AError::Validation(
                        "Created task has an empty identifier".into(),
                    ));
                }
            }
            _ => {}
        }

        Ok(())
    }
}

impl<S> Service<A2ARequest> for A2AValidationService<S>
where
    S: Service<A2ARequest, Response = A2AResponse, Error = A2AError> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = A2AResponse;
    type Error = A2AError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: A2ARequest) -> Self::Future {
        // Validate request before passing to inner service
        if let Err(e) = Self::validate_request(&req) {
            return Box::pin(async move { Err(e) });
        }

        let mut inner = self.inner.clone();
        Box::pin(async move {
            let response = inner.call(req).await?;

            // Validate response
            Self::validate_response(&response)?;

            Ok(response)
        })
    }
}
