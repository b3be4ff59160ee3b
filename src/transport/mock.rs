use std::{
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::Value;
use url::Url;

use crate::{
    codec::{EventStream, StreamEvent},
    protocol::error::A2AError,
    transport::{Transport, TransportRequest, TransportResponse},
};

/// Mock transport for internal testing
///
/// This transport is used for unit tests to mock agent responses without
/// requiring a real network connection or a mock HTTP server.
#[derive(Clone)]
pub(crate) struct MockTransport {
    handler: Arc<dyn Fn(TransportRequest) -> TransportResponse + Send + Sync>,
    events: Arc<Vec<Value>>,
    delay: Option<Duration>,
    base_url: Url,
}

impl MockTransport {
    /// Create a new mock transport with a custom request handler
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(TransportRequest) -> TransportResponse + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            events: Arc::new(Vec::new()),
            delay: None,
            base_url: Url::parse("mock://agent").unwrap(),
        }
    }

    /// Events replayed, in order, for every streaming request
    pub fn with_events(mut self, events: Vec<Value>) -> Self {
        self.events = Arc::new(events);
        self
    }

    /// Wait before answering each request
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), A2AError>> {
        Poll::Ready(Ok(()))
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, A2AError> {
        self.pause().await;
        Ok((self.handler)(request))
    }

    async fn execute_streaming(&self, _request: TransportRequest) -> Result<EventStream, A2AError> {
        self.pause().await;
        let events: Vec<_> = self.events.iter().cloned().map(StreamEvent::from_value).collect();
        Ok(futures::stream::iter(events).boxed())
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn supports_streaming(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport").finish()
    }
}
