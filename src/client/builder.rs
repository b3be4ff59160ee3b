//! Client builder for constructing A2A clients with composable layers

use std::{sync::Arc, time::Duration};

use tower::ServiceBuilder;
use url::Url;

use crate::{
    client::{
        config::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT},
        AgentClient, ClientConfig, TransportMode,
    },
    codec::{Codec, JsonRpcCodec},
    layer::{A2AValidationLayer, A2AValidationService},
    protocol::error::A2AError,
    service::A2AProtocolService,
    transport::{AgentHandler, HttpTransport, LocalTransport, Transport},
};

/// Client assembled by [`A2AClientBuilder`]: validation around the protocol service
pub type A2AClient<T> = AgentClient<A2AValidationService<A2AProtocolService<T>>>;

/// Builder for constructing A2A clients
///
/// This builder provides a fluent API for configuring and building an A2A client
/// with customizable transport, codec, timeout and transport variant.
///
/// # Example
///
/// ```rust,no_run
/// use a2a_router::prelude::*;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let url = "http://localhost:8002".parse().unwrap();
/// let mut client = A2AClientBuilder::new_http(url)
///     .with_timeout(Duration::from_secs(60))
///     .with_transport_mode(TransportMode::Stream)
///     .build()?;
///
/// let descriptor = client.discover().await?;
/// println!("Connected to: {}", descriptor.name);
/// # Ok(())
/// # }
/// ```
///
/// # Compiler Error
/// This will fail to compile if it is not clear to the compiler which type implementing
/// `Transport` is being used as underlying transport. This is expected behaviour.
///
/// ```compile_fail
/// let client = A2AClientBuilder::new(agent_url()).build();
/// ```
pub struct A2AClientBuilder<T: Transport> {
    agent_url: Url,
    transport: Option<T>,
    codec: Option<Arc<dyn Codec>>,
    timeout: Option<Duration>,
    transport_mode: TransportMode,
    poll_interval: Duration,
}

impl<T: Transport> A2AClientBuilder<T> {
    /// Start a builder for the agent at `agent_url`; a transport must be supplied
    pub fn new(agent_url: Url) -> Self {
        Self {
            agent_url,
            transport: None,
            codec: None,
            timeout: Some(DEFAULT_TIMEOUT),
            transport_mode: TransportMode::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Use a custom transport
    ///
    /// # Arguments
    ///
    /// * `transport` - The transport implementation to use
    pub fn with_transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom codec
    ///
    /// # Arguments
    ///
    /// * `codec` - The codec implementation to use (default: JSON-RPC)
    pub fn with_codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Set the default budget for one exchange
    ///
    /// # Arguments
    ///
    /// * `timeout` - Budget per `send_message` (default: 120 s)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Let every exchange run without a timer
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Choose how replies are obtained
    pub fn with_transport_mode(mut self, transport_mode: TransportMode) -> Self {
        self.transport_mode = transport_mode;
        self
    }

    /// Set the interval between task status fetches (default: 500 ms)
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Build the A2A client
    ///
    /// This assembles the Tower layers and returns a configured client.
    ///
    /// # Errors
    ///
    /// Returns an error if no transport has been configured
    pub fn build(self) -> Result<A2AClient<T>, A2AError> {
        let transport = self.transport.ok_or_else(|| {
            A2AError::Other("Transport not configured. Call with_transport()".into())
        })?;

        let codec = self
            .codec
            .unwrap_or_else(|| Arc::new(JsonRpcCodec::new()));

        let service = ServiceBuilder::new()
            .layer(A2AValidationLayer::new())
            .service(A2AProtocolService::new(transport, codec));

        let config = ClientConfig {
            timeout: self.timeout,
            ..ClientConfig::new(self.agent_url.as_str())
        }
        .with_transport_mode(self.transport_mode)
        .with_poll_interval(self.poll_interval);

        Ok(AgentClient::new(service, config))
    }
}

impl A2AClientBuilder<HttpTransport> {
    /// Create a new client builder with HTTP transport (JSON-RPC binding)
    ///
    /// # Arguments
    ///
    /// * `agent_url` - The base URL of the agent (e.g., "<http://localhost:8002>")
    pub fn new_http(agent_url: Url) -> Self {
        let transport = HttpTransport::new(agent_url.clone());
        Self::new(agent_url).with_transport(transport)
    }
}

impl<H: AgentHandler> A2AClientBuilder<LocalTransport<H>> {
    /// Create a new client builder talking to an in-process agent
    pub fn new_local(handler: H) -> Self {
        Self::with_local(LocalTransport::new(handler))
    }

    /// Create a new client builder on an existing local host
    pub fn with_local(transport: LocalTransport<H>) -> Self {
        let agent_url = transport.base_url().clone();
        Self::new(agent_url).with_transport(transport)
    }
}

#[cfg(test)]
mod tests {
    use crate::{codec::JsonCodec, transport::mock::MockTransport, transport::TransportResponse};

    use super::*;

    fn agent_url() -> Url {
        "http://localhost:8002".parse().unwrap()
    }

    #[test]
    fn test_builder_with_http() {
        let client = A2AClientBuilder::new_http(agent_url()).build();

        assert!(client.is_ok());
    }

    #[test]
    fn test_builder_with_mock_transport() {
        let transport = MockTransport::new(|_| TransportResponse::new(200));

        let client = A2AClientBuilder::new(agent_url())
            .with_transport(transport)
            .with_codec(Arc::new(JsonCodec::new()))
            .build();

        assert!(client.is_ok());
    }

    #[test]
    fn test_builder_without_transport() {
        let result = A2AClientBuilder::<MockTransport>::new(agent_url()).build();

        assert!(result.is_err());
    }

    #[test]
    fn test_builder_all_options() {
        let client = A2AClientBuilder::new_http(agent_url())
            .with_timeout(Duration::from_secs(45))
            .with_transport_mode(TransportMode::Poll)
            .with_poll_interval(Duration::from_millis(250))
            .build()
            .unwrap();

        let config = client.config();
        assert_eq!(config.agent_url, "http://localhost:8002/");
        assert_eq!(config.timeout, Some(Duration::from_secs(45)));
        assert_eq!(config.transport, TransportMode::Poll);
        assert_eq!(config.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_builder_without_timeout() {
        let client = A2AClientBuilder::new_http(agent_url())
            .without_timeout()
            .build()
            .unwrap();

        assert_eq!(client.config().timeout, None);
    }
}
