//! HTTP transport implementation for A2A protocol

use std::task::{Context, Poll};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::{
    codec::{EventStream, SseCodec},
    protocol::error::A2AError,
};

use super::{endpoint_url, Transport, TransportRequest, TransportResponse};

/// HTTP transport implementation using reqwest
///
/// Speaks to one agent endpoint. The client applies its own timeout to the
/// whole exchange, so the reqwest client is built without one.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a new HTTP transport
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the agent (e.g., "<http://localhost:8002>")
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a new HTTP transport with a custom reqwest client
    pub fn with_client(base_url: Url, client: reqwest::Client) -> Self {
        Self { client, base_url }
    }

    fn request_builder(&self, request: &TransportRequest) -> Result<reqwest::RequestBuilder, A2AError> {
        let url = endpoint_url(&self.base_url, &request.endpoint);

        match request.method.as_str() {
            "POST" => Ok(self.client.post(&url)),
            "GET" => Ok(self.client.get(&url)),
            _ => Err(A2AError::Transport(format!(
                "Unsupported HTTP method: {}",
                request.method
            ))),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), A2AError>> {
        // HTTP client is always ready
        Poll::Ready(Ok(()))
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, A2AError> {
        let mut req_builder = self.request_builder(&request)?;

        // Add headers
        for (key, value) in request.headers {
            req_builder = req_builder.header(key, value);
        }

        // Add body if not empty
        if !request.body.is_empty() {
            req_builder = req_builder.body(request.body);
        }

        tracing::trace!(url = %self.base_url, endpoint = %request.endpoint, "sending request");
        let response = req_builder.send().await?;

        // Extract status and headers
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        // Extract body
        let body = response.bytes().await?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }

    /// Execute a streaming request (Server-Sent Events)
    ///
    /// Used for `message/stream`, whose reply is a sequence of events
    /// delivered over time.
    async fn execute_streaming(&self, request: TransportRequest) -> Result<EventStream, A2AError> {
        let mut req_builder = self
            .request_builder(&request)?
            .header("Accept", "text/event-stream");

        // The codec's Accept header is replaced by the SSE one
        for (key, value) in request.headers {
            if !key.eq_ignore_ascii_case("accept") {
                req_builder = req_builder.header(key, value);
            }
        }

        if !request.body.is_empty() {
            req_builder = req_builder.body(request.body);
        }

        let response = req_builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(A2AError::Transport(format!(
                "HTTP streaming request failed with status {}: {}",
                status, body
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        if !SseCodec::is_event_stream(content_type.as_deref()) {
            let body = response.bytes().await?;
            tracing::debug!(content_type = ?content_type, "streaming request answered without events");
            return Err(SseCodec::unexpected_body(content_type.as_deref(), &body));
        }

        Ok(SseCodec::new().parse_stream(response.bytes_stream()))
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn supports_streaming(&self) -> bool {
        true
    }
}
