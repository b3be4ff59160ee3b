//! Streaming transport variant

use futures::StreamExt;

use crate::{
    codec::{EventStream, StreamEvent},
    normalize::NO_RESPONSE,
    protocol::error::A2AError,
};

/// Folds a reply event stream into one answer
///
/// The most recently seen textual artifact wins. The stream ending is
/// completion; a stream that never carried text yields [`NO_RESPONSE`].
#[derive(Debug, Default)]
pub struct StreamCollector {
    latest: Option<String>,
    events: usize,
}

impl StreamCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take one event into account
    ///
    /// # Errors
    ///
    /// `A2AError::TaskFailed` when the event reports the task as failed.
    pub fn observe(&mut self, event: &StreamEvent) -> Result<(), A2AError> {
        self.events += 1;

        if let Some(reason) = event.failure() {
            return Err(A2AError::TaskFailed { reason });
        }
        if let Some(text) = event.artifact_text() {
            self.latest = Some(text);
        }
        Ok(())
    }

    /// The answer collected so far
    pub fn finish(self) -> String {
        self.latest.unwrap_or_else(|| NO_RESPONSE.to_string())
    }

    /// Drain `events` and return the answer
    ///
    /// A stream error aborts collection with that error.
    pub async fn collect(mut events: EventStream) -> Result<String, A2AError> {
        let mut collector = Self::new();

        while let Some(event) = events.next().await {
            collector.observe(&event?)?;
        }

        tracing::debug!(events = collector.events, "stream finished");
        Ok(collector.finish())
    }
}
