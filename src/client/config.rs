//! Client configuration

use std::time::Duration;

/// Default budget for one `send_message` exchange
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default interval between task status fetches
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// How a client obtains an agent's reply
///
/// Fixed per client; never chosen from the shape of a response.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    /// One JSON-RPC `message/send` call whose result carries the answer
    #[default]
    Direct,

    /// Create a task, then poll it until it is terminal
    Poll,

    /// One `message/stream` call whose events carry the answer
    Stream,
}

/// Configuration for an A2A client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the agent
    pub agent_url: String,

    /// Default budget for a whole exchange; `None` runs without a timer
    pub timeout: Option<Duration>,

    /// Transport variant used by `send_message`
    pub transport: TransportMode,

    /// Interval between task status fetches in [`TransportMode::Poll`]
    pub poll_interval: Duration,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(agent_url: impl Into<String>) -> Self {
        Self {
            agent_url: agent_url.into(),
            timeout: Some(DEFAULT_TIMEOUT),
            transport: TransportMode::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Run exchanges without a timer
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Set the transport variant
    pub fn with_transport_mode(mut self, transport: TransportMode) -> Self {
        self.transport = transport;
        self
    }

    /// Set the poll interval
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// Timer applied to a single `send_message` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CallTimeout {
    /// Use the client's configured timeout
    #[default]
    ClientDefault,

    /// Race the exchange against this budget; zero expires at once
    Limit(Duration),

    /// Wait for the exchange however long it takes
    Unbounded,
}

/// Per-call options for `send_message`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendOptions {
    pub timeout: CallTimeout,
}

impl SendOptions {
    /// Options with an explicit budget
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: CallTimeout::Limit(timeout),
        }
    }

    /// Options that wait for the exchange however long it takes
    pub fn without_timeout() -> Self {
        Self {
            timeout: CallTimeout::Unbounded,
        }
    }

    /// The budget for this call given the client's default
    pub fn budget(&self, client_default: Option<Duration>) -> Option<Duration> {
        match self.timeout {
            CallTimeout::ClientDefault => client_default,
            CallTimeout::Limit(timeout) => Some(timeout),
            CallTimeout::Unbounded => None,
        }
    }
}
