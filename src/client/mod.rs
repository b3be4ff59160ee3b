//! High-level client API for A2A protocol

pub mod agent;
pub mod builder;
pub mod config;
pub mod poller;
pub mod stream;

pub use agent::{AgentClient, AgentReply};
pub use builder::{A2AClient, A2AClientBuilder};
pub use config::{CallTimeout, ClientConfig, SendOptions, TransportMode};
pub use poller::TaskPoller;
pub use stream::StreamCollector;
