//! # A2A Router
//!
//! A Tower-based Agent2Agent (A2A) client and routing core for a small
//! multi-agent setup: a manager agent forwards each question to one of
//! several specialists and reports which one answered.
//!
//! The client speaks JSON-RPC over HTTP (or to an in-process agent) and
//! accepts answers delivered three ways: a direct reply, a polled task, or
//! an event stream. Whatever the shape, it is reduced to one answer text,
//! and the routing decision the manager embedded in that text is split back
//! out.
//!
//! ## Features
//!
//! - **Transport Agnostic**: HTTP via reqwest, or an in-process [`transport::LocalTransport`]
//! - **Composable Middleware**: validation as a Tower layer around the protocol service
//! - **Shape Independent**: [`normalize`] extracts one answer from any reply shape
//! - **Routing Metadata**: [`codec::metadata`] carries the routing decision inside plain text
//!
//! ## Example
//!
//! ```rust,no_run
//! use a2a_router::prelude::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let url = "http://localhost:8002".parse().unwrap();
//!     let mut client = A2AClientBuilder::new_http(url)
//!         .with_timeout(Duration::from_secs(30))
//!         .build()?;
//!
//!     let reply = client.send_text("How do I give feedback to my team?").await?;
//!     if let Some(routing) = &reply.routing {
//!         println!("[{}] {}", routing.to.name, routing.reason);
//!     }
//!     println!("{}", reply.text);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod codec;
pub mod layer;
pub mod manager;
pub mod normalize;
pub mod protocol;
pub mod service;
pub mod transport;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        client::{
            A2AClient, A2AClientBuilder, AgentClient, AgentReply, CallTimeout, ClientConfig,
            SendOptions, TransportMode,
        },
        codec::metadata,
        manager::{Classifier, KeywordClassifier, Manager},
        normalize::{normalize, NO_RESPONSE},
        protocol::error::A2AError,
        protocol::{
            AgentDescriptor, AgentSummary, ConversationEntry, Message, QuestionEnvelope,
            RoutingDecision, Task, TaskStatus,
        },
        transport::{AgentHandler, HttpTransport, LocalTransport},
    };
}
