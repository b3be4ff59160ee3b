//! A manager and three canned specialists wired together in one process
//!
//! ```text
//! RUST_LOG=a2a_router=debug cargo run --example local_router
//! ```

use a2a_router::{prelude::*, protocol::AgentSummary};
use async_trait::async_trait;
use tracing_subscriber::EnvFilter;
use url::Url;

/// A specialist that prefixes every answer with its field
struct CannedSpecialist {
    descriptor: AgentDescriptor,
}

impl CannedSpecialist {
    fn new(id: &str, name: &str, port: u16, color: &str) -> anyhow::Result<Self> {
        let url = Url::parse(&format!("http://localhost:{port}"))?;
        Ok(Self {
            descriptor: AgentDescriptor::new(id, name, url).with_color(color),
        })
    }
}

#[async_trait]
impl AgentHandler for CannedSpecialist {
    fn descriptor(&self) -> AgentDescriptor {
        self.descriptor.clone()
    }

    async fn answer(&self, input: &str) -> Result<String, A2AError> {
        let envelope = QuestionEnvelope::parse(input);
        Ok(format!(
            "{} here. You asked: \"{}\" ({} earlier turns)",
            self.descriptor.name,
            envelope.current_question,
            envelope.conversation_history.len()
        ))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let specialists = [
        CannedSpecialist::new("tech", "Tech Expert", 8000, "cyan")?,
        CannedSpecialist::new("hr", "HR Expert", 8001, "green")?,
        CannedSpecialist::new("design", "Design Expert", 8003, "magenta")?,
    ];
    let summaries: Vec<AgentSummary> = specialists.iter().map(|s| s.descriptor.summary()).collect();

    let manager_descriptor =
        AgentDescriptor::new("manager", "Manager", Url::parse("http://localhost:8002")?);
    let classifier = KeywordClassifier::standard(
        manager_descriptor.summary(),
        summaries[0].clone(),
        summaries[1].clone(),
        summaries[2].clone(),
    );

    let mut manager = Manager::new(manager_descriptor, classifier);
    for (specialist, summary) in specialists.into_iter().zip(&summaries) {
        let client = A2AClientBuilder::new_local(specialist).build()?;
        manager = manager.with_specialist(summary, client);
    }

    let mut client = A2AClientBuilder::new_local(manager).build()?;

    let questions = [
        "How do I implement a REST API?",
        "How do I give constructive feedback to my team?",
        "And what if they disagree?",
        "How do I design an accessible button component?",
    ];

    let mut history = Vec::new();
    for question in questions {
        let reply = client
            .send_message(question, &history, SendOptions::default())
            .await?;

        println!("\nYou: {question}");
        match &reply.routing {
            Some(routing) => println!("[{} -> {}] {}", routing.from.name, routing.to.name, routing.reason),
            None => println!("[no routing reported]"),
        }
        println!("{}", reply.text);

        history.push(ConversationEntry::user(question));
        history.push(ConversationEntry::assistant(reply.text));
    }

    Ok(())
}
