//! Interactive terminal front end for a manager agent
//!
//! Reads questions from stdin, sends each one with the conversation so far,
//! and prints which specialist answered.
//!
//! ```text
//! A2A_MANAGER_URL=http://localhost:8002 cargo run --example terminal_client
//! ```

use std::time::Duration;

use a2a_router::prelude::*;
use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

const DEFAULT_MANAGER_URL: &str = "http://localhost:8002";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let manager_url =
        std::env::var("A2A_MANAGER_URL").unwrap_or_else(|_| DEFAULT_MANAGER_URL.to_string());
    let url = manager_url
        .parse()
        .with_context(|| format!("invalid manager URL: {manager_url}"))?;

    let mut client = A2AClientBuilder::new_http(url)
        .with_timeout(Duration::from_secs(120))
        .build()?;

    println!("Connected to manager at {manager_url}");
    println!("Type 'clear' to start a new conversation, 'quit' to stop.");

    let mut history: Vec<ConversationEntry> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"\nYou: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            println!("\nGoodbye!");
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }

        match question.to_lowercase().as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye!");
                break;
            }
            "clear" => {
                history.clear();
                println!("[Conversation history cleared]");
                continue;
            }
            _ => {}
        }

        let result = client
            .send_message(question, &history, SendOptions::default())
            .await;
        history.push(ConversationEntry::user(question));

        match result {
            Ok(reply) => {
                match &reply.routing {
                    Some(routing) => println!("\n[{}] {}", routing.to.name, reply.text),
                    None => println!("\n{}", reply.text),
                }
                history.push(ConversationEntry::assistant(reply.text));
            }
            Err(e) => eprintln!("\nError: {e}"),
        }
    }

    Ok(())
}
