//! In-process agent host
//!
//! [`LocalTransport`] serves an [`AgentHandler`] over the same wire shapes an
//! HTTP agent speaks: the descriptor resource, JSON-RPC `message/send` and
//! `message/stream`, and the task resources. A client wired to it behaves
//! exactly as it would against a remote agent, without sockets.

use std::{
    collections::HashMap,
    sync::Arc,
    task::{Context, Poll},
};

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use url::Url;
use uuid::Uuid;

use crate::{
    codec::{EventStream, StreamEvent},
    protocol::{
        agent::AgentDescriptor,
        error::A2AError,
        message::Message,
        task::{Task, TaskStatus},
        Artifact,
    },
    transport::{Transport, TransportRequest, TransportResponse},
};

const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;
const INTERNAL_ERROR: i64 = -32603;

/// Something that answers questions as an A2A agent
#[async_trait]
pub trait AgentHandler: Send + Sync + 'static {
    /// Descriptor published at `/.well-known/agent.json`
    fn descriptor(&self) -> AgentDescriptor;

    /// Answer the text of one incoming message
    async fn answer(&self, input: &str) -> Result<String, A2AError>;
}

/// Transport that dispatches requests to an in-process [`AgentHandler`]
pub struct LocalTransport<H> {
    handler: Arc<H>,
    base_url: Url,
    tasks: Arc<Mutex<HashMap<String, Task>>>,
}

impl<H: AgentHandler> LocalTransport<H> {
    /// Host a handler; the base URL is the one its descriptor publishes
    pub fn new(handler: H) -> Self {
        Self::from_arc(Arc::new(handler))
    }

    /// Host a handler that is shared with other owners
    pub fn from_arc(handler: Arc<H>) -> Self {
        let base_url = handler.descriptor().url;
        Self {
            handler,
            base_url,
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The hosted handler
    pub fn handler(&self) -> &Arc<H> {
        &self.handler
    }

    async fn send_message(&self, body: &[u8]) -> TransportResponse {
        let call = match JsonRpcCall::parse(body) {
            Ok(call) => call,
            Err(response) => return response,
        };

        if call.method != "message/send" {
            return call.error(METHOD_NOT_FOUND, format!("Method not found: {}", call.method));
        }

        let Some(input) = call.input() else {
            return call.error(INVALID_PARAMS, "message has no text part");
        };

        match self.handler.answer(&input).await {
            Ok(answer) => {
                let task = Task::new(new_task_id())
                    .with_status(TaskStatus::Completed)
                    .with_artifact(Artifact::text(answer));
                call.result(json!(task))
            }
            Err(e) => {
                tracing::warn!(error = %e, "local agent failed to answer");
                call.error(INTERNAL_ERROR, e.to_string())
            }
        }
    }

    async fn create_task(&self, body: &[u8]) -> TransportResponse {
        let input = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|body| body.get("input").and_then(Value::as_str).map(str::to_string));

        let Some(input) = input else {
            return TransportResponse::json(400, &json!({"message": "missing task input"}));
        };

        let task = Task::new(new_task_id());
        let task = match self.handler.answer(&input).await {
            Ok(answer) => task
                .with_status(TaskStatus::Completed)
                .with_artifact(Artifact::text(answer)),
            Err(e) => task.with_status(TaskStatus::Failed).with_error(e.to_string()),
        };

        let task_id = task.id.clone();
        self.tasks.lock().await.insert(task_id.clone(), task);
        TransportResponse::json(200, &json!({ "task_id": task_id }))
    }

    /// Report a task; a task reported in a terminal state is forgotten
    async fn get_task(&self, task_id: &str) -> TransportResponse {
        let mut tasks = self.tasks.lock().await;

        let task = match tasks.get(task_id).map(Task::is_terminal) {
            Some(true) => tasks.remove(task_id),
            Some(false) => tasks.get(task_id).cloned(),
            None => None,
        };

        match task {
            Some(task) => TransportResponse::json(200, &json!(task)),
            None => TransportResponse::json(
                404,
                &json!({"message": "Task not found", "taskId": task_id}),
            ),
        }
    }
}

fn new_task_id() -> String {
    Uuid::now_v7().to_string()
}

/// An incoming JSON-RPC call, kept for its id when answering
struct JsonRpcCall {
    method: String,
    params: Value,
    id: Value,
}

impl JsonRpcCall {
    fn parse(body: &[u8]) -> Result<Self, TransportResponse> {
        let envelope: Value = serde_json::from_slice(body).map_err(|e| {
            TransportResponse::json(
                200,
                &json!({
                    "jsonrpc": "2.0",
                    "error": {"code": -32700, "message": format!("Parse error: {}", e)},
                    "id": null,
                }),
            )
        })?;

        Ok(Self {
            method: envelope
                .get("method")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            params: envelope.get("params").cloned().unwrap_or(Value::Null),
            id: envelope.get("id").cloned().unwrap_or(Value::Null),
        })
    }

    fn input(&self) -> Option<String> {
        let message: Message = serde_json::from_value(self.params.get("message")?.clone()).ok()?;
        message.first_text().map(str::to_string)
    }

    fn result(&self, result: Value) -> TransportResponse {
        TransportResponse::json(200, &json!({"jsonrpc": "2.0", "result": result, "id": self.id}))
    }

    fn error(&self, code: i64, message: impl Into<String>) -> TransportResponse {
        TransportResponse::json(
            200,
            &json!({
                "jsonrpc": "2.0",
                "error": {"code": code, "message": message.into()},
                "id": self.id,
            }),
        )
    }
}

impl<H> Clone for LocalTransport<H> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
            base_url: self.base_url.clone(),
            tasks: self.tasks.clone(),
        }
    }
}

impl<H> std::fmt::Debug for LocalTransport<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalTransport")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[async_trait]
impl<H: AgentHandler> Transport for LocalTransport<H> {
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), A2AError>> {
        Poll::Ready(Ok(()))
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, A2AError> {
        let response = match (request.method.as_str(), request.endpoint.as_str()) {
            ("GET", "/.well-known/agent.json") => {
                TransportResponse::json(200, &json!(self.handler.descriptor()))
            }
            ("POST", "" | "/") => self.send_message(&request.body).await,
            ("POST", "/tasks") => self.create_task(&request.body).await,
            ("GET", endpoint) if endpoint.starts_with("/tasks/") => {
                self.get_task(&endpoint["/tasks/".len()..]).await
            }
            (method, endpoint) => TransportResponse::json(
                404,
                &json!({"message": format!("No route for {} {}", method, endpoint)}),
            ),
        };

        Ok(response)
    }

    async fn execute_streaming(&self, request: TransportRequest) -> Result<EventStream, A2AError> {
        let call = JsonRpcCall::parse(&request.body)
            .map_err(|_| A2AError::Protocol("malformed JSON-RPC request".to_string()))?;

        if call.method != "message/stream" {
            return Err(A2AError::Protocol(format!("Method not found: {}", call.method)));
        }
        let input = call
            .input()
            .ok_or_else(|| A2AError::Protocol("message has no text part".to_string()))?;

        let task_id = new_task_id();
        let events = match self.handler.answer(&input).await {
            Ok(answer) => vec![
                json!({
                    "kind": "artifact-update",
                    "taskId": task_id,
                    "artifact": Artifact::text(answer),
                }),
                json!({
                    "kind": "status-update",
                    "taskId": task_id,
                    "status": {"state": "completed"},
                    "final": true,
                }),
            ],
            Err(e) => vec![json!({
                "kind": "status-update",
                "taskId": task_id,
                "status": {"state": "failed", "message": Message::agent(e.to_string())},
                "final": true,
            })],
        };

        let events: Vec<_> = events.into_iter().map(StreamEvent::from_value).collect();
        Ok(futures::stream::iter(events).boxed())
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn supports_streaming(&self) -> bool {
        true
    }
}
