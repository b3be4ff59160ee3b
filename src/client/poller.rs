//! Create-then-poll transport variant

use std::time::Duration;

use tokio::time::Instant;
use tower_service::Service;

use crate::{
    client::{agent::AgentClient, config::DEFAULT_POLL_INTERVAL},
    normalize::normalize_task,
    protocol::{
        error::A2AError,
        task::{Task, TaskStatus},
    },
    service::{A2ARequest, A2AResponse},
};

/// Polls a task resource until it is terminal or the budget runs out
///
/// After each non-terminal fetch the poller sleeps one interval, then gives
/// up with [`A2AError::Timeout`] once the elapsed time has reached the
/// budget. A 1 s budget with a 500 ms interval therefore makes exactly two
/// fetches. The remote task is never cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPoller {
    interval: Duration,
    budget: Option<Duration>,
}

impl TaskPoller {
    /// Poll at `interval` with no budget
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            budget: None,
        }
    }

    /// Give up once `budget` has elapsed after a fetch
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Submit `input` as a task and return the answer text once it completes
    pub async fn run<S>(&self, client: &mut AgentClient<S>, input: String) -> Result<String, A2AError>
    where
        S: Service<A2ARequest, Response = A2AResponse, Error = A2AError>,
    {
        let task_id = client.create_task(input).await?;
        tracing::debug!(%task_id, "task submitted");

        let task = self.wait(client, &task_id).await?;
        Ok(normalize_task(&task))
    }

    /// Fetch `task_id` until it is completed
    ///
    /// # Errors
    ///
    /// `A2AError::TaskFailed` with the server's reason when the task fails,
    /// `A2AError::Timeout` when the budget runs out first.
    pub async fn wait<S>(&self, client: &mut AgentClient<S>, task_id: &str) -> Result<Task, A2AError>
    where
        S: Service<A2ARequest, Response = A2AResponse, Error = A2AError>,
    {
        let started = Instant::now();
        let mut observed = Task::new(task_id);
        let mut fetches = 0u32;

        loop {
            let snapshot = client.get_task(task_id).await?;
            fetches += 1;
            observed.absorb(snapshot);

            match observed.status {
                TaskStatus::Completed => {
                    tracing::debug!(task_id, fetches, "task completed");
                    return Ok(observed);
                }
                TaskStatus::Failed => {
                    let reason = observed.failure_reason();
                    tracing::debug!(task_id, fetches, %reason, "task failed");
                    return Err(A2AError::TaskFailed { reason });
                }
                TaskStatus::Submitted | TaskStatus::Working => {}
            }

            tokio::time::sleep(self.interval).await;

            if let Some(budget) = self.budget {
                if started.elapsed() >= budget {
                    tracing::warn!(task_id, fetches, "task still running when budget ran out");
                    return Err(A2AError::Timeout);
                }
            }
        }
    }
}

impl Default for TaskPoller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}
