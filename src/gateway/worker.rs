//! Worker-facing hand-off entry point.
//!
//! The processing side receives hand-off payloads rather than client
//! requests. The reply mirrors the HTTP shape for observability, but in the
//! fire-and-forget path nothing waits on it.

use mockable::Clock;
use serde::Serialize;
use serde_json::{Value, json};

use crate::task::{
    ports::{AgentRuntime, HandoffMessage, TaskStore},
    services::{ProcessOutcome, ProcessingError, ProcessingService},
};

/// Informational reply returned to the hand-off transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerResponse {
    /// HTTP-equivalent status code.
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// Structured JSON body.
    pub body: Value,
}

impl WorkerResponse {
    /// Creates a reply.
    #[must_use]
    pub const fn new(status_code: u16, body: Value) -> Self {
        Self { status_code, body }
    }
}

/// Worker gateway over the processing service.
#[derive(Clone)]
pub struct WorkerGateway<S, A, C>
where
    S: TaskStore,
    A: AgentRuntime,
    C: Clock + Send + Sync,
{
    processing: ProcessingService<S, A, C>,
}

impl<S, A, C> WorkerGateway<S, A, C>
where
    S: TaskStore,
    A: AgentRuntime,
    C: Clock + Send + Sync,
{
    /// Creates a worker gateway over a processing service.
    #[must_use]
    pub const fn new(processing: ProcessingService<S, A, C>) -> Self {
        Self { processing }
    }

    /// Handles one raw hand-off payload.
    pub async fn handle(&self, payload: Value) -> WorkerResponse {
        let Ok(message) = serde_json::from_value::<HandoffMessage>(payload) else {
            return WorkerResponse::new(
                400,
                json!({"error": "Missing task_id or description"}),
            );
        };
        let task_id = message.task_id;

        match self.processing.process(&message).await {
            Ok(ProcessOutcome::Completed(task)) => WorkerResponse::new(
                200,
                json!({
                    "task_id": task_id,
                    "status": task.status(),
                    "message": "Agent processing completed",
                }),
            ),
            Ok(ProcessOutcome::AlreadyHandled(status)) => WorkerResponse::new(
                200,
                json!({
                    "task_id": task_id,
                    "status": status,
                    "message": "Task already processed",
                }),
            ),
            Err(ProcessingError::MissingFields) => WorkerResponse::new(
                400,
                json!({"error": "Missing task_id or description"}),
            ),
            Err(ProcessingError::TaskNotFound(_)) => {
                WorkerResponse::new(404, json!({"error": "Task not found"}))
            }
            Err(err) => WorkerResponse::new(
                500,
                json!({
                    "task_id": task_id,
                    "status": "error",
                    "error": err.to_string(),
                }),
            ),
        }
    }
}
