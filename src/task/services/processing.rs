//! Processing service: drives one agent turn per accepted hand-off.

use crate::task::{
    domain::{
        AgentResults, EventCategory, Task, TaskDomainError, TaskEvent, TaskId, TaskStatus,
        attach_vendor_emails,
    },
    ports::{
        AgentInvocationError, AgentRuntime, HandoffMessage, StatusUpdate, TaskStore,
        TaskStoreError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Event recorded when the worker picks a task up.
const STARTED_EVENT_MESSAGE: &str = "Agent processing started";

/// Event recorded when the agent turn succeeds.
const COMPLETED_EVENT_MESSAGE: &str = "Agent completed task successfully";

/// Service-level errors for processing operations.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// The hand-off message is missing required fields.
    #[error("task_id and description are required")]
    MissingFields,

    /// The referenced task does not exist; nothing was mutated.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The lifecycle state machine rejected a transition.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The agent invocation failed; the task was parked in `error`.
    #[error("agent processing failed for task {task_id}: {source}")]
    Agent {
        /// Task the failed turn belonged to.
        task_id: TaskId,
        /// Underlying invocation failure.
        #[source]
        source: AgentInvocationError,
    },

    /// The task store rejected an operation.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for processing operations.
pub type ProcessingResult<T> = Result<T, ProcessingError>;

/// Outcome of one accepted hand-off message.
#[derive(Debug, Clone)]
pub enum ProcessOutcome {
    /// The agent turn completed and results were recorded.
    Completed(Task),
    /// The message was a redelivery for a task already past `pending`.
    AlreadyHandled(TaskStatus),
}

/// Task processing orchestration service.
#[derive(Clone)]
pub struct ProcessingService<S, A, C>
where
    S: TaskStore,
    A: AgentRuntime,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    agent: Arc<A>,
    clock: Arc<C>,
}

impl<S, A, C> ProcessingService<S, A, C>
where
    S: TaskStore,
    A: AgentRuntime,
    C: Clock + Send + Sync,
{
    /// Creates a new processing service.
    #[must_use]
    pub const fn new(store: Arc<S>, agent: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            store,
            agent,
            clock,
        }
    }

    /// Processes one hand-off message.
    ///
    /// Drives exactly one agent invocation for a pending task and records
    /// the outcome. Redeliveries for tasks already past `pending` are
    /// acknowledged as no-ops, so the hand-off channel may deliver more than
    /// once without double-processing.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::MissingFields`] for an empty description
    /// (no state is mutated), [`ProcessingError::TaskNotFound`] for an
    /// unknown id (no state is mutated), [`ProcessingError::Agent`] when the
    /// agent turn fails, or [`ProcessingError::Store`] when the store does.
    /// After the task was picked up, failures are additionally recorded on
    /// the task itself, best-effort.
    pub async fn process(&self, message: &HandoffMessage) -> ProcessingResult<ProcessOutcome> {
        if message.description.trim().is_empty() {
            return Err(ProcessingError::MissingFields);
        }

        let task = self
            .store
            .get(message.task_id)
            .await?
            .ok_or(ProcessingError::TaskNotFound(message.task_id))?;

        if task.status() != TaskStatus::Pending {
            tracing::info!(
                task_id = %message.task_id,
                status = %task.status(),
                "hand-off redelivery ignored"
            );
            return Ok(ProcessOutcome::AlreadyHandled(task.status()));
        }
        task.ensure_transition(TaskStatus::Processing)?;

        match self.run_agent_turn(message).await {
            Ok(completed) => Ok(ProcessOutcome::Completed(completed)),
            Err(err) => {
                self.park_in_error_best_effort(message.task_id, &err).await;
                Err(err)
            }
        }
    }

    /// Moves the task to `processing`, runs the agent once, and records the
    /// successful outcome.
    async fn run_agent_turn(&self, message: &HandoffMessage) -> ProcessingResult<Task> {
        let task_id = message.task_id;
        self.store
            .update_status(task_id, StatusUpdate::to(TaskStatus::Processing))
            .await?;
        self.store
            .append_event(
                task_id,
                TaskEvent::new(STARTED_EVENT_MESSAGE, EventCategory::Info, &*self.clock),
            )
            .await?;

        let reply = self
            .agent
            .invoke(&message.description)
            .await
            .map_err(|source| ProcessingError::Agent { task_id, source })?;

        let mut vendors = reply.vendors;
        attach_vendor_emails(&mut vendors, &reply.emails);
        let results = AgentResults::new(reply.response, vendors, reply.emails_sent);

        self.store.record_agent_results(task_id, &results).await?;
        self.store
            .update_status(task_id, StatusUpdate::to(TaskStatus::Completed))
            .await?;
        let completed = self
            .store
            .append_event(
                task_id,
                TaskEvent::new(COMPLETED_EVENT_MESSAGE, EventCategory::Success, &*self.clock),
            )
            .await?;

        tracing::info!(%task_id, vendors = completed.vendors().len(), "agent turn completed");
        Ok(completed)
    }

    /// Records a processing failure on the task, logging instead of failing
    /// when even the error write is rejected: the audit trail then holds
    /// whatever partial state persisted.
    async fn park_in_error_best_effort(&self, task_id: TaskId, cause: &ProcessingError) {
        let reason = format!("Agent error: {cause}");
        if let Err(err) = self
            .store
            .update_status(task_id, StatusUpdate::error(reason.clone()))
            .await
        {
            tracing::error!(%task_id, error = %err, "could not record processing failure");
        }
        if let Err(err) = self
            .store
            .append_event(
                task_id,
                TaskEvent::new(reason, EventCategory::Error, &*self.clock),
            )
            .await
        {
            tracing::error!(%task_id, error = %err, "could not append failure event");
        }
    }
}
