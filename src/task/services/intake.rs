//! Intake service: task creation and read-side queries.

use crate::task::{
    domain::{EventCategory, Task, TaskDomainError, TaskEvent, TaskId, TaskStatus},
    ports::{HandoffError, HandoffMessage, HandoffQueue, StatusUpdate, TaskStore, TaskStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Page size used when draining the store's listing.
const LIST_PAGE_SIZE: usize = 50;

/// Event recorded after a successful hand-off publish.
const QUEUED_EVENT_MESSAGE: &str = "Agent queued for processing";

/// Service-level errors for intake operations.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Client input failed domain validation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The requested task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The task store rejected an operation.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for intake operations.
pub type IntakeResult<T> = Result<T, IntakeError>;

/// Outcome returned to the client after task creation.
///
/// Creation is success-shaped even when the hand-off fails: the client is
/// always told the task id, and the `status` field reports whether
/// processing was queued or the task was parked in `error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskReceipt {
    /// Identifier of the created task.
    pub id: TaskId,
    /// Status the task held when intake finished.
    pub status: TaskStatus,
    /// Human-readable summary for the client.
    pub message: String,
}

/// Task intake orchestration service.
#[derive(Clone)]
pub struct IntakeService<S, Q, C>
where
    S: TaskStore,
    Q: HandoffQueue,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    queue: Arc<Q>,
    clock: Arc<C>,
}

impl<S, Q, C> IntakeService<S, Q, C>
where
    S: TaskStore,
    Q: HandoffQueue,
    C: Clock + Send + Sync,
{
    /// Creates a new intake service.
    #[must_use]
    pub const fn new(store: Arc<S>, queue: Arc<Q>, clock: Arc<C>) -> Self {
        Self {
            store,
            queue,
            clock,
        }
    }

    /// Creates a task from a client description and fires the hand-off.
    ///
    /// The task is persisted first, so a hand-off failure never loses the
    /// record: the task is parked in `error` with a descriptive message and
    /// the receipt still carries its id.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Domain`] when the description is empty, or
    /// [`IntakeError::Store`] when the initial write fails.
    pub async fn create_task(&self, description: &str) -> IntakeResult<CreateTaskReceipt> {
        let task = Task::new(description, &*self.clock)?;
        self.store.put(&task).await?;
        let task_id = task.id();

        let message = HandoffMessage::new(task_id, description);
        match self.queue.publish(message).await {
            Ok(()) => {
                self.append_event_best_effort(
                    task_id,
                    TaskEvent::new(QUEUED_EVENT_MESSAGE, EventCategory::Info, &*self.clock),
                )
                .await;
                Ok(CreateTaskReceipt {
                    id: task_id,
                    status: TaskStatus::Pending,
                    message: "Task queued for processing".to_owned(),
                })
            }
            Err(err) => {
                tracing::warn!(%task_id, error = %err, "hand-off publish failed");
                self.park_in_error_best_effort(task_id, &err).await;
                Ok(CreateTaskReceipt {
                    id: task_id,
                    status: TaskStatus::Error,
                    message: "Task created but processing could not be started".to_owned(),
                })
            }
        }
    }

    /// Returns all tasks, newest `created_at` first.
    ///
    /// The store hands back implementation-ordered pages; this method drains
    /// them and re-sorts client-side.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Store`] when a page read fails.
    pub async fn list_tasks(&self) -> IntakeResult<Vec<Task>> {
        let mut tasks = Vec::new();
        let mut token = None;
        loop {
            let page = self.store.list(LIST_PAGE_SIZE, token).await?;
            tasks.extend(page.tasks);
            match page.next_page_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }
        tasks.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(tasks)
    }

    /// Returns the task with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::TaskNotFound`] when the id is unknown, or
    /// [`IntakeError::Store`] when the lookup fails.
    pub async fn get_task(&self, id: TaskId) -> IntakeResult<Task> {
        self.store
            .get(id)
            .await?
            .ok_or(IntakeError::TaskNotFound(id))
    }

    /// Appends an informational event, logging instead of failing.
    async fn append_event_best_effort(&self, task_id: TaskId, event: TaskEvent) {
        if let Err(err) = self.store.append_event(task_id, event).await {
            tracing::warn!(%task_id, error = %err, "could not append intake event");
        }
    }

    /// Parks the task in `error` after a hand-off failure, logging instead
    /// of failing: the receipt already tells the client the error state.
    async fn park_in_error_best_effort(&self, task_id: TaskId, cause: &HandoffError) {
        let reason = format!("Error queueing agent processing: {cause}");
        if let Err(err) = self
            .store
            .update_status(task_id, StatusUpdate::error(reason.clone()))
            .await
        {
            tracing::error!(%task_id, error = %err, "could not record hand-off failure");
        }
        self.append_event_best_effort(
            task_id,
            TaskEvent::new(reason, EventCategory::Error, &*self.clock),
        )
        .await;
    }
}
