//! Store port for durable task persistence.
//!
//! The task store is an external key-value collaborator: every operation is
//! scoped to a single task id, and event appends are atomic on the store
//! side so callers never read-modify-write the audit trail.

use crate::task::domain::{AgentResults, Task, TaskEvent, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Opaque pagination token returned by [`TaskStore::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageToken(String);

impl PageToken {
    /// Wraps a store-specific continuation value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of tasks in store order.
///
/// Pages carry no cross-page transactional guarantee: a task inserted while
/// paging may or may not appear. Callers re-sort by `created_at` before
/// returning tasks to their own clients.
#[derive(Debug, Clone)]
pub struct TaskPage {
    /// Tasks in the store's own iteration order.
    pub tasks: Vec<Task>,
    /// Continuation token when more tasks remain.
    pub next_page_token: Option<PageToken>,
}

/// Status change applied by [`TaskStore::update_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Status the task moves to.
    pub status: TaskStatus,
    /// Error message recorded alongside an `error` status.
    pub error_message: Option<String>,
}

impl StatusUpdate {
    /// Creates a plain status change.
    #[must_use]
    pub const fn to(status: TaskStatus) -> Self {
        Self {
            status,
            error_message: None,
        }
    }

    /// Creates an `error` status change carrying a message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: TaskStatus::Error,
            error_message: Some(message.into()),
        }
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a task, replacing any record with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Unavailable`] on transient backend failure.
    async fn put(&self, task: &Task) -> TaskStoreResult<()>;

    /// Looks up a task by id.
    ///
    /// Returns `None` when the task does not exist; absence is never an
    /// error.
    async fn get(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Applies a status change and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the id is unknown, or
    /// [`TaskStoreError::Unavailable`] on transient backend failure.
    async fn update_status(&self, id: TaskId, update: StatusUpdate) -> TaskStoreResult<Task>;

    /// Records the write-once agent results and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the id is unknown, or
    /// [`TaskStoreError::Unavailable`] on transient backend failure.
    async fn record_agent_results(
        &self,
        id: TaskId,
        results: &AgentResults,
    ) -> TaskStoreResult<Task>;

    /// Atomically appends one audit event and refreshes `updated_at`.
    ///
    /// The append is safe under concurrent appends to the same task; the
    /// store guarantees this, not the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the id is unknown, or
    /// [`TaskStoreError::Unavailable`] on transient backend failure.
    async fn append_event(&self, id: TaskId, event: TaskEvent) -> TaskStoreResult<Task>;

    /// Returns one store-ordered page of at most `limit` tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Unavailable`] on transient backend failure.
    async fn list(&self, limit: usize, page_token: Option<PageToken>)
    -> TaskStoreResult<TaskPage>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Transient backend failure.
    #[error("task store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a backend failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
