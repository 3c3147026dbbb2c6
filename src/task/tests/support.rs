//! Shared fakes and builders for task tests.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::{Arc, Mutex};

use crate::task::{
    domain::{AgentResults, PersistedTaskData, Task, TaskEvent, TaskId, TaskStatus},
    ports::{
        HandoffError, HandoffMessage, HandoffQueue, HandoffResult, PageToken, StatusUpdate,
        TaskPage, TaskStore, TaskStoreError, TaskStoreResult,
    },
};

/// Hand-off queue that records published messages.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingHandoffQueue {
    messages: Arc<Mutex<Vec<HandoffMessage>>>,
}

impl RecordingHandoffQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn published(&self) -> Vec<HandoffMessage> {
        self.messages.lock().expect("queue lock").clone()
    }
}

#[async_trait]
impl HandoffQueue for RecordingHandoffQueue {
    async fn publish(&self, message: HandoffMessage) -> HandoffResult<()> {
        self.messages.lock().expect("queue lock").push(message);
        Ok(())
    }
}

/// Hand-off queue that rejects every publish.
#[derive(Debug, Clone, Default)]
pub(crate) struct FailingHandoffQueue;

#[async_trait]
impl HandoffQueue for FailingHandoffQueue {
    async fn publish(&self, _message: HandoffMessage) -> HandoffResult<()> {
        Err(HandoffError::QueueClosed)
    }
}

/// Store wrapper that rejects agent-result writes.
///
/// Exercises the best-effort error path taken when the store fails after an
/// agent outcome was already determined.
#[derive(Clone)]
pub(crate) struct ResultsRejectingStore<S>
where
    S: TaskStore,
{
    inner: Arc<S>,
}

impl<S> ResultsRejectingStore<S>
where
    S: TaskStore,
{
    pub(crate) fn new(inner: Arc<S>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S> TaskStore for ResultsRejectingStore<S>
where
    S: TaskStore,
{
    async fn put(&self, task: &Task) -> TaskStoreResult<()> {
        self.inner.put(task).await
    }

    async fn get(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.inner.get(id).await
    }

    async fn update_status(&self, id: TaskId, update: StatusUpdate) -> TaskStoreResult<Task> {
        self.inner.update_status(id, update).await
    }

    async fn record_agent_results(
        &self,
        _id: TaskId,
        _results: &AgentResults,
    ) -> TaskStoreResult<Task> {
        Err(TaskStoreError::unavailable(std::io::Error::other(
            "results write rejected",
        )))
    }

    async fn append_event(&self, id: TaskId, event: TaskEvent) -> TaskStoreResult<Task> {
        self.inner.append_event(id, event).await
    }

    async fn list(
        &self,
        limit: usize,
        page_token: Option<PageToken>,
    ) -> TaskStoreResult<TaskPage> {
        self.inner.list(limit, page_token).await
    }
}

/// Builds a bare persisted task with the given creation time.
pub(crate) fn persisted_task(description: &str, created_at: DateTime<Utc>) -> Task {
    persisted_task_with_status(description, created_at, TaskStatus::Pending)
}

/// Builds a bare persisted task in the given status.
pub(crate) fn persisted_task_with_status(
    description: &str,
    created_at: DateTime<Utc>,
    status: TaskStatus,
) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        description: description.to_owned(),
        status,
        vendors: Vec::new(),
        emails_sent: 0,
        agent_response: None,
        error_message: None,
        events: Vec::new(),
        created_at,
        updated_at: created_at,
    })
}

/// A fixed timestamp offset by the given number of minutes.
pub(crate) fn minute_mark(minutes: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, minutes, 0)
        .single()
        .expect("valid timestamp")
}
