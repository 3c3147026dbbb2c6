//! In-memory task store for tests and local runs.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::task::{
    domain::{AgentResults, Task, TaskEvent, TaskId},
    ports::{PageToken, StatusUpdate, TaskPage, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Tasks are kept in identifier order, which doubles as the store's paging
/// order: a page token is the identifier of the last task returned.
#[derive(Debug)]
pub struct InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<BTreeMap<Uuid, Task>>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(BTreeMap::new())),
            clock,
        }
    }

    fn read_state(&self) -> TaskStoreResult<std::sync::RwLockReadGuard<'_, BTreeMap<Uuid, Task>>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::unavailable(std::io::Error::other(err.to_string())))
    }

    fn write_state(
        &self,
    ) -> TaskStoreResult<std::sync::RwLockWriteGuard<'_, BTreeMap<Uuid, Task>>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::unavailable(std::io::Error::other(err.to_string())))
    }
}

fn parse_token(token: &PageToken) -> TaskStoreResult<Uuid> {
    Uuid::parse_str(token.as_str()).map_err(|err| {
        TaskStoreError::unavailable(std::io::Error::other(format!("invalid page token: {err}")))
    })
}

#[async_trait]
impl<C> TaskStore for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn put(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.write_state()?;
        state.insert(task.id().into_inner(), task.clone());
        Ok(())
    }

    async fn get(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.get(&id.into_inner()).cloned())
    }

    async fn update_status(&self, id: TaskId, update: StatusUpdate) -> TaskStoreResult<Task> {
        let now = self.clock.utc();
        let mut state = self.write_state()?;
        let task = state
            .get_mut(&id.into_inner())
            .ok_or(TaskStoreError::NotFound(id))?;
        task.apply_status(update.status, update.error_message, now);
        Ok(task.clone())
    }

    async fn record_agent_results(
        &self,
        id: TaskId,
        results: &AgentResults,
    ) -> TaskStoreResult<Task> {
        let now = self.clock.utc();
        let mut state = self.write_state()?;
        let task = state
            .get_mut(&id.into_inner())
            .ok_or(TaskStoreError::NotFound(id))?;
        task.apply_agent_results(results, now);
        Ok(task.clone())
    }

    async fn append_event(&self, id: TaskId, event: TaskEvent) -> TaskStoreResult<Task> {
        let mut state = self.write_state()?;
        let task = state
            .get_mut(&id.into_inner())
            .ok_or(TaskStoreError::NotFound(id))?;
        task.apply_event(event);
        Ok(task.clone())
    }

    async fn list(
        &self,
        limit: usize,
        page_token: Option<PageToken>,
    ) -> TaskStoreResult<TaskPage> {
        let after = page_token.as_ref().map(parse_token).transpose()?;
        let state = self.read_state()?;

        let lower = after.map_or(Bound::Unbounded, Bound::Excluded);
        let tasks: Vec<Task> = state
            .range((lower, Bound::Unbounded))
            .take(limit)
            .map(|(_, task)| task.clone())
            .collect();

        let next_page_token = tasks
            .last()
            .filter(|_| tasks.len() == limit)
            .and_then(|last| {
                let more_remain = state
                    .range((Bound::Excluded(last.id().into_inner()), Bound::Unbounded))
                    .next()
                    .is_some();
                more_remain.then(|| PageToken::new(last.id().to_string()))
            });

        Ok(TaskPage {
            tasks,
            next_page_token,
        })
    }
}
