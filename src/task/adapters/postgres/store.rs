//! `PostgreSQL` store implementation for task persistence.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{AgentResults, PersistedTaskData, Task, TaskEvent, TaskId, TaskStatus},
    ports::{PageToken, StatusUpdate, TaskPage, TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Columns returned by the partial-update statements, in [`TaskRow`] order.
const RETURNING_COLUMNS: &str = "id, description, status, vendors, emails_sent, agent_response, \
     error_message, events, created_at, updated_at";

/// `PostgreSQL`-backed task store.
///
/// Partial updates and event appends run as single `UPDATE` statements so
/// the database, not the caller, provides the atomic-append guarantee.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::unavailable)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::unavailable)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn put(&self, task: &Task) -> TaskStoreResult<()> {
        let row = to_new_row(task)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .on_conflict(tasks::id)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(TaskStoreError::unavailable)?;
            Ok(())
        })
        .await
    }

    async fn get(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::unavailable)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn update_status(&self, id: TaskId, update: StatusUpdate) -> TaskStoreResult<Task> {
        let statement = format!(
            "UPDATE tasks SET status = $2, error_message = COALESCE($3, error_message), \
             updated_at = now() WHERE id = $1 RETURNING {RETURNING_COLUMNS}"
        );
        self.run_blocking(move |connection| {
            let row = diesel::sql_query(statement)
                .bind::<diesel::sql_types::Uuid, _>(id.into_inner())
                .bind::<diesel::sql_types::Text, _>(update.status.as_str())
                .bind::<diesel::sql_types::Nullable<diesel::sql_types::Text>, _>(
                    update.error_message,
                )
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::unavailable)?
                .ok_or(TaskStoreError::NotFound(id))?;
            row_to_task(row)
        })
        .await
    }

    async fn record_agent_results(
        &self,
        id: TaskId,
        results: &AgentResults,
    ) -> TaskStoreResult<Task> {
        let vendors = serde_json::to_value(&results.vendors).map_err(TaskStoreError::unavailable)?;
        let emails_sent =
            i64::try_from(results.emails_sent).map_err(TaskStoreError::unavailable)?;
        let agent_response = results.agent_response.clone();
        let statement = format!(
            "UPDATE tasks SET agent_response = $2, vendors = $3, emails_sent = $4, \
             updated_at = now() WHERE id = $1 RETURNING {RETURNING_COLUMNS}"
        );
        self.run_blocking(move |connection| {
            let row = diesel::sql_query(statement)
                .bind::<diesel::sql_types::Uuid, _>(id.into_inner())
                .bind::<diesel::sql_types::Text, _>(agent_response)
                .bind::<diesel::sql_types::Jsonb, _>(vendors)
                .bind::<diesel::sql_types::BigInt, _>(emails_sent)
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::unavailable)?
                .ok_or(TaskStoreError::NotFound(id))?;
            row_to_task(row)
        })
        .await
    }

    async fn append_event(&self, id: TaskId, event: TaskEvent) -> TaskStoreResult<Task> {
        // A single-element array concatenated server-side keeps the append
        // atomic under concurrent writers.
        let payload = serde_json::to_value(vec![event]).map_err(TaskStoreError::unavailable)?;
        let statement = format!(
            "UPDATE tasks SET events = events || $2, updated_at = now() \
             WHERE id = $1 RETURNING {RETURNING_COLUMNS}"
        );
        self.run_blocking(move |connection| {
            let row = diesel::sql_query(statement)
                .bind::<diesel::sql_types::Uuid, _>(id.into_inner())
                .bind::<diesel::sql_types::Jsonb, _>(payload)
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::unavailable)?
                .ok_or(TaskStoreError::NotFound(id))?;
            row_to_task(row)
        })
        .await
    }

    async fn list(
        &self,
        limit: usize,
        page_token: Option<PageToken>,
    ) -> TaskStoreResult<TaskPage> {
        let after = page_token
            .as_ref()
            .map(|token| {
                uuid::Uuid::parse_str(token.as_str()).map_err(|err| {
                    TaskStoreError::unavailable(std::io::Error::other(format!(
                        "invalid page token: {err}"
                    )))
                })
            })
            .transpose()?;
        let fetch = i64::try_from(limit.saturating_add(1)).map_err(TaskStoreError::unavailable)?;

        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .order(tasks::id.asc())
                .limit(fetch)
                .into_boxed();
            if let Some(after_id) = after {
                query = query.filter(tasks::id.gt(after_id));
            }
            let mut rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::unavailable)?;

            let has_more = rows.len() > limit;
            rows.truncate(limit);
            let tasks: Vec<Task> = rows
                .into_iter()
                .map(row_to_task)
                .collect::<TaskStoreResult<_>>()?;
            let next_page_token = has_more
                .then(|| tasks.last().map(|last| PageToken::new(last.id().to_string())))
                .flatten();

            Ok(TaskPage {
                tasks,
                next_page_token,
            })
        })
        .await
    }
}

pub(crate) fn to_new_row(task: &Task) -> TaskStoreResult<NewTaskRow> {
    let vendors = serde_json::to_value(task.vendors()).map_err(TaskStoreError::unavailable)?;
    let events = serde_json::to_value(task.events()).map_err(TaskStoreError::unavailable)?;
    let emails_sent = i64::try_from(task.emails_sent()).map_err(TaskStoreError::unavailable)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        vendors,
        emails_sent,
        agent_response: task.agent_response().map(ToOwned::to_owned),
        error_message: task.error_message().map(ToOwned::to_owned),
        events,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

pub(crate) fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        description,
        status: persisted_status,
        vendors: persisted_vendors,
        emails_sent: persisted_emails_sent,
        agent_response,
        error_message,
        events: persisted_events,
        created_at,
        updated_at,
    } = row;

    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskStoreError::unavailable)?;
    let vendors =
        serde_json::from_value(persisted_vendors).map_err(TaskStoreError::unavailable)?;
    let events = serde_json::from_value(persisted_events).map_err(TaskStoreError::unavailable)?;
    let emails_sent =
        u64::try_from(persisted_emails_sent).map_err(TaskStoreError::unavailable)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        description,
        status,
        vendors,
        emails_sent,
        agent_response,
        error_message,
        events,
        created_at,
        updated_at,
    }))
}
