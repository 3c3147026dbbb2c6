//! `PostgreSQL` adapters for task persistence.

mod models;
mod schema;
mod store;

pub use store::{PostgresTaskStore, TaskPgPool};

pub(crate) use models::{NewTaskRow, TaskRow};
pub(crate) use store::{row_to_task, to_new_row};
