//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Client-supplied request description.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub description: String,
    /// Lifecycle status.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Vendor outreach JSON payload.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub vendors: Value,
    /// Number of outreach emails sent.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub emails_sent: i64,
    /// Agent summary, if completed.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub agent_response: Option<String>,
    /// Error message, if failed.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub error_message: Option<String>,
    /// Audit event JSON payload.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub events: Value,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert and upsert model for task records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Client-supplied request description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Vendor outreach JSON payload.
    pub vendors: Value,
    /// Number of outreach emails sent.
    pub emails_sent: i64,
    /// Agent summary, if completed.
    pub agent_response: Option<String>,
    /// Error message, if failed.
    pub error_message: Option<String>,
    /// Audit event JSON payload.
    pub events: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}
