//! Task aggregate root and persistence reconstruction types.

use super::{
    EventCategory, TaskDomainError, TaskEvent, TaskId, TaskStatus, VendorOutreach,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Message recorded in the seed event appended at task creation.
const CREATED_EVENT_MESSAGE: &str = "Task created";

/// Task aggregate root.
///
/// A task is created by intake with status [`TaskStatus::Pending`] and a
/// single seed event; every later mutation flows through the task store's
/// partial-update operations. `description` and `created_at` are immutable
/// after creation, `events` is append-only, and the agent result fields are
/// written at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    description: String,
    status: TaskStatus,
    vendors: Vec<VendorOutreach>,
    emails_sent: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    agent_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    events: Vec<TaskEvent>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Results of a successful agent invocation, applied to a task exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResults {
    /// Free-text summary produced by the agent.
    pub agent_response: String,
    /// Vendors contacted, with their correlated emails.
    pub vendors: Vec<VendorOutreach>,
    /// Number of outreach emails sent.
    pub emails_sent: u64,
}

impl AgentResults {
    /// Creates a new results record.
    #[must_use]
    pub fn new(
        agent_response: impl Into<String>,
        vendors: Vec<VendorOutreach>,
        emails_sent: u64,
    ) -> Self {
        Self {
            agent_response: agent_response.into(),
            vendors,
            emails_sent,
        }
    }
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted request description.
    pub description: String,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted vendor outreach records.
    pub vendors: Vec<VendorOutreach>,
    /// Persisted outreach email count.
    pub emails_sent: u64,
    /// Persisted agent summary, if processing completed.
    pub agent_response: Option<String>,
    /// Persisted error message, if processing failed.
    pub error_message: Option<String>,
    /// Persisted audit events.
    pub events: Vec<TaskEvent>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task from a client-supplied description.
    ///
    /// The task is seeded with one `info` event recording its creation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDescription`] when the description is
    /// empty after trimming.
    pub fn new(description: impl Into<String>, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let text = description.into();
        if text.trim().is_empty() {
            return Err(TaskDomainError::EmptyDescription);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            description: text,
            status: TaskStatus::Pending,
            vendors: Vec::new(),
            emails_sent: 0,
            agent_response: None,
            error_message: None,
            events: vec![TaskEvent {
                ts: timestamp,
                message: CREATED_EVENT_MESSAGE.to_owned(),
                category: EventCategory::Info,
            }],
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            description: data.description,
            status: data.status,
            vendors: data.vendors,
            emails_sent: data.emails_sent,
            agent_response: data.agent_response,
            error_message: data.error_message,
            events: data.events,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the client-supplied request description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the vendor outreach records.
    #[must_use]
    pub fn vendors(&self) -> &[VendorOutreach] {
        &self.vendors
    }

    /// Returns the number of outreach emails sent.
    #[must_use]
    pub const fn emails_sent(&self) -> u64 {
        self.emails_sent
    }

    /// Returns the agent's free-text summary, if processing completed.
    #[must_use]
    pub fn agent_response(&self) -> Option<&str> {
        self.agent_response.as_deref()
    }

    /// Returns the error message, if processing failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns the append-only audit events in append order.
    #[must_use]
    pub fn events(&self) -> &[TaskEvent] {
        &self.events
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Validates that the task may move to the given status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the
    /// lifecycle state machine forbids the move.
    pub const fn ensure_transition(&self, to: TaskStatus) -> Result<(), TaskDomainError> {
        if self.status.can_transition_to(to) {
            Ok(())
        } else {
            Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to,
            })
        }
    }

    /// Applies a status change recorded by the store.
    pub(crate) fn apply_status(
        &mut self,
        status: TaskStatus,
        error_message: Option<String>,
        at: DateTime<Utc>,
    ) {
        self.status = status;
        if error_message.is_some() {
            self.error_message = error_message;
        }
        self.updated_at = at;
    }

    /// Applies the write-once agent results recorded by the store.
    pub(crate) fn apply_agent_results(&mut self, results: &AgentResults, at: DateTime<Utc>) {
        self.agent_response = Some(results.agent_response.clone());
        self.vendors = results.vendors.clone();
        self.emails_sent = results.emails_sent;
        self.updated_at = at;
    }

    /// Appends one audit event recorded by the store.
    pub(crate) fn apply_event(&mut self, event: TaskEvent) {
        self.updated_at = event.ts;
        self.events.push(event);
    }
}
