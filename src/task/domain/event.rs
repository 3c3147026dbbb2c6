//! Append-only audit events recorded against a task.

use super::ParseEventCategoryError;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-readable severity category of an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Routine progress information.
    Info,
    /// A step finished successfully.
    Success,
    /// A degraded but non-fatal outcome.
    Warning,
    /// A failure relevant to the task outcome.
    Error,
}

impl EventCategory {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl TryFrom<&str> for EventCategory {
    type Error = ParseEventCategoryError;

    fn try_from(value: &str) -> Result<Self, ParseEventCategoryError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            _ => Err(ParseEventCategoryError(value.to_owned())),
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in a task's append-only audit trail.
///
/// Events are never edited or removed once appended; the store guarantees
/// atomic appends so concurrent writers cannot clobber each other's entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEvent {
    /// When the event was recorded.
    pub ts: DateTime<Utc>,
    /// Human-readable description of what happened.
    pub message: String,
    /// Severity category.
    #[serde(rename = "type")]
    pub category: EventCategory,
}

impl TaskEvent {
    /// Creates a new event stamped with the current clock time.
    #[must_use]
    pub fn new(message: impl Into<String>, category: EventCategory, clock: &impl Clock) -> Self {
        Self {
            ts: clock.utc(),
            message: message.into(),
            category,
        }
    }
}
