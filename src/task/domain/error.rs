//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The value is not a well-formed task identifier.
    #[error("invalid task identifier: '{0}'")]
    InvalidTaskId(String),

    /// The requested status change violates the lifecycle state machine.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Identifier of the task being mutated.
        task_id: TaskId,
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status the caller attempted to move to.
        to: TaskStatus,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing event categories from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown event category: {0}")]
pub struct ParseEventCategoryError(pub String);
