//! Hand-off port between intake and processing.
//!
//! Intake publishes one hand-off message per created task and observes only
//! whether the publish itself succeeded; it never waits for processing. The
//! consumer side is idempotent, guarded by task id, so transports with
//! at-least-once delivery are safe.

use crate::task::domain::TaskId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for hand-off operations.
pub type HandoffResult<T> = Result<T, HandoffError>;

/// Message carried from intake to the processing side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffMessage {
    /// Identifier of the task to process.
    pub task_id: TaskId,
    /// The client's request description.
    pub description: String,
}

impl HandoffMessage {
    /// Creates a new hand-off message.
    #[must_use]
    pub fn new(task_id: TaskId, description: impl Into<String>) -> Self {
        Self {
            task_id,
            description: description.into(),
        }
    }
}

/// Publish side of the hand-off channel.
#[async_trait]
pub trait HandoffQueue: Send + Sync {
    /// Publishes one hand-off message, fire-and-forget.
    ///
    /// A successful return means only that the transport accepted the
    /// message; it says nothing about eventual processing.
    ///
    /// # Errors
    ///
    /// Returns [`HandoffError`] when the transport rejects the message
    /// synchronously.
    async fn publish(&self, message: HandoffMessage) -> HandoffResult<()>;
}

/// Errors returned by hand-off queue implementations.
#[derive(Debug, Clone, Error)]
pub enum HandoffError {
    /// The queue rejected the message because it is at capacity.
    #[error("hand-off queue is full")]
    QueueFull,

    /// The consumer side has gone away.
    #[error("hand-off queue is closed")]
    QueueClosed,

    /// Transport-specific dispatch failure.
    #[error("hand-off dispatch failed: {0}")]
    Dispatch(Arc<dyn std::error::Error + Send + Sync>),
}

impl HandoffError {
    /// Wraps a transport dispatch failure.
    pub fn dispatch(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Dispatch(Arc::new(err))
    }
}
