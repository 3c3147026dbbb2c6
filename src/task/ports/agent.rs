//! Agent runtime port.
//!
//! The agent collaborator is an external managed system that interprets the
//! homeowner's request, selects vendors, and performs outreach. This port
//! covers only the invocation contract: one prompt in, one whole-turn reply
//! out. There is no internal retry; any failure is terminal for the task.

use crate::task::domain::{EmailRecord, VendorOutreach};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for agent invocations.
pub type AgentResult<T> = Result<T, AgentInvocationError>;

/// Whole-turn reply from the agent runtime.
///
/// Every field is optional on the wire; a reply with no vendors and no
/// emails is a legitimate successful outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentReply {
    /// Free-text summary of what the agent did.
    #[serde(default)]
    pub response: String,
    /// Vendors the agent selected for outreach.
    #[serde(default)]
    pub vendors: Vec<VendorOutreach>,
    /// Outreach emails the agent sent, in send order.
    #[serde(default)]
    pub emails: Vec<EmailRecord>,
    /// Number of outreach emails sent.
    #[serde(default)]
    pub emails_sent: u64,
}

/// Agent invocation contract.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Drives one agent turn for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns [`AgentInvocationError`] when the invocation fails for any
    /// reason: transport, non-success runtime status, or a reply the caller
    /// cannot decode.
    async fn invoke(&self, prompt: &str) -> AgentResult<AgentReply>;
}

/// Errors returned by agent runtime adapters.
#[derive(Debug, Clone, Error)]
pub enum AgentInvocationError {
    /// The runtime answered with a non-success status.
    #[error("agent runtime returned status {0}")]
    RuntimeStatus(u16),

    /// The reply payload could not be decoded.
    #[error("agent reply could not be decoded: {0}")]
    MalformedReply(String),

    /// The invocation itself failed (transport, timeout, adapter fault).
    #[error("agent invocation failed: {0}")]
    Invocation(Arc<dyn std::error::Error + Send + Sync>),
}

impl AgentInvocationError {
    /// Wraps an invocation failure.
    pub fn invocation(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Invocation(Arc::new(err))
    }
}
