//! Port contracts for the task lifecycle.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod agent;
pub mod handoff;
pub mod store;

pub use agent::{AgentInvocationError, AgentReply, AgentResult, AgentRuntime};
pub use handoff::{HandoffError, HandoffMessage, HandoffQueue, HandoffResult};
pub use store::{
    PageToken, StatusUpdate, TaskPage, TaskStore, TaskStoreError, TaskStoreResult,
};
