//! HTTP adapter for the managed agent runtime.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::task::ports::{AgentInvocationError, AgentReply, AgentResult, AgentRuntime};

/// Prompt payload posted to the runtime's invocation endpoint.
#[derive(Debug, Serialize)]
struct InvocationPayload<'a> {
    prompt: &'a str,
}

/// Agent runtime reached over HTTP.
///
/// One invocation is a single `POST` of the prompt to the configured
/// runtime's invocation endpoint; the reply body is decoded directly into an
/// [`AgentReply`]. There is no retry here: any transport failure, non-success
/// status, or undecodable body is a terminal error for the calling task.
#[derive(Debug, Clone)]
pub struct HttpAgentRuntime {
    client: reqwest::Client,
    invoke_url: String,
}

impl HttpAgentRuntime {
    /// Creates a runtime client for the given endpoint and runtime id.
    ///
    /// # Errors
    ///
    /// Returns [`AgentInvocationError::Invocation`] when the underlying HTTP
    /// client cannot be constructed.
    pub fn new(endpoint: &str, runtime_id: &str, timeout: Duration) -> AgentResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AgentInvocationError::invocation)?;
        let invoke_url = format!(
            "{}/runtimes/{}/invocations",
            endpoint.trim_end_matches('/'),
            runtime_id
        );
        Ok(Self { client, invoke_url })
    }
}

#[async_trait]
impl AgentRuntime for HttpAgentRuntime {
    async fn invoke(&self, prompt: &str) -> AgentResult<AgentReply> {
        tracing::debug!(url = %self.invoke_url, "invoking agent runtime");
        let response = self
            .client
            .post(&self.invoke_url)
            .json(&InvocationPayload { prompt })
            .send()
            .await
            .map_err(AgentInvocationError::invocation)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentInvocationError::RuntimeStatus(status.as_u16()));
        }

        response
            .json::<AgentReply>()
            .await
            .map_err(|err| AgentInvocationError::MalformedReply(err.to_string()))
    }
}
