//! Consumer loop draining the in-process hand-off channel.

use mockable::Clock;
use tokio::sync::mpsc;

use super::{ProcessOutcome, ProcessingService};
use crate::task::ports::{AgentRuntime, HandoffMessage, TaskStore};

/// Worker that drains hand-off messages into the processing service.
///
/// Runs until the publishing side of the channel is dropped. Each message is
/// handled independently; a failed task never stops the loop.
pub struct ProcessingWorker<S, A, C>
where
    S: TaskStore,
    A: AgentRuntime,
    C: Clock + Send + Sync,
{
    service: ProcessingService<S, A, C>,
    receiver: mpsc::Receiver<HandoffMessage>,
}

impl<S, A, C> ProcessingWorker<S, A, C>
where
    S: TaskStore,
    A: AgentRuntime,
    C: Clock + Send + Sync,
{
    /// Creates a worker over the consumer end of a hand-off channel.
    #[must_use]
    pub const fn new(
        service: ProcessingService<S, A, C>,
        receiver: mpsc::Receiver<HandoffMessage>,
    ) -> Self {
        Self { service, receiver }
    }

    /// Consumes hand-off messages until the channel closes.
    pub async fn run(mut self) {
        while let Some(message) = self.receiver.recv().await {
            let task_id = message.task_id;
            match self.service.process(&message).await {
                Ok(ProcessOutcome::Completed(_)) => {
                    tracing::info!(%task_id, "task processing completed");
                }
                Ok(ProcessOutcome::AlreadyHandled(status)) => {
                    tracing::info!(%task_id, %status, "redelivered hand-off ignored");
                }
                Err(err) => {
                    tracing::error!(%task_id, error = %err, "task processing failed");
                }
            }
        }
    }
}
