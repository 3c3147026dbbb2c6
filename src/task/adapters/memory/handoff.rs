//! In-process hand-off queue backed by a bounded channel.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::task::ports::{HandoffError, HandoffMessage, HandoffQueue, HandoffResult};

/// Hand-off queue that publishes to a bounded in-process channel.
///
/// Publishing never waits: a full or closed channel is reported back to the
/// caller synchronously, matching the fire-and-forget contract of the port.
#[derive(Debug, Clone)]
pub struct ChannelHandoffQueue {
    sender: mpsc::Sender<HandoffMessage>,
}

impl ChannelHandoffQueue {
    /// Creates a queue with the given capacity and returns the consumer end.
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<HandoffMessage>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl HandoffQueue for ChannelHandoffQueue {
    async fn publish(&self, message: HandoffMessage) -> HandoffResult<()> {
        self.sender.try_send(message).map_err(|err| match err {
            TrySendError::Full(_) => HandoffError::QueueFull,
            TrySendError::Closed(_) => HandoffError::QueueClosed,
        })
    }
}
