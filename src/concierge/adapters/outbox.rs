//! Log-only email delivery.

use crate::concierge::ports::{EmailOutbox, OutboxResult, OutreachEmail};

/// Outbox that records emails as structured log events without sending.
///
/// Real delivery is owned by an external channel; this adapter keeps the
/// composed emails observable in local and test runs.
#[derive(Debug, Clone, Default)]
pub struct TracingEmailOutbox;

impl TracingEmailOutbox {
    /// Creates a log-only outbox.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EmailOutbox for TracingEmailOutbox {
    fn send(&self, email: &OutreachEmail) -> OutboxResult<()> {
        tracing::info!(
            recipient = %email.recipient,
            subject = %email.subject,
            "outreach email recorded (log-only delivery)"
        );
        Ok(())
    }
}
