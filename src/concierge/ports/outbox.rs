//! Outbound email port.

use thiserror::Error;

/// A composed outreach email awaiting delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutreachEmail {
    /// Vendor contact address.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Email body.
    pub body: String,
}

/// Result type for outbox operations.
pub type OutboxResult<T> = Result<T, OutboxError>;

/// Delivery side of vendor outreach.
pub trait EmailOutbox: Send + Sync {
    /// Hands one email to the delivery channel.
    ///
    /// # Errors
    ///
    /// Returns [`OutboxError::Delivery`] when the channel rejects the email.
    fn send(&self, email: &OutreachEmail) -> OutboxResult<()>;
}

/// Errors returned by outbox implementations.
#[derive(Debug, Clone, Error)]
pub enum OutboxError {
    /// The delivery channel rejected the email.
    #[error("email delivery failed: {0}")]
    Delivery(String),
}
