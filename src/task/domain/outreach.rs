//! Vendor outreach records and the email correlation join.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One outreach email sent on the homeowner's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Address the email was sent to.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Email body.
    pub body: String,
    /// When the email was sent.
    pub timestamp: DateTime<Utc>,
}

impl EmailRecord {
    /// Creates an email record stamped with the current clock time.
    #[must_use]
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
            timestamp: clock.utc(),
        }
    }
}

/// A service provider contacted for a task, with the emails sent to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorOutreach {
    /// Directory identifier of the vendor.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact address used for outreach.
    pub email: String,
    /// Service type the vendor offers.
    pub service: String,
    /// City the vendor operates in.
    pub city: String,
    /// Emails sent to this vendor, in send order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<EmailRecord>,
}

/// Attaches to each vendor the subsequence of emails addressed to it.
///
/// This is an order-preserving filter join on the recipient address: each
/// vendor receives every email whose recipient equals its contact address, in
/// the original send order. No deduplication is performed, and vendors that
/// share an address each receive the full matching subsequence.
pub fn attach_vendor_emails(vendors: &mut [VendorOutreach], emails: &[EmailRecord]) {
    for vendor in vendors {
        vendor.emails = emails
            .iter()
            .filter(|email| email.recipient == vendor.email)
            .cloned()
            .collect();
    }
}
