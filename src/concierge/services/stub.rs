//! Deterministic in-process agent runtime for local runs and tests.

use async_trait::async_trait;
use minijinja::{Environment, context};
use mockable::Clock;
use std::sync::Arc;

use crate::concierge::{
    domain::{RequestProfile, VendorListing},
    ports::{EmailOutbox, OutreachEmail, VendorDirectory},
};
use crate::task::domain::EmailRecord;
use crate::task::ports::{AgentInvocationError, AgentReply, AgentResult, AgentRuntime};

/// Subject template for vendor outreach emails.
const SUBJECT_TEMPLATE: &str = "Quote request: {{ service }} in {{ city }}";

/// Body template for vendor outreach emails.
const BODY_TEMPLATE: &str = "\
Hello {{ vendor_name }},

A homeowner in {{ city }} is looking for {{ service }} help:

\"{{ description }}\"
{% if budget %}
Their budget is ${{ budget }}.
{% endif %}
Please reply with a quote and your earliest availability.

Majordomo Concierge";

/// Stub concierge implementing the agent runtime port in-process.
///
/// Stands in for the managed runtime during local development and tests:
/// a keyword scan extracts the request profile, the vendor directory is
/// consulted once, and one templated outreach email is composed and handed
/// to the outbox per matched vendor. An unmatched request yields an empty
/// vendor list and zero emails, never a substituted default.
pub struct ConciergeStub<D, O, C>
where
    D: VendorDirectory,
    O: EmailOutbox,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    outbox: Arc<O>,
    clock: Arc<C>,
}

impl<D, O, C> Clone for ConciergeStub<D, O, C>
where
    D: VendorDirectory,
    O: EmailOutbox,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            outbox: Arc::clone(&self.outbox),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<D, O, C> ConciergeStub<D, O, C>
where
    D: VendorDirectory,
    O: EmailOutbox,
    C: Clock + Send + Sync,
{
    /// Creates a new stub concierge.
    #[must_use]
    pub const fn new(directory: Arc<D>, outbox: Arc<O>, clock: Arc<C>) -> Self {
        Self {
            directory,
            outbox,
            clock,
        }
    }

    /// Composes one outreach email for a vendor.
    fn compose(
        &self,
        description: &str,
        profile: &RequestProfile,
        listing: &VendorListing,
    ) -> AgentResult<OutreachEmail> {
        let environment = Environment::new();
        let subject = environment
            .render_str(
                SUBJECT_TEMPLATE,
                context! {
                    service => &listing.service,
                    city => &listing.city,
                },
            )
            .map_err(AgentInvocationError::invocation)?;
        let body = environment
            .render_str(
                BODY_TEMPLATE,
                context! {
                    vendor_name => &listing.name,
                    city => &listing.city,
                    service => &listing.service,
                    description => description,
                    budget => profile.budget_dollars,
                },
            )
            .map_err(AgentInvocationError::invocation)?;

        Ok(OutreachEmail {
            recipient: listing.email.clone(),
            subject,
            body,
        })
    }

    fn summarize(profile: &RequestProfile, vendor_count: usize) -> String {
        match (profile.service.as_deref(), profile.city.as_deref()) {
            (Some(service), Some(city)) if vendor_count > 0 => format!(
                "Outreach sent to {vendor_count} {service} vendors in {city}; \
                 awaiting their replies."
            ),
            (Some(service), Some(city)) => {
                format!("No {service} vendors are listed for {city}; no outreach was sent.")
            }
            _ => "The request did not match a known service and city; no vendors were contacted."
                .to_owned(),
        }
    }
}

#[async_trait]
impl<D, O, C> AgentRuntime for ConciergeStub<D, O, C>
where
    D: VendorDirectory,
    O: EmailOutbox,
    C: Clock + Send + Sync,
{
    async fn invoke(&self, prompt: &str) -> AgentResult<AgentReply> {
        let profile = RequestProfile::extract(prompt);
        let listings = match (profile.service.as_deref(), profile.city.as_deref()) {
            (Some(service), Some(city)) => self.directory.find(service, city),
            _ => Vec::new(),
        };

        let mut emails = Vec::new();
        for listing in &listings {
            let email = self.compose(prompt, &profile, listing)?;
            self.outbox
                .send(&email)
                .map_err(AgentInvocationError::invocation)?;
            emails.push(EmailRecord::new(
                email.recipient,
                email.subject,
                email.body,
                &*self.clock,
            ));
        }

        let response = Self::summarize(&profile, listings.len());
        let emails_sent = u64::try_from(emails.len()).unwrap_or(u64::MAX);
        let vendors = listings
            .into_iter()
            .map(VendorListing::into_outreach)
            .collect();

        Ok(AgentReply {
            response,
            vendors,
            emails,
            emails_sent,
        })
    }
}
