//! Vendor directory port.

use crate::concierge::domain::VendorListing;

/// Lookup of service providers by service type and city.
pub trait VendorDirectory: Send + Sync {
    /// Returns the vendors matching the given service type and city.
    ///
    /// Misses return an empty list. No fallback city and no default vendor
    /// set is ever substituted for an unknown combination.
    fn find(&self, service: &str, city: &str) -> Vec<VendorListing>;
}
