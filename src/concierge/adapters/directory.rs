//! Static vendor directory seeded with demo listings.

use crate::concierge::{domain::VendorListing, ports::VendorDirectory};

/// In-memory vendor directory backed by a fixed listing table.
///
/// Matching is case-insensitive on both keys. Unknown service/city
/// combinations return an empty list.
#[derive(Debug, Clone)]
pub struct StaticVendorDirectory {
    listings: Vec<VendorListing>,
}

impl StaticVendorDirectory {
    /// Creates a directory with the built-in demo listings.
    #[must_use]
    pub fn with_demo_listings() -> Self {
        Self {
            listings: demo_listings(),
        }
    }

    /// Creates a directory from explicit listings.
    #[must_use]
    pub const fn new(listings: Vec<VendorListing>) -> Self {
        Self { listings }
    }
}

impl VendorDirectory for StaticVendorDirectory {
    fn find(&self, service: &str, city: &str) -> Vec<VendorListing> {
        self.listings
            .iter()
            .filter(|listing| {
                listing.service.eq_ignore_ascii_case(service)
                    && listing.city.eq_ignore_ascii_case(city)
            })
            .cloned()
            .collect()
    }
}

fn demo_listings() -> Vec<VendorListing> {
    vec![
        VendorListing::new(
            "vendor_1",
            "Greenline Lawn",
            "quotes+greenline@example.com",
            "landscaping",
            "Charlotte",
        ),
        VendorListing::new(
            "vendor_2",
            "Queen City Turf",
            "quotes+qcturf@example.com",
            "landscaping",
            "Charlotte",
        ),
        VendorListing::new(
            "vendor_3",
            "Uptown Yard",
            "quotes+uptown@example.com",
            "landscaping",
            "Charlotte",
        ),
        VendorListing::new(
            "vendor_4",
            "Capital Landscapes",
            "quotes+capital@example.com",
            "landscaping",
            "Raleigh",
        ),
        VendorListing::new(
            "vendor_5",
            "Triangle Green",
            "quotes+triangle@example.com",
            "landscaping",
            "Raleigh",
        ),
        VendorListing::new(
            "vendor_6",
            "Perfect Paint Co",
            "quotes+perfectpaint@example.com",
            "painting",
            "Charlotte",
        ),
        VendorListing::new(
            "vendor_7",
            "Charlotte Painters",
            "quotes+cltpainters@example.com",
            "painting",
            "Charlotte",
        ),
        VendorListing::new(
            "vendor_8",
            "Sparkle Clean",
            "quotes+sparkle@example.com",
            "cleaning",
            "Charlotte",
        ),
        VendorListing::new(
            "vendor_9",
            "Fresh Home Services",
            "quotes+fresh@example.com",
            "cleaning",
            "Charlotte",
        ),
        VendorListing::new(
            "vendor_10",
            "Fix It Fast",
            "quotes+fixit@example.com",
            "handyman",
            "Charlotte",
        ),
        VendorListing::new(
            "vendor_11",
            "Home Repair Pro",
            "quotes+homerepair@example.com",
            "handyman",
            "Charlotte",
        ),
    ]
}
