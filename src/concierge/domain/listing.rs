//! Vendor directory listings.

use crate::task::domain::VendorOutreach;
use serde::{Deserialize, Serialize};

/// One service provider known to the vendor directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorListing {
    /// Directory identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact address for outreach.
    pub email: String,
    /// Service type offered.
    pub service: String,
    /// City the vendor operates in.
    pub city: String,
}

impl VendorListing {
    /// Creates a new listing.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        service: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            service: service.into(),
            city: city.into(),
        }
    }

    /// Converts the listing into a task outreach record with no emails yet.
    #[must_use]
    pub fn into_outreach(self) -> VendorOutreach {
        VendorOutreach {
            id: self.id,
            name: self.name,
            email: self.email,
            service: self.service,
            city: self.city,
            emails: Vec::new(),
        }
    }
}
