//! Unit tests for the static vendor directory.

use crate::concierge::{adapters::StaticVendorDirectory, ports::VendorDirectory};
use rstest::{fixture, rstest};

#[fixture]
fn directory() -> StaticVendorDirectory {
    StaticVendorDirectory::with_demo_listings()
}

#[rstest]
fn finds_all_vendors_for_a_known_pair(directory: StaticVendorDirectory) {
    let listings = directory.find("landscaping", "charlotte");

    let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["vendor_1", "vendor_2", "vendor_3"]);
}

#[rstest]
fn matching_ignores_case(directory: StaticVendorDirectory) {
    let listings = directory.find("Landscaping", "CHARLOTTE");
    assert_eq!(listings.len(), 3);
}

#[rstest]
#[case("plumbing", "charlotte")]
#[case("landscaping", "durham")]
#[case("cleaning", "raleigh")]
fn misses_return_empty_with_no_substitution(
    directory: StaticVendorDirectory,
    #[case] service: &str,
    #[case] city: &str,
) {
    assert!(directory.find(service, city).is_empty());
}
