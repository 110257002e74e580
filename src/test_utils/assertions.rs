//! Assertion helpers for registry state

use crate::core::{TransactionKind, VehicleStatus};
use crate::registry::RentalRegistry;

/// Asserts that the vehicle with `plate` exists and has `expected` status
pub fn assert_status(registry: &RentalRegistry, plate: &str, expected: VehicleStatus) {
    let vehicle = registry
        .find_vehicle_by_plate(plate)
        .unwrap_or_else(|| panic!("Expected a vehicle with plate {plate}"));
    assert_eq!(
        vehicle.status(),
        expected,
        "Vehicle {plate} has status {}, expected {expected}",
        vehicle.status()
    );
}

/// Asserts the full history as a sequence of transaction kinds
pub fn assert_history_kinds(registry: &RentalRegistry, expected: &[TransactionKind]) {
    let kinds: Vec<TransactionKind> = registry.list_history().iter().map(|r| r.kind()).collect();
    assert_eq!(kinds, expected, "Unexpected rental history");
}

/// Asserts that a string contains all expected substrings
pub fn assert_contains_all(haystack: &str, needles: &[&str]) {
    for needle in needles {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}', but it didn't.\nString: {haystack}"
        );
    }
}
