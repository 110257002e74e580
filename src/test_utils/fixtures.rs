//! Test fixtures for consistent test data

use chrono::NaiveDate;

use crate::core::{Customer, Vehicle};

/// Toyota Camry, five seats, with the given plate
pub fn sample_car(plate: &str) -> Vehicle {
    Vehicle::car("Toyota", "Camry", 2020, 5)
        .with_plate(plate)
        .unwrap_or_else(|e| panic!("fixture plate {plate} is invalid: {e}"))
}

/// Harley-Davidson Sportster without a sidecar
pub fn sample_motorcycle(plate: &str) -> Vehicle {
    Vehicle::motorcycle("Harley-davidson", "Sportster", 2018, false)
        .with_plate(plate)
        .unwrap_or_else(|e| panic!("fixture plate {plate} is invalid: {e}"))
}

/// Volvo FH16 with 20.5 units of cargo capacity
pub fn sample_truck(plate: &str) -> Vehicle {
    Vehicle::truck("Volvo", "Fh16", 2015, 20.5)
        .with_plate(plate)
        .unwrap_or_else(|e| panic!("fixture plate {plate} is invalid: {e}"))
}

pub fn customer(id: &str, name: &str) -> Customer {
    Customer::new(id, name).unwrap_or_else(|e| panic!("fixture customer {id} is invalid: {e}"))
}

/// Customer `C1`, Jane
pub fn jane() -> Customer {
    customer("C1", "Jane")
}

/// Customer `C2`, John
pub fn john() -> Customer {
    customer("C2", "John")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("fixture date {year}-{month}-{day} is invalid"))
}
