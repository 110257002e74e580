//! Rental domain core
//!
//! Plate validation, vehicles with their status state machine, customers and
//! rental records. Nothing in here performs I/O.

pub mod customer;
pub mod money;
pub mod plate;
pub mod rental;
pub mod vehicle;

#[cfg(test)]
mod plate_proptest;

pub use customer::Customer;
pub use money::Money;
pub use plate::{is_valid_plate, LicensePlate};
pub use rental::{RentalHistory, RentalRecord, TransactionKind};
pub use vehicle::{Vehicle, VehicleKind, VehicleStatus, VehicleType};
