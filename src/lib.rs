//! Rental Tracker
//!
//! A vehicle rental registry: plate validation, the vehicle status state
//! machine, customers and an append-only rental history, persisted to flat
//! files through an observer seam.

pub mod commands;
pub mod config;
pub mod core;
pub mod display;
pub mod error;
pub mod logging;
pub mod registry;
pub mod store;
pub mod utils;

#[cfg(any(test, debug_assertions))]
pub mod test_utils;

pub use crate::core::{
    is_valid_plate, Customer, LicensePlate, Money, RentalHistory, RentalRecord, TransactionKind,
    Vehicle, VehicleKind, VehicleStatus, VehicleType,
};
pub use error::{ErrorKind, RentalError};
pub use registry::{
    PersistencePolicy, RegistrySnapshot, RentalRegistry, SharedRegistry, VehicleFilter,
};
pub use store::{FlatFileStore, RegistryObserver, RentalSource};
