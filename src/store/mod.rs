//! Persistence seams for the rental registry
//!
//! The registry reads its initial state from a [`RentalSource`] and reports
//! every successful mutation to its [`RegistryObserver`]s. Storage format and
//! write strategy live entirely behind these two traits.

pub mod codec;
pub mod flat_file;

use anyhow::Result;

use crate::core::{Customer, RentalRecord, Vehicle};

pub use flat_file::FlatFileStore;

/// Loads persisted state. Called once when a registry is built, vehicles and
/// customers first since records refer to them by key.
pub trait RentalSource {
    fn load_vehicles(&self) -> Result<Vec<Vehicle>>;

    fn load_customers(&self) -> Result<Vec<Customer>>;

    fn load_rental_records(&self) -> Result<Vec<RentalRecord>>;
}

/// Receives change events after each successful registry mutation.
///
/// Each event carries the full collection alongside the changed item so an
/// implementation can choose between appending and rewriting.
pub trait RegistryObserver: Send {
    fn name(&self) -> &str;

    fn on_vehicle_changed(&mut self, vehicle: &Vehicle, fleet: &[Vehicle]) -> Result<()>;

    fn on_customer_added(&mut self, customer: &Customer, customers: &[Customer]) -> Result<()>;

    fn on_record_appended(&mut self, record: &RentalRecord) -> Result<()>;
}

/// Emits a structured log line for every change event.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl RegistryObserver for TracingObserver {
    fn name(&self) -> &str {
        "tracing"
    }

    fn on_vehicle_changed(&mut self, vehicle: &Vehicle, fleet: &[Vehicle]) -> Result<()> {
        tracing::debug!(
            plate = vehicle.plate().map(|p| p.as_str()),
            status = %vehicle.status(),
            fleet_size = fleet.len(),
            "Vehicle changed"
        );
        Ok(())
    }

    fn on_customer_added(&mut self, customer: &Customer, customers: &[Customer]) -> Result<()> {
        tracing::debug!(
            customer_id = customer.id(),
            customers = customers.len(),
            "Customer added"
        );
        Ok(())
    }

    fn on_record_appended(&mut self, record: &RentalRecord) -> Result<()> {
        tracing::debug!(
            plate = record.plate().as_str(),
            customer_id = record.customer_id(),
            kind = %record.kind(),
            amount = %record.amount(),
            "Rental record appended"
        );
        Ok(())
    }
}
