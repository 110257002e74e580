//! Mock storage for registry tests
//!
//! [`MemoryStore`] is both a source and an observer and keeps its state behind
//! a shared lock, so a test can hand one clone to the registry and inspect
//! another. [`FailingObserver`] and [`RecordingObserver`] cover failure paths
//! and event ordering.

use anyhow::{bail, Result};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::{Customer, RentalRecord, Vehicle};
use crate::store::{RegistryObserver, RentalSource};

#[derive(Debug, Default)]
struct MemoryState {
    vehicles: Vec<Vehicle>,
    customers: Vec<Customer>,
    records: Vec<RentalRecord>,
    fail_vehicle_loads: bool,
}

/// In-memory persistence shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn seed_vehicles(&self, vehicles: Vec<Vehicle>) {
        self.state().vehicles = vehicles;
    }

    pub fn seed_customers(&self, customers: Vec<Customer>) {
        self.state().customers = customers;
    }

    pub fn seed_records(&self, records: Vec<RentalRecord>) {
        self.state().records = records;
    }

    /// Makes every later `load_vehicles` call fail.
    pub fn fail_vehicle_loads(&self) {
        self.state().fail_vehicle_loads = true;
    }

    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.state().vehicles.clone()
    }

    pub fn customers(&self) -> Vec<Customer> {
        self.state().customers.clone()
    }

    pub fn records(&self) -> Vec<RentalRecord> {
        self.state().records.clone()
    }
}

impl RentalSource for MemoryStore {
    fn load_vehicles(&self) -> Result<Vec<Vehicle>> {
        let state = self.state();
        if state.fail_vehicle_loads {
            bail!("vehicle storage unavailable");
        }
        Ok(state.vehicles.clone())
    }

    fn load_customers(&self) -> Result<Vec<Customer>> {
        Ok(self.state().customers.clone())
    }

    fn load_rental_records(&self) -> Result<Vec<RentalRecord>> {
        Ok(self.state().records.clone())
    }
}

impl RegistryObserver for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn on_vehicle_changed(&mut self, _vehicle: &Vehicle, fleet: &[Vehicle]) -> Result<()> {
        self.state().vehicles = fleet.to_vec();
        Ok(())
    }

    fn on_customer_added(&mut self, customer: &Customer, _customers: &[Customer]) -> Result<()> {
        self.state().customers.push(customer.clone());
        Ok(())
    }

    fn on_record_appended(&mut self, record: &RentalRecord) -> Result<()> {
        self.state().records.push(record.clone());
        Ok(())
    }
}

/// An observer whose writes fail
#[derive(Debug, Clone, Copy)]
pub struct FailingObserver {
    fail_vehicles: bool,
    fail_customers: bool,
    fail_records: bool,
}

impl FailingObserver {
    /// Fails every event.
    pub fn always() -> Self {
        Self {
            fail_vehicles: true,
            fail_customers: true,
            fail_records: true,
        }
    }

    /// Fails only record appends.
    pub fn on_records() -> Self {
        Self {
            fail_vehicles: false,
            fail_customers: false,
            fail_records: true,
        }
    }
}

impl RegistryObserver for FailingObserver {
    fn name(&self) -> &str {
        "failing"
    }

    fn on_vehicle_changed(&mut self, _vehicle: &Vehicle, _fleet: &[Vehicle]) -> Result<()> {
        if self.fail_vehicles {
            bail!("disk full");
        }
        Ok(())
    }

    fn on_customer_added(&mut self, _customer: &Customer, _customers: &[Customer]) -> Result<()> {
        if self.fail_customers {
            bail!("disk full");
        }
        Ok(())
    }

    fn on_record_appended(&mut self, _record: &RentalRecord) -> Result<()> {
        if self.fail_records {
            bail!("disk full");
        }
        Ok(())
    }
}

/// Records each event as a short line, e.g. `vehicle ABC123 RENTED`
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.events)
    }

    fn push(&self, event: String) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}

impl RegistryObserver for RecordingObserver {
    fn name(&self) -> &str {
        "recording"
    }

    fn on_vehicle_changed(&mut self, vehicle: &Vehicle, _fleet: &[Vehicle]) -> Result<()> {
        let plate = vehicle.plate().map(|p| p.as_str()).unwrap_or("-");
        self.push(format!("vehicle {plate} {}", vehicle.status()));
        Ok(())
    }

    fn on_customer_added(&mut self, customer: &Customer, _customers: &[Customer]) -> Result<()> {
        self.push(format!("customer {}", customer.id()));
        Ok(())
    }

    fn on_record_appended(&mut self, record: &RentalRecord) -> Result<()> {
        self.push(format!(
            "record {} {} {}",
            record.kind(),
            record.plate(),
            record.customer_id()
        ));
        Ok(())
    }
}
