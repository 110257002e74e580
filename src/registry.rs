//! The rental registry
//!
//! Owns every vehicle, customer and rental record, enforces key uniqueness and
//! the rent/return status rules, and is the only place domain state changes.
//! After each successful mutation the registered observers are told about it;
//! the [`PersistencePolicy`] decides what a failing observer means.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::core::{
    Customer, LicensePlate, Money, RentalHistory, RentalRecord, TransactionKind, Vehicle,
    VehicleStatus,
};
use crate::error::{RentalError, Result};
use crate::logging;
use crate::store::{RegistryObserver, RentalSource};

/// What happens when storage fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersistencePolicy {
    /// Log the failure and keep the in-memory change.
    #[default]
    BestEffort,
    /// Undo the in-memory change and report the failure.
    Strict,
}

impl fmt::Display for PersistencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistencePolicy::BestEffort => f.write_str("best-effort"),
            PersistencePolicy::Strict => f.write_str("strict"),
        }
    }
}

impl std::str::FromStr for PersistencePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best-effort" | "best_effort" => Ok(PersistencePolicy::BestEffort),
            "strict" => Ok(PersistencePolicy::Strict),
            _ => Err(format!(
                "Unknown persistence policy: {s} (expected best-effort or strict)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VehicleFilter {
    #[default]
    All,
    AvailableOnly,
}

/// A point-in-time copy of everything the registry owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub vehicles: Vec<Vehicle>,
    pub customers: Vec<Customer>,
    pub history: Vec<RentalRecord>,
}

/// A registry shared between threads. Every mutation takes the lock, so a
/// uniqueness check and the insert that follows it cannot interleave.
pub type SharedRegistry = Arc<Mutex<RentalRegistry>>;

pub struct RentalRegistry {
    vehicles: Vec<Vehicle>,
    customers: Vec<Customer>,
    history: RentalHistory,
    observers: Vec<Box<dyn RegistryObserver>>,
    policy: PersistencePolicy,
}

impl RentalRegistry {
    /// An empty registry with no observers.
    pub fn new() -> Self {
        Self {
            vehicles: Vec::new(),
            customers: Vec::new(),
            history: RentalHistory::new(),
            observers: Vec::new(),
            policy: PersistencePolicy::default(),
        }
    }

    /// Rebuilds a registry from stored state.
    ///
    /// Vehicles load first, then customers, then records. Entries with a
    /// duplicate key keep their first occurrence, and records pointing at an
    /// unknown vehicle or customer are dropped.
    pub fn load(source: &dyn RentalSource, policy: PersistencePolicy) -> Result<Self> {
        let mut registry = Self::new().with_policy(policy);

        for vehicle in load_collection(policy, "load vehicles", || source.load_vehicles())? {
            let Some(plate) = vehicle.plate() else {
                logging::log_dropped_on_load("vehicle", "-", "no license plate");
                continue;
            };
            if registry.find_vehicle_by_plate(plate.as_str()).is_some() {
                logging::log_dropped_on_load("vehicle", plate.as_str(), "duplicate plate");
                continue;
            }
            registry.vehicles.push(vehicle);
        }

        for customer in load_collection(policy, "load customers", || source.load_customers())? {
            if registry.find_customer_by_id(customer.id()).is_some() {
                logging::log_dropped_on_load("customer", customer.id(), "duplicate ID");
                continue;
            }
            registry.customers.push(customer);
        }

        for record in load_collection(policy, "load rental records", || {
            source.load_rental_records()
        })? {
            if registry.find_vehicle_by_plate(record.plate().as_str()).is_none() {
                logging::log_dropped_on_load("record", record.plate().as_str(), "unknown vehicle");
                continue;
            }
            if registry.find_customer_by_id(record.customer_id()).is_none() {
                logging::log_dropped_on_load("record", record.customer_id(), "unknown customer");
                continue;
            }
            registry.history.push(record);
        }

        tracing::debug!(
            vehicles = registry.vehicles.len(),
            customers = registry.customers.len(),
            records = registry.history.len(),
            "Registry loaded"
        );
        Ok(registry)
    }

    pub fn with_policy(mut self, policy: PersistencePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_observer(mut self, observer: impl RegistryObserver + 'static) -> Self {
        self.add_observer(Box::new(observer));
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn RegistryObserver>) {
        self.observers.push(observer);
    }

    pub fn policy(&self) -> PersistencePolicy {
        self.policy
    }

    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(Mutex::new(self))
    }

    /// Registers a vehicle. It must carry a plate no other vehicle uses.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<&Vehicle> {
        let plate = vehicle.plate().cloned().ok_or(RentalError::MissingPlate)?;
        vehicle.validate_descriptors()?;

        if self.find_vehicle_by_plate(plate.as_str()).is_some() {
            logging::log_rule_violation("add vehicle", plate.as_str(), "plate already registered");
            return Err(RentalError::duplicate_vehicle(plate.as_str()));
        }

        self.vehicles.push(vehicle);
        let index = self.vehicles.len() - 1;
        if let Err(error) = self.notify_vehicle_changed(index, self.policy, "save vehicle") {
            if let Some(removed) = self.vehicles.pop() {
                self.restore_fleet(&removed);
            }
            return Err(error);
        }

        logging::log_registered("vehicle", plate.as_str());
        Ok(&self.vehicles[index])
    }

    /// Registers a customer under an ID no other customer uses.
    pub fn add_customer(&mut self, customer: Customer) -> Result<&Customer> {
        if self.find_customer_by_id(customer.id()).is_some() {
            logging::log_rule_violation("add customer", customer.id(), "ID already registered");
            return Err(RentalError::duplicate_customer(customer.id()));
        }

        self.customers.push(customer);
        let index = self.customers.len() - 1;
        let customers = &self.customers;
        if let Err(error) = dispatch(&mut self.observers, self.policy, "save customer", |o| {
            o.on_customer_added(&customers[index], customers)
        }) {
            self.customers.pop();
            return Err(error);
        }

        logging::log_registered("customer", self.customers[index].id());
        Ok(&self.customers[index])
    }

    /// Rents an available vehicle to a registered customer.
    pub fn rent_vehicle(
        &mut self,
        plate: &str,
        customer_id: &str,
        date: NaiveDate,
        amount: Money,
    ) -> Result<&RentalRecord> {
        self.transact(TransactionKind::Rent, plate, customer_id, date, amount)
    }

    /// Takes back a rented vehicle. `extra_fees` becomes the record amount.
    pub fn return_vehicle(
        &mut self,
        plate: &str,
        customer_id: &str,
        date: NaiveDate,
        extra_fees: Money,
    ) -> Result<&RentalRecord> {
        self.transact(TransactionKind::Return, plate, customer_id, date, extra_fees)
    }

    /// Administrative status change outside the rent/return flow, e.g. sending
    /// a vehicle to maintenance. RENTED can be neither the source nor the target.
    pub fn set_vehicle_status(&mut self, plate: &str, status: VehicleStatus) -> Result<&Vehicle> {
        let index = self
            .vehicle_index(plate)
            .ok_or_else(|| self.not_found("set status", plate))?;
        let current = self.vehicles[index].status();

        if current == VehicleStatus::Rented || status == VehicleStatus::Rented {
            logging::log_rule_violation(
                "set status",
                plate,
                &format!("cannot move from {current} to {status}"),
            );
            return Err(RentalError::StatusOverrideRejected {
                plate: self.registered_plate(index)?.to_string(),
                from: current,
                to: status,
            });
        }
        if current == status {
            return Ok(&self.vehicles[index]);
        }

        self.vehicles[index].set_status(status);
        if let Err(error) = self.notify_vehicle_changed(index, self.policy, "save vehicle") {
            self.vehicles[index].set_status(current);
            let _ = self.notify_vehicle_changed(
                index,
                PersistencePolicy::BestEffort,
                "restore vehicle",
            );
            return Err(error);
        }

        tracing::info!(plate = plate, from = %current, to = %status, "Vehicle status changed");
        Ok(&self.vehicles[index])
    }

    /// Case-insensitive plate lookup.
    pub fn find_vehicle_by_plate(&self, plate: &str) -> Option<&Vehicle> {
        self.vehicle_index(plate).map(|index| &self.vehicles[index])
    }

    /// Exact customer ID lookup.
    pub fn find_customer_by_id(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id() == id)
    }

    pub fn list_vehicles(&self, filter: VehicleFilter) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| match filter {
                VehicleFilter::All => true,
                VehicleFilter::AvailableOnly => v.is_available(),
            })
            .collect()
    }

    pub fn list_customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn list_history(&self) -> &[RentalRecord] {
        self.history.records()
    }

    pub fn history(&self) -> &RentalHistory {
        &self.history
    }

    pub fn history_for_vehicle(&self, plate: &str) -> Vec<&RentalRecord> {
        self.history
            .records()
            .iter()
            .filter(|r| r.plate().matches(plate))
            .collect()
    }

    pub fn history_for_customer(&self, customer_id: &str) -> Vec<&RentalRecord> {
        self.history
            .records()
            .iter()
            .filter(|r| r.customer_id() == customer_id)
            .collect()
    }

    /// The customer holding a rented vehicle, taken from its latest record.
    pub fn current_renter(&self, plate: &str) -> Option<&Customer> {
        let vehicle = self.find_vehicle_by_plate(plate)?;
        if vehicle.status() != VehicleStatus::Rented {
            return None;
        }
        let last = self.history.for_vehicle(plate).last()?;
        if last.kind() != TransactionKind::Rent {
            return None;
        }
        self.find_customer_by_id(last.customer_id())
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            vehicles: self.vehicles.clone(),
            customers: self.customers.clone(),
            history: self.history.records().to_vec(),
        }
    }

    fn transact(
        &mut self,
        kind: TransactionKind,
        plate: &str,
        customer_id: &str,
        date: NaiveDate,
        amount: Money,
    ) -> Result<&RentalRecord> {
        let operation = match kind {
            TransactionKind::Rent => "rent vehicle",
            TransactionKind::Return => "return vehicle",
        };

        let index = self
            .vehicle_index(plate)
            .ok_or_else(|| self.not_found(operation, plate))?;
        let customer_id = match self.find_customer_by_id(customer_id) {
            Some(customer) => customer.id().to_string(),
            None => {
                logging::log_rule_violation(operation, customer_id, "unknown customer");
                return Err(RentalError::customer_not_found(customer_id));
            }
        };

        let registered_plate = self.registered_plate(index)?;
        let current = self.vehicles[index].status();
        let Some(next) = current.after(kind) else {
            logging::log_rule_violation(
                operation,
                registered_plate.as_str(),
                &format!("vehicle is {current}"),
            );
            let plate = registered_plate.to_string();
            return Err(match kind {
                TransactionKind::Rent => RentalError::VehicleNotAvailable {
                    plate,
                    status: current,
                },
                TransactionKind::Return => RentalError::VehicleNotRented {
                    plate,
                    status: current,
                },
            });
        };

        self.vehicles[index].set_status(next);
        self.history.push(RentalRecord::new(
            registered_plate.clone(),
            customer_id.as_str(),
            date,
            amount,
            kind,
        ));

        if let Err(error) = self.persist_transaction(index) {
            self.vehicles[index].set_status(current);
            self.history.pop();
            let _ = self.notify_vehicle_changed(
                index,
                PersistencePolicy::BestEffort,
                "restore vehicle",
            );
            return Err(error);
        }

        logging::log_transaction(
            kind.as_str(),
            registered_plate.as_str(),
            &customer_id,
            &amount.to_string(),
        );
        Ok(&self.history.records()[self.history.len() - 1])
    }

    fn persist_transaction(&mut self, index: usize) -> Result<()> {
        self.notify_vehicle_changed(index, self.policy, "save vehicle")?;
        let records = self.history.records();
        let record = &records[records.len() - 1];
        dispatch(&mut self.observers, self.policy, "save rental record", |o| {
            o.on_record_appended(record)
        })
    }

    fn notify_vehicle_changed(
        &mut self,
        index: usize,
        policy: PersistencePolicy,
        operation: &str,
    ) -> Result<()> {
        let vehicles = &self.vehicles;
        dispatch(&mut self.observers, policy, operation, |o| {
            o.on_vehicle_changed(&vehicles[index], vehicles)
        })
    }

    /// Brings observers back in line after a vehicle was removed again.
    fn restore_fleet(&mut self, removed: &Vehicle) {
        let vehicles = &self.vehicles;
        let _ = dispatch(
            &mut self.observers,
            PersistencePolicy::BestEffort,
            "restore vehicles",
            |o| o.on_vehicle_changed(removed, vehicles),
        );
    }

    fn vehicle_index(&self, plate: &str) -> Option<usize> {
        self.vehicles
            .iter()
            .position(|v| v.plate().is_some_and(|p| p.matches(plate)))
    }

    fn registered_plate(&self, index: usize) -> Result<LicensePlate> {
        self.vehicles[index]
            .plate()
            .cloned()
            .ok_or(RentalError::MissingPlate)
    }

    fn not_found(&self, operation: &str, plate: &str) -> RentalError {
        logging::log_rule_violation(operation, plate, "unknown vehicle");
        RentalError::vehicle_not_found(plate)
    }
}

impl Default for RentalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RentalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let observers: Vec<&str> = self.observers.iter().map(|o| o.name()).collect();
        f.debug_struct("RentalRegistry")
            .field("vehicles", &self.vehicles.len())
            .field("customers", &self.customers.len())
            .field("records", &self.history.len())
            .field("observers", &observers)
            .field("policy", &self.policy)
            .finish()
    }
}

fn load_collection<T>(
    policy: PersistencePolicy,
    operation: &str,
    load: impl FnOnce() -> anyhow::Result<Vec<T>>,
) -> Result<Vec<T>> {
    match load() {
        Ok(items) => Ok(items),
        Err(error) => {
            logging::log_persistence_failure(operation, "source", &error);
            match policy {
                PersistencePolicy::Strict => Err(RentalError::persistence(operation, None, error)),
                PersistencePolicy::BestEffort => Ok(Vec::new()),
            }
        }
    }
}

/// Sends one event to every observer. Under the strict policy the first
/// failure stops the dispatch and is returned.
fn dispatch(
    observers: &mut [Box<dyn RegistryObserver>],
    policy: PersistencePolicy,
    operation: &str,
    mut notify: impl FnMut(&mut dyn RegistryObserver) -> anyhow::Result<()>,
) -> Result<()> {
    for observer in observers.iter_mut() {
        if let Err(error) = notify(observer.as_mut()) {
            logging::log_persistence_failure(operation, observer.name(), &error);
            if policy == PersistencePolicy::Strict {
                return Err(RentalError::persistence(
                    format!("{operation} ({})", observer.name()),
                    None,
                    error,
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_utils::fixtures::{date, jane, sample_car};
    use crate::test_utils::mocks::{FailingObserver, MemoryStore, RecordingObserver};

    fn registry_with_jane_and_car() -> RentalRegistry {
        let mut registry = RentalRegistry::new();
        registry.add_vehicle(sample_car("ABC123")).unwrap();
        registry.add_customer(jane()).unwrap();
        registry
    }

    #[test]
    fn test_add_vehicle_requires_plate() {
        let mut registry = RentalRegistry::new();
        let err = registry
            .add_vehicle(Vehicle::car("Toyota", "Camry", 2020, 5))
            .unwrap_err();
        assert!(matches!(err, RentalError::MissingPlate));
        assert!(registry.list_vehicles(VehicleFilter::All).is_empty());
    }

    #[test]
    fn test_duplicate_plate_is_case_insensitive() {
        let mut registry = RentalRegistry::new();
        registry.add_vehicle(sample_car("abc123")).unwrap();

        let err = registry.add_vehicle(sample_car("ABC123")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BusinessRule);
        assert!(matches!(err, RentalError::DuplicateVehicle { .. }));
        assert_eq!(registry.list_vehicles(VehicleFilter::All).len(), 1);
    }

    #[test]
    fn test_add_vehicle_rejects_comma_in_model() {
        let mut registry = RentalRegistry::new();
        let vehicle = Vehicle::car("Toyota", "Camry, le", 2020, 5)
            .with_plate("ABC123")
            .unwrap();
        let err = registry.add_vehicle(vehicle).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_duplicate_customer() {
        let mut registry = RentalRegistry::new();
        registry.add_customer(jane()).unwrap();
        let err = registry
            .add_customer(Customer::new("C1", "Someone Else").unwrap())
            .unwrap_err();
        assert!(matches!(err, RentalError::DuplicateCustomer { .. }));
        assert_eq!(registry.list_customers().len(), 1);
        assert_eq!(registry.list_customers()[0].name(), "Jane");
    }

    #[test]
    fn test_rent_and_return_cycle() {
        let mut registry = registry_with_jane_and_car();

        let record = registry
            .rent_vehicle("abc123", "C1", date(2024, 1, 1), Money::from_cents(10000))
            .unwrap();
        assert_eq!(record.kind(), TransactionKind::Rent);
        assert_eq!(record.plate().as_str(), "ABC123");
        assert_eq!(
            registry.find_vehicle_by_plate("ABC123").unwrap().status(),
            VehicleStatus::Rented
        );

        let err = registry
            .rent_vehicle("ABC123", "C1", date(2024, 1, 2), Money::from_cents(10000))
            .unwrap_err();
        assert!(matches!(
            err,
            RentalError::VehicleNotAvailable {
                status: VehicleStatus::Rented,
                ..
            }
        ));
        assert_eq!(registry.list_history().len(), 1);

        let record = registry
            .return_vehicle("ABC123", "C1", date(2024, 1, 5), Money::from_cents(1550))
            .unwrap();
        assert_eq!(record.kind(), TransactionKind::Return);
        assert_eq!(record.amount().to_string(), "15.50");
        assert_eq!(
            registry.find_vehicle_by_plate("ABC123").unwrap().status(),
            VehicleStatus::Available
        );

        let err = registry
            .return_vehicle("ABC123", "C1", date(2024, 1, 6), Money::ZERO)
            .unwrap_err();
        assert!(matches!(err, RentalError::VehicleNotRented { .. }));
        assert_eq!(registry.list_history().len(), 2);
    }

    #[test]
    fn test_rent_unknown_vehicle_or_customer() {
        let mut registry = registry_with_jane_and_car();
        let err = registry
            .rent_vehicle("ZZZ999", "C1", date(2024, 1, 1), Money::ZERO)
            .unwrap_err();
        assert!(matches!(err, RentalError::VehicleNotFound { .. }));

        let err = registry
            .rent_vehicle("ABC123", "C9", date(2024, 1, 1), Money::ZERO)
            .unwrap_err();
        assert!(matches!(err, RentalError::CustomerNotFound { .. }));
        assert_eq!(
            registry.find_vehicle_by_plate("ABC123").unwrap().status(),
            VehicleStatus::Available
        );
        assert!(registry.list_history().is_empty());
    }

    #[test]
    fn test_vehicle_in_maintenance_cannot_be_rented() {
        let mut registry = registry_with_jane_and_car();
        registry
            .set_vehicle_status("ABC123", VehicleStatus::Maintenance)
            .unwrap();

        let err = registry
            .rent_vehicle("ABC123", "C1", date(2024, 1, 1), Money::ZERO)
            .unwrap_err();
        assert!(matches!(
            err,
            RentalError::VehicleNotAvailable {
                status: VehicleStatus::Maintenance,
                ..
            }
        ));
        assert!(registry.list_vehicles(VehicleFilter::AvailableOnly).is_empty());
    }

    #[test]
    fn test_status_override_rules() {
        let mut registry = registry_with_jane_and_car();

        let err = registry
            .set_vehicle_status("ABC123", VehicleStatus::Rented)
            .unwrap_err();
        assert!(matches!(err, RentalError::StatusOverrideRejected { .. }));

        registry
            .rent_vehicle("ABC123", "C1", date(2024, 1, 1), Money::ZERO)
            .unwrap();
        let err = registry
            .set_vehicle_status("ABC123", VehicleStatus::Available)
            .unwrap_err();
        assert!(matches!(
            err,
            RentalError::StatusOverrideRejected {
                from: VehicleStatus::Rented,
                ..
            }
        ));
    }

    #[test]
    fn test_list_vehicles_filter() {
        let mut registry = registry_with_jane_and_car();
        registry.add_vehicle(sample_car("XYZ789")).unwrap();
        registry
            .rent_vehicle("ABC123", "C1", date(2024, 1, 1), Money::ZERO)
            .unwrap();

        assert_eq!(registry.list_vehicles(VehicleFilter::All).len(), 2);
        let available = registry.list_vehicles(VehicleFilter::AvailableOnly);
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].plate().unwrap().as_str(), "XYZ789");
    }

    #[test]
    fn test_current_renter() {
        let mut registry = registry_with_jane_and_car();
        assert!(registry.current_renter("ABC123").is_none());

        registry
            .rent_vehicle("ABC123", "C1", date(2024, 1, 1), Money::ZERO)
            .unwrap();
        assert_eq!(registry.current_renter("abc123").unwrap().id(), "C1");

        registry
            .return_vehicle("ABC123", "C1", date(2024, 1, 2), Money::ZERO)
            .unwrap();
        assert!(registry.current_renter("ABC123").is_none());
    }

    #[test]
    fn test_observers_receive_events_in_order() {
        let recorder = RecordingObserver::default();
        let events = recorder.events();
        let mut registry = RentalRegistry::new().with_observer(recorder);

        registry.add_vehicle(sample_car("ABC123")).unwrap();
        registry.add_customer(jane()).unwrap();
        registry
            .rent_vehicle("ABC123", "C1", date(2024, 1, 1), Money::ZERO)
            .unwrap();
        // Refused operations produce no events.
        let _ = registry.rent_vehicle("ABC123", "C1", date(2024, 1, 1), Money::ZERO);

        let events = events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                "vehicle ABC123 AVAILABLE".to_string(),
                "customer C1".to_string(),
                "vehicle ABC123 RENTED".to_string(),
                "record RENT ABC123 C1".to_string(),
            ]
        );
    }

    #[test]
    fn test_best_effort_keeps_change_on_storage_failure() {
        let mut registry = RentalRegistry::new().with_observer(FailingObserver::always());
        registry.add_vehicle(sample_car("ABC123")).unwrap();
        registry.add_customer(jane()).unwrap();
        registry
            .rent_vehicle("ABC123", "C1", date(2024, 1, 1), Money::ZERO)
            .unwrap();
        assert_eq!(registry.list_history().len(), 1);
    }

    #[test]
    fn test_strict_rolls_back_on_storage_failure() {
        let mut registry = RentalRegistry::new()
            .with_policy(PersistencePolicy::Strict)
            .with_observer(FailingObserver::always());

        let err = registry.add_vehicle(sample_car("ABC123")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert!(registry.find_vehicle_by_plate("ABC123").is_none());

        let err = registry.add_customer(jane()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert!(registry.list_customers().is_empty());
    }

    #[test]
    fn test_strict_rolls_back_failed_record_append() {
        let mut registry = RentalRegistry::new()
            .with_policy(PersistencePolicy::Strict)
            .with_observer(FailingObserver::on_records());
        registry.add_vehicle(sample_car("ABC123")).unwrap();
        registry.add_customer(jane()).unwrap();

        let err = registry
            .rent_vehicle("ABC123", "C1", date(2024, 1, 1), Money::ZERO)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert_eq!(
            registry.find_vehicle_by_plate("ABC123").unwrap().status(),
            VehicleStatus::Available
        );
        assert!(registry.list_history().is_empty());
    }

    #[test]
    fn test_load_drops_duplicates_and_dangling_records() {
        let store = MemoryStore::new();
        store.seed_vehicles(vec![sample_car("ABC123"), sample_car("abc123")]);
        store.seed_customers(vec![jane(), Customer::new("C1", "Other").unwrap()]);
        store.seed_records(vec![
            RentalRecord::new(
                LicensePlate::parse("ABC123").unwrap(),
                "C1",
                date(2024, 1, 1),
                Money::ZERO,
                TransactionKind::Rent,
            ),
            RentalRecord::new(
                LicensePlate::parse("QQQ111").unwrap(),
                "C1",
                date(2024, 1, 1),
                Money::ZERO,
                TransactionKind::Rent,
            ),
            RentalRecord::new(
                LicensePlate::parse("ABC123").unwrap(),
                "C7",
                date(2024, 1, 1),
                Money::ZERO,
                TransactionKind::Rent,
            ),
        ]);

        let registry = RentalRegistry::load(&store, PersistencePolicy::BestEffort).unwrap();
        assert_eq!(registry.list_vehicles(VehicleFilter::All).len(), 1);
        assert_eq!(registry.list_customers().len(), 1);
        assert_eq!(registry.list_customers()[0].name(), "Jane");
        assert_eq!(registry.list_history().len(), 1);
    }

    #[test]
    fn test_load_failure_follows_policy() {
        let store = MemoryStore::new();
        store.seed_customers(vec![jane()]);
        store.fail_vehicle_loads();

        let registry = RentalRegistry::load(&store, PersistencePolicy::BestEffort).unwrap();
        assert!(registry.list_vehicles(VehicleFilter::All).is_empty());
        assert_eq!(registry.list_customers().len(), 1);

        let err = RentalRegistry::load(&store, PersistencePolicy::Strict).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Persistence);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut registry = registry_with_jane_and_car();
        registry
            .rent_vehicle("ABC123", "C1", date(2024, 1, 1), Money::from_cents(10000))
            .unwrap();

        let json = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(json["vehicles"][0]["plate"], "ABC123");
        assert_eq!(json["vehicles"][0]["status"], "RENTED");
        assert_eq!(json["customers"][0]["id"], "C1");
        assert_eq!(json["history"][0]["amount"], "100.00");
        assert_eq!(json["history"][0]["kind"], "RENT");
        assert_eq!(json["history"][0]["date"], "2024-01-01");
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "strict".parse::<PersistencePolicy>().unwrap(),
            PersistencePolicy::Strict
        );
        assert_eq!(
            "Best-Effort".parse::<PersistencePolicy>().unwrap(),
            PersistencePolicy::BestEffort
        );
        assert!("paranoid".parse::<PersistencePolicy>().is_err());
        assert_eq!(PersistencePolicy::Strict.to_string(), "strict");
    }

    #[test]
    fn test_debug_lists_observers() {
        let registry = RentalRegistry::new().with_observer(RecordingObserver::default());
        let debug = format!("{registry:?}");
        assert!(debug.contains("recording"));
    }
}
