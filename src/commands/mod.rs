//! Command implementations behind the `rental` CLI.
//!
//! Each command is a small struct built with the verbosity flag and run
//! against an explicitly opened [`RentalRegistry`].

pub mod config;
pub mod customer;
pub mod history;
pub mod rental;
pub mod vehicle;

use chrono::NaiveDate;
use std::path::Path;

use crate::error::{RentalError, Result};
use crate::registry::{PersistencePolicy, RentalRegistry};
use crate::store::{FlatFileStore, TracingObserver};

pub use config::{ConfigSetCommand, ConfigShowCommand};
pub use customer::{CustomerAddCommand, CustomerListCommand};
pub use history::{ExportCommand, HistoryCommand};
pub use rental::{RentCommand, ReturnCommand};
pub use vehicle::{
    VehicleAddCommand, VehicleDraft, VehicleListCommand, VehicleShowCommand, VehicleStatusCommand,
};

/// Opens the flat-file store in `data_dir`, loads a registry from it and
/// attaches the store as the registry's persistence observer.
pub fn open_registry(data_dir: &Path, policy: PersistencePolicy) -> Result<RentalRegistry> {
    let store = FlatFileStore::open(data_dir).map_err(|e| {
        RentalError::persistence("open data directory", Some(data_dir.display().to_string()), e)
    })?;
    tracing::debug!(data_dir = %data_dir.display(), policy = %policy, "Opening registry");

    let mut registry = RentalRegistry::load(&store, policy)?;
    registry.add_observer(Box::new(store));
    registry.add_observer(Box::new(TracingObserver));
    Ok(registry)
}

/// Parses a `YYYY-MM-DD` date. No input means today.
pub fn parse_date(input: Option<&str>) -> Result<NaiveDate> {
    match input {
        None => Ok(chrono::Local::now().date_naive()),
        Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map_err(|_| RentalError::invalid_date(value)),
    }
}
