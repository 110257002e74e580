//! Flat text file storage
//!
//! Three files in one data directory. The vehicle file is rewritten as a whole
//! on every vehicle change because rent and return update a status in place;
//! customers and rental records only ever grow and are appended to.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::codec;
use super::{RegistryObserver, RentalSource};
use crate::core::{Customer, RentalRecord, Vehicle};
use crate::logging;
use crate::utils::secure_file;

pub const VEHICLES_FILE: &str = "vehicles.txt";
pub const CUSTOMERS_FILE: &str = "customers.txt";
pub const RECORDS_FILE: &str = "rental_records.txt";

#[derive(Debug, Clone)]
pub struct FlatFileStore {
    data_dir: PathBuf,
}

impl FlatFileStore {
    /// Opens the store, creating the data directory if needed.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create data directory {}", data_dir.display())
        })?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn vehicles_path(&self) -> PathBuf {
        self.data_dir.join(VEHICLES_FILE)
    }

    pub fn customers_path(&self) -> PathBuf {
        self.data_dir.join(CUSTOMERS_FILE)
    }

    pub fn records_path(&self) -> PathBuf {
        self.data_dir.join(RECORDS_FILE)
    }

    fn rewrite_vehicles(&self, fleet: &[Vehicle]) -> Result<()> {
        let mut contents = String::new();
        for vehicle in fleet {
            let line = codec::encode_vehicle(vehicle)
                .map_err(|reason| anyhow::anyhow!("Cannot store vehicle: {reason}"))?;
            contents.push_str(&line);
            contents.push('\n');
        }
        secure_file::write_secure(&self.vehicles_path(), contents.as_bytes())
    }
}

/// Reads `path` line by line, decoding each non-blank line. Lines that fail
/// to decode are logged and skipped. A missing file reads as empty.
fn load_lines<T>(path: &Path, decode: impl Fn(&str) -> Result<T, String>) -> Result<Vec<T>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Data file not found, starting empty");
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut items = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match decode(line) {
            Ok(item) => items.push(item),
            Err(reason) => logging::log_skipped_line(path, index + 1, &reason),
        }
    }
    Ok(items)
}

impl RentalSource for FlatFileStore {
    fn load_vehicles(&self) -> Result<Vec<Vehicle>> {
        load_lines(&self.vehicles_path(), codec::decode_vehicle)
    }

    fn load_customers(&self) -> Result<Vec<Customer>> {
        load_lines(&self.customers_path(), codec::decode_customer)
    }

    fn load_rental_records(&self) -> Result<Vec<RentalRecord>> {
        load_lines(&self.records_path(), codec::decode_record)
    }
}

impl RegistryObserver for FlatFileStore {
    fn name(&self) -> &str {
        "flat-file"
    }

    fn on_vehicle_changed(&mut self, _vehicle: &Vehicle, fleet: &[Vehicle]) -> Result<()> {
        self.rewrite_vehicles(fleet)
    }

    fn on_customer_added(&mut self, customer: &Customer, _customers: &[Customer]) -> Result<()> {
        secure_file::append_line_secure(&self.customers_path(), &codec::encode_customer(customer))
    }

    fn on_record_appended(&mut self, record: &RentalRecord) -> Result<()> {
        secure_file::append_line_secure(&self.records_path(), &codec::encode_record(record))
    }
}
