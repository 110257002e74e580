//! Line format for the flat-file store
//!
//! One entity per line, comma separated:
//!
//! ```text
//! vehicles.txt        Car,ABC123,Toyota,Camry,2020,AVAILABLE,5
//! customers.txt       C1,Jane Doe
//! rental_records.txt  ABC123,C1,2024-03-01,100.00,RENT
//! ```
//!
//! Fields are trimmed when read, so `, ` separated lines load as well.

use chrono::NaiveDate;

use crate::core::{
    Customer, LicensePlate, Money, RentalRecord, TransactionKind, Vehicle, VehicleKind,
    VehicleStatus, VehicleType,
};

const VEHICLE_FIELDS: usize = 7;
const RECORD_FIELDS: usize = 5;

pub fn encode_vehicle(vehicle: &Vehicle) -> Result<String, String> {
    let plate = vehicle
        .plate()
        .ok_or_else(|| "vehicle has no license plate".to_string())?;
    Ok(format!(
        "{},{},{},{},{},{},{}",
        vehicle.vehicle_type(),
        plate,
        vehicle.make(),
        vehicle.model(),
        vehicle.year(),
        vehicle.status(),
        vehicle.kind().spec()
    ))
}

pub fn decode_vehicle(line: &str) -> Result<Vehicle, String> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < VEHICLE_FIELDS {
        return Err(format!(
            "expected {VEHICLE_FIELDS} fields, found {}",
            parts.len()
        ));
    }

    let vehicle_type: VehicleType = parts[0].parse()?;
    let year: i32 = parts[4]
        .parse()
        .map_err(|_| format!("invalid year: {}", parts[4]))?;
    let status: VehicleStatus = parts[5].parse()?;
    let kind = VehicleKind::from_spec(vehicle_type, parts[6])
        .map_err(|_| format!("invalid {} specification: {}", vehicle_type, parts[6]))?;

    let mut vehicle = Vehicle::restore(parts[2].to_string(), parts[3].to_string(), year, kind);
    vehicle
        .assign_plate(parts[1])
        .map_err(|_| format!("invalid license plate: {}", parts[1]))?;
    vehicle.set_status(status);
    Ok(vehicle)
}

pub fn encode_customer(customer: &Customer) -> String {
    format!("{},{}", customer.id(), customer.name())
}

/// Splits on the first comma only, so names may contain commas.
pub fn decode_customer(line: &str) -> Result<Customer, String> {
    let (id, name) = line
        .split_once(',')
        .ok_or_else(|| "expected id and name".to_string())?;
    Customer::new(id, name).map_err(|_| format!("invalid customer: {}", line.trim()))
}

pub fn encode_record(record: &RentalRecord) -> String {
    format!(
        "{},{},{},{},{}",
        record.plate(),
        record.customer_id(),
        record.date().format("%Y-%m-%d"),
        record.amount(),
        record.kind()
    )
}

pub fn decode_record(line: &str) -> Result<RentalRecord, String> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() != RECORD_FIELDS {
        return Err(format!(
            "expected {RECORD_FIELDS} fields, found {}",
            parts.len()
        ));
    }

    let plate = LicensePlate::parse(parts[0])
        .map_err(|_| format!("invalid license plate: {}", parts[0]))?;
    if parts[1].is_empty() {
        return Err("missing customer ID".to_string());
    }
    let date = NaiveDate::parse_from_str(parts[2], "%Y-%m-%d")
        .map_err(|_| format!("invalid date: {}", parts[2]))?;
    let amount = Money::parse(parts[3]).map_err(|_| format!("invalid amount: {}", parts[3]))?;
    let kind: TransactionKind = parts[4].parse()?;

    Ok(RentalRecord::new(plate, parts[1], date, amount, kind))
}
