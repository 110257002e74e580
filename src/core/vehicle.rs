//! Vehicles and their rental status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::plate::LicensePlate;
use super::rental::TransactionKind;
use crate::error::RentalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Available,
    Reserved,
    Rented,
    Maintenance,
    OutOfService,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 5] = [
        VehicleStatus::Available,
        VehicleStatus::Reserved,
        VehicleStatus::Rented,
        VehicleStatus::Maintenance,
        VehicleStatus::OutOfService,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "AVAILABLE",
            VehicleStatus::Reserved => "RESERVED",
            VehicleStatus::Rented => "RENTED",
            VehicleStatus::Maintenance => "MAINTENANCE",
            VehicleStatus::OutOfService => "OUT_OF_SERVICE",
        }
    }

    /// The status a transaction moves a vehicle into, or `None` when the
    /// transaction is not allowed from this status.
    pub fn after(self, kind: TransactionKind) -> Option<VehicleStatus> {
        match (self, kind) {
            (VehicleStatus::Available, TransactionKind::Rent) => Some(VehicleStatus::Rented),
            (VehicleStatus::Rented, TransactionKind::Return) => Some(VehicleStatus::Available),
            _ => None,
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "AVAILABLE" => Ok(VehicleStatus::Available),
            "RESERVED" => Ok(VehicleStatus::Reserved),
            "RENTED" => Ok(VehicleStatus::Rented),
            "MAINTENANCE" => Ok(VehicleStatus::Maintenance),
            // Older data files spell it without the underscore.
            "OUT_OF_SERVICE" | "OUTOFSERVICE" => Ok(VehicleStatus::OutOfService),
            _ => Err(format!("Unknown vehicle status: {s}")),
        }
    }
}

/// The three vehicle kinds, without their payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Car,
    Motorcycle,
    Truck,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "Car",
            VehicleType::Motorcycle => "Motorcycle",
            VehicleType::Truck => "Truck",
        }
    }

    /// Describes what the kind-specific field holds.
    pub fn spec_hint(&self) -> &'static str {
        match self {
            VehicleType::Car => "number of seats (whole number)",
            VehicleType::Motorcycle => "has sidecar (true/false)",
            VehicleType::Truck => "cargo capacity (number)",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(VehicleType::Car),
            "motorcycle" => Ok(VehicleType::Motorcycle),
            "truck" => Ok(VehicleType::Truck),
            _ => Err(format!("Unknown vehicle type: {s}")),
        }
    }
}

/// Kind-specific vehicle data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VehicleKind {
    Car { seats: u32 },
    Motorcycle { sidecar: bool },
    Truck { cargo_capacity: f64 },
}

impl VehicleKind {
    pub fn vehicle_type(&self) -> VehicleType {
        match self {
            VehicleKind::Car { .. } => VehicleType::Car,
            VehicleKind::Motorcycle { .. } => VehicleType::Motorcycle,
            VehicleKind::Truck { .. } => VehicleType::Truck,
        }
    }

    /// Builds the kind payload from its textual form: seats for a car,
    /// `true`/`false` for a motorcycle sidecar, capacity for a truck.
    pub fn from_spec(vehicle_type: VehicleType, spec: &str) -> Result<Self, RentalError> {
        let raw = spec.trim();
        let invalid = || {
            RentalError::invalid_vehicle(
                "specification",
                spec,
                format!("{} expects {}", vehicle_type, vehicle_type.spec_hint()),
            )
        };

        match vehicle_type {
            VehicleType::Car => raw
                .parse::<u32>()
                .map(|seats| VehicleKind::Car { seats })
                .map_err(|_| invalid()),
            VehicleType::Motorcycle => match raw.to_ascii_lowercase().as_str() {
                "true" | "yes" => Ok(VehicleKind::Motorcycle { sidecar: true }),
                "false" | "no" => Ok(VehicleKind::Motorcycle { sidecar: false }),
                _ => Err(invalid()),
            },
            VehicleType::Truck => match raw.parse::<f64>() {
                Ok(capacity) if capacity.is_finite() && capacity >= 0.0 => {
                    Ok(VehicleKind::Truck {
                        cargo_capacity: capacity,
                    })
                }
                _ => Err(invalid()),
            },
        }
    }

    /// Textual form accepted back by [`VehicleKind::from_spec`].
    pub fn spec(&self) -> String {
        match self {
            VehicleKind::Car { seats } => seats.to_string(),
            VehicleKind::Motorcycle { sidecar } => sidecar.to_string(),
            VehicleKind::Truck { cargo_capacity } => cargo_capacity.to_string(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            VehicleKind::Car { seats } => format!("{seats} seats"),
            VehicleKind::Motorcycle { sidecar: true } => "with sidecar".to_string(),
            VehicleKind::Motorcycle { sidecar: false } => "no sidecar".to_string(),
            VehicleKind::Truck { cargo_capacity } => format!("{cargo_capacity} cargo capacity"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    plate: Option<LicensePlate>,
    make: String,
    model: String,
    year: i32,
    status: VehicleStatus,
    #[serde(flatten)]
    kind: VehicleKind,
}

impl Vehicle {
    /// A new vehicle starts out available with no plate. Make and model are
    /// trimmed and capitalized independently.
    pub fn new(make: &str, model: &str, year: i32, kind: VehicleKind) -> Self {
        Self::restore(capitalize(make.trim()), capitalize(model.trim()), year, kind)
    }

    /// Rebuilds a vehicle from stored fields, keeping make and model as they
    /// were written.
    pub(crate) fn restore(make: String, model: String, year: i32, kind: VehicleKind) -> Self {
        Self {
            plate: None,
            make,
            model,
            year,
            status: VehicleStatus::Available,
            kind,
        }
    }

    pub fn car(make: &str, model: &str, year: i32, seats: u32) -> Self {
        Self::new(make, model, year, VehicleKind::Car { seats })
    }

    pub fn motorcycle(make: &str, model: &str, year: i32, sidecar: bool) -> Self {
        Self::new(make, model, year, VehicleKind::Motorcycle { sidecar })
    }

    pub fn truck(make: &str, model: &str, year: i32, cargo_capacity: f64) -> Self {
        Self::new(make, model, year, VehicleKind::Truck { cargo_capacity })
    }

    /// Validates and stores the plate in uppercase. On failure the current
    /// plate is left as it was.
    pub fn assign_plate(&mut self, candidate: &str) -> Result<&LicensePlate, RentalError> {
        let plate = LicensePlate::parse(candidate)?;
        Ok(&*self.plate.insert(plate))
    }

    /// Builder-style variant of [`Vehicle::assign_plate`].
    pub fn with_plate(mut self, candidate: &str) -> Result<Self, RentalError> {
        self.assign_plate(candidate)?;
        Ok(self)
    }

    pub fn plate(&self) -> Option<&LicensePlate> {
        self.plate.as_ref()
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn status(&self) -> VehicleStatus {
        self.status
    }

    pub fn kind(&self) -> &VehicleKind {
        &self.kind
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.kind.vehicle_type()
    }

    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }

    /// Only the registry moves a vehicle between statuses.
    pub(crate) fn set_status(&mut self, status: VehicleStatus) {
        self.status = status;
    }

    /// Make and model end up as fields in a comma separated line, so neither
    /// may contain a comma or a line break.
    pub fn validate_descriptors(&self) -> Result<(), RentalError> {
        for (field, value) in [("make", &self.make), ("model", &self.model)] {
            if value.contains([',', '\n', '\r']) {
                return Err(RentalError::invalid_vehicle(
                    field,
                    value.as_str(),
                    "Commas and line breaks are not allowed",
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plate = self.plate.as_ref().map_or("------", |p| p.as_str());
        write!(
            f,
            "| {} | {} | {} | {} | {} |",
            plate, self.make, self.model, self.year, self.status
        )
    }
}

/// First character uppercase, the rest lowercase. Empty input comes back empty.
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
