use colored::Colorize;

use crate::core::{Vehicle, VehicleKind, VehicleStatus, VehicleType};
use crate::display;
use crate::error::{RentalError, Result};
use crate::registry::{RentalRegistry, VehicleFilter};

/// Raw vehicle fields as entered on the command line
#[derive(Debug, Clone)]
pub struct VehicleDraft {
    pub vehicle_type: VehicleType,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
    /// Seats, sidecar flag or cargo capacity depending on the type.
    pub spec: String,
}

impl VehicleDraft {
    pub fn build(&self) -> Result<Vehicle> {
        let kind = VehicleKind::from_spec(self.vehicle_type, &self.spec)?;
        let mut vehicle = Vehicle::new(&self.make, &self.model, self.year, kind);
        vehicle.assign_plate(&self.plate)?;
        Ok(vehicle)
    }
}

pub struct VehicleAddCommand {
    verbose: bool,
}

impl VehicleAddCommand {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn execute(&self, registry: &mut RentalRegistry, draft: &VehicleDraft) -> Result<()> {
        let vehicle = draft.build()?;
        let stored = registry.add_vehicle(vehicle)?;

        println!(
            "{} Added {} {} {} ({})",
            "✓".green().bold(),
            stored.vehicle_type(),
            stored.make(),
            stored.model(),
            stored.plate().map(|p| p.as_str()).unwrap_or("-").cyan()
        );
        if self.verbose {
            print!("{}", display::vehicle_detail(stored));
        }
        Ok(())
    }
}

pub struct VehicleListCommand {
    verbose: bool,
}

impl VehicleListCommand {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn execute(&self, registry: &RentalRegistry, available_only: bool) -> Result<()> {
        let filter = if available_only {
            VehicleFilter::AvailableOnly
        } else {
            VehicleFilter::All
        };
        let vehicles = registry.list_vehicles(filter);
        print!("{}", display::vehicle_table(&vehicles));

        if self.verbose {
            println!();
            println!(
                "Total: {} vehicle(s), {} available",
                vehicles.len().to_string().green(),
                registry
                    .list_vehicles(VehicleFilter::AvailableOnly)
                    .len()
                    .to_string()
                    .green()
            );
        }
        Ok(())
    }
}

pub struct VehicleShowCommand {
    verbose: bool,
}

impl VehicleShowCommand {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn execute(&self, registry: &RentalRegistry, plate: &str) -> Result<()> {
        let vehicle = registry
            .find_vehicle_by_plate(plate)
            .ok_or_else(|| RentalError::vehicle_not_found(plate))?;

        print!("{}", display::vehicle_detail(vehicle));
        if let Some(renter) = registry.current_renter(plate) {
            println!("  Renter: {renter}");
        }

        let history = registry.history_for_vehicle(plate);
        if !history.is_empty() || self.verbose {
            println!();
            print!("{}", display::history_table(&history, registry));
        }
        Ok(())
    }
}

pub struct VehicleStatusCommand {
    verbose: bool,
}

impl VehicleStatusCommand {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn execute(
        &self,
        registry: &mut RentalRegistry,
        plate: &str,
        status: VehicleStatus,
    ) -> Result<()> {
        let previous = registry
            .find_vehicle_by_plate(plate)
            .map(|v| v.status())
            .ok_or_else(|| RentalError::vehicle_not_found(plate))?;
        let vehicle = registry.set_vehicle_status(plate, status)?;

        println!(
            "{} {} is now {}",
            "✓".green().bold(),
            vehicle.plate().map(|p| p.as_str()).unwrap_or(plate).cyan(),
            vehicle.status().to_string().bold()
        );
        if self.verbose {
            println!("  {} was {}", "→".dimmed(), previous);
        }
        Ok(())
    }
}
