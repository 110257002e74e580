use colored::Colorize;

use crate::core::{Money, RentalRecord, VehicleStatus};
use crate::error::{RentalError, Result};
use crate::registry::RentalRegistry;

use super::parse_date;

fn print_record(action: &str, record: &RentalRecord, registry: &RentalRegistry, verbose: bool) {
    let customer = registry
        .find_customer_by_id(record.customer_id())
        .map(|c| c.to_string())
        .unwrap_or_else(|| record.customer_id().to_string());
    println!(
        "{} {} {} {} on {} (${})",
        "✓".green().bold(),
        action,
        record.plate().as_str().cyan(),
        customer,
        record.date().format("%Y-%m-%d"),
        record.amount()
    );
    if verbose {
        println!("  {} {}", "→".dimmed(), record);
    }
}

pub struct RentCommand {
    verbose: bool,
}

impl RentCommand {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn execute(
        &self,
        registry: &mut RentalRegistry,
        plate: &str,
        customer_id: &str,
        amount: &str,
        date: Option<&str>,
    ) -> Result<()> {
        let amount = Money::parse(amount)?;
        let date = parse_date(date)?;
        let record = registry
            .rent_vehicle(plate, customer_id, date, amount)?
            .clone();
        print_record("Rented", &record, registry, self.verbose);
        Ok(())
    }
}

pub struct ReturnCommand {
    verbose: bool,
}

impl ReturnCommand {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Without a customer ID the vehicle's current renter is used.
    pub fn execute(
        &self,
        registry: &mut RentalRegistry,
        plate: &str,
        customer_id: Option<&str>,
        fees: Option<&str>,
        date: Option<&str>,
    ) -> Result<()> {
        let fees = fees.map(Money::parse).transpose()?.unwrap_or(Money::ZERO);
        let date = parse_date(date)?;
        let customer_id = match customer_id {
            Some(id) => id.to_string(),
            None => renter_of(registry, plate)?,
        };

        let record = registry
            .return_vehicle(plate, &customer_id, date, fees)?
            .clone();
        print_record("Returned", &record, registry, self.verbose);
        Ok(())
    }
}

fn renter_of(registry: &RentalRegistry, plate: &str) -> Result<String> {
    if let Some(customer) = registry.current_renter(plate) {
        return Ok(customer.id().to_string());
    }
    let vehicle = registry
        .find_vehicle_by_plate(plate)
        .ok_or_else(|| RentalError::vehicle_not_found(plate))?;
    if vehicle.status() != VehicleStatus::Rented {
        return Err(RentalError::VehicleNotRented {
            plate: vehicle
                .plate()
                .map(|p| p.to_string())
                .unwrap_or_else(|| plate.to_string()),
            status: vehicle.status(),
        });
    }
    Err(RentalError::Other(anyhow::anyhow!(
        "No rental record names the renter of {plate}; pass the customer ID"
    )))
}
