//! Terminal rendering for registry contents.
//!
//! Functions return the rendered text so commands decide where it goes.

use colored::{ColoredString, Colorize};
use std::fmt::Write;

use crate::core::{Customer, RentalRecord, TransactionKind, Vehicle, VehicleStatus};
use crate::registry::RentalRegistry;

pub fn status_label(status: VehicleStatus) -> ColoredString {
    let padded = format!("{:<14}", status.as_str());
    match status {
        VehicleStatus::Available => padded.green(),
        VehicleStatus::Reserved => padded.cyan(),
        VehicleStatus::Rented => padded.yellow(),
        VehicleStatus::Maintenance => padded.magenta(),
        VehicleStatus::OutOfService => padded.red(),
    }
}

/// One row per vehicle: type, plate, make, model, year, status, detail.
pub fn vehicle_table(vehicles: &[&Vehicle]) -> String {
    if vehicles.is_empty() {
        return "No vehicles to show.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{:<11} {:<7} {:<12} {:<12} {:<5} {:<14} {}",
            "TYPE", "PLATE", "MAKE", "MODEL", "YEAR", "STATUS", "DETAIL"
        )
        .bold()
    );
    for vehicle in vehicles {
        let plate = vehicle.plate().map(|p| p.as_str()).unwrap_or("-");
        let _ = writeln!(
            out,
            "{:<11} {} {:<12} {:<12} {:<5} {} {}",
            vehicle.vehicle_type().as_str(),
            format!("{plate:<7}").cyan(),
            vehicle.make(),
            vehicle.model(),
            vehicle.year(),
            status_label(vehicle.status()),
            vehicle.kind().describe().dimmed()
        );
    }
    out
}

pub fn vehicle_detail(vehicle: &Vehicle) -> String {
    let plate = vehicle.plate().map(|p| p.as_str()).unwrap_or("-");
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {} ({})",
        "→".green(),
        vehicle.make().bold(),
        vehicle.model().bold(),
        vehicle.year()
    );
    let _ = writeln!(out, "  Plate:  {}", plate.cyan());
    let _ = writeln!(out, "  Type:   {}", vehicle.vehicle_type());
    let _ = writeln!(out, "  Status: {}", vehicle.status());
    let _ = writeln!(out, "  Detail: {}", vehicle.kind().describe());
    out
}

pub fn customer_table(customers: &[Customer]) -> String {
    if customers.is_empty() {
        return "No customers registered.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("{:<12} {}", "ID", "NAME").bold());
    for customer in customers {
        let id = format!("{:<12}", customer.id());
        let _ = writeln!(out, "{} {}", id.cyan(), customer.name());
    }
    out
}

/// One row per record: kind, plate, customer name, date, amount. Customers
/// missing from the registry show their ID instead of a name.
pub fn history_table(records: &[&RentalRecord], registry: &RentalRegistry) -> String {
    if records.is_empty() {
        return "No rental records.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{:<7} {:<7} {:<20} {:<10} {:>10}",
            "KIND", "PLATE", "CUSTOMER", "DATE", "AMOUNT"
        )
        .bold()
    );
    for record in records {
        let customer = registry
            .find_customer_by_id(record.customer_id())
            .map(Customer::name)
            .unwrap_or_else(|| record.customer_id());
        let kind = format!("{:<7}", record.kind().as_str());
        let kind = match record.kind() {
            TransactionKind::Rent => kind.yellow(),
            TransactionKind::Return => kind.green(),
        };
        let _ = writeln!(
            out,
            "{} {:<7} {:<20} {:<10} {:>10}",
            kind,
            record.plate().as_str(),
            customer,
            record.date().format("%Y-%m-%d"),
            format!("${}", record.amount())
        );
    }
    out
}
