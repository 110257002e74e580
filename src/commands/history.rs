use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;

use crate::core::RentalRecord;
use crate::display;
use crate::error::{RentalError, Result};
use crate::registry::RentalRegistry;
use crate::utils::secure_file;

pub struct HistoryCommand {
    verbose: bool,
}

impl HistoryCommand {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Records in append order, narrowed by plate and/or customer.
    pub fn records<'a>(
        registry: &'a RentalRegistry,
        plate: Option<&str>,
        customer_id: Option<&str>,
    ) -> Vec<&'a RentalRecord> {
        let mut records = match plate {
            Some(plate) => registry.history_for_vehicle(plate),
            None => registry.list_history().iter().collect(),
        };
        if let Some(id) = customer_id {
            records.retain(|r| r.customer_id() == id);
        }
        records
    }

    pub fn execute(
        &self,
        registry: &RentalRegistry,
        plate: Option<&str>,
        customer_id: Option<&str>,
    ) -> Result<()> {
        let records = Self::records(registry, plate, customer_id);
        print!("{}", display::history_table(&records, registry));

        if self.verbose {
            println!();
            println!(
                "Showing {} of {} record(s)",
                records.len().to_string().green(),
                registry.list_history().len()
            );
        }
        Ok(())
    }
}

/// Writes the whole registry as pretty JSON
pub struct ExportCommand {
    verbose: bool,
}

impl ExportCommand {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn render(registry: &RentalRegistry) -> Result<String> {
        serde_json::to_string_pretty(&registry.snapshot()).map_err(|e| {
            RentalError::Other(anyhow::Error::new(e).context("Failed to serialize registry"))
        })
    }

    pub fn execute(&self, registry: &RentalRegistry, output: Option<&Path>) -> Result<()> {
        let json = Self::render(registry)?;
        match output {
            None => write_to(&mut io::stdout().lock(), &json)?,
            Some(path) => {
                secure_file::write_secure(path, format!("{json}\n").as_bytes()).map_err(|e| {
                    RentalError::persistence("export", Some(path.display().to_string()), e)
                })?;
                println!(
                    "{} Exported registry to {}",
                    "✓".green().bold(),
                    path.display().to_string().cyan()
                );
                if self.verbose {
                    println!("  {} {} bytes", "→".dimmed(), json.len() + 1);
                }
            }
        }
        Ok(())
    }
}

/// Writes one line of output. A reader that went away (`rental export | head`)
/// is not an error.
fn write_to(out: &mut dyn Write, text: &str) -> Result<()> {
    match writeln!(out, "{text}").and_then(|()| out.flush()) {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(e.into()),
        _ => Ok(()),
    }
}
