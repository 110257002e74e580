use colored::Colorize;

use crate::core::Customer;
use crate::display;
use crate::error::Result;
use crate::registry::RentalRegistry;

pub struct CustomerAddCommand {
    verbose: bool,
}

impl CustomerAddCommand {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn execute(&self, registry: &mut RentalRegistry, id: &str, name: &str) -> Result<()> {
        let customer = Customer::new(id, name)?;
        let stored = registry.add_customer(customer)?;

        println!("{} Added customer {}", "✓".green().bold(), stored);
        if self.verbose {
            println!(
                "  {} {} customer(s) registered",
                "→".dimmed(),
                registry.list_customers().len()
            );
        }
        Ok(())
    }
}

pub struct CustomerListCommand {
    verbose: bool,
}

impl CustomerListCommand {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn execute(&self, registry: &RentalRegistry) -> Result<()> {
        let customers = registry.list_customers();
        print!("{}", display::customer_table(customers));

        if self.verbose {
            println!();
            println!(
                "Total: {} customer(s)",
                customers.len().to_string().green()
            );
        }
        Ok(())
    }
}
