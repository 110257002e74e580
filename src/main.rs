use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::PathBuf;

use rental_tracker::commands::{
    self, ConfigSetCommand, ConfigShowCommand, CustomerAddCommand, CustomerListCommand,
    ExportCommand, HistoryCommand, RentCommand, ReturnCommand, VehicleAddCommand, VehicleDraft,
    VehicleListCommand, VehicleShowCommand, VehicleStatusCommand,
};
use rental_tracker::config::{resolve_data_dir, ConfigManager};
use rental_tracker::error::{RentalError, Result};
use rental_tracker::logging;
use rental_tracker::{RentalRegistry, VehicleStatus, VehicleType};

#[derive(Parser)]
#[command(name = "rental")]
#[command(version)]
#[command(about = "Rental Tracker - vehicles, customers and rentals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, help = "Enable verbose output", global = true)]
    verbose: bool,

    #[arg(long, help = "Directory holding the data files", global = true)]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Path of the configuration file", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Manage vehicles")]
    Vehicle {
        #[command(subcommand)]
        action: VehicleAction,
    },

    #[command(about = "Manage customers")]
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },

    #[command(about = "Rent a vehicle to a customer")]
    Rent {
        #[arg(help = "License plate of the vehicle")]
        plate: String,
        #[arg(help = "Customer ID")]
        customer: String,
        #[arg(long, help = "Rental amount, e.g. 100 or 99.50")]
        amount: String,
        #[arg(long, help = "Rental date (YYYY-MM-DD), defaults to today")]
        date: Option<String>,
    },

    #[command(about = "Return a rented vehicle")]
    Return {
        #[arg(help = "License plate of the vehicle")]
        plate: String,
        #[arg(help = "Customer ID, defaults to the current renter")]
        customer: Option<String>,
        #[arg(long, help = "Extra fees charged on return")]
        fees: Option<String>,
        #[arg(long, help = "Return date (YYYY-MM-DD), defaults to today")]
        date: Option<String>,
    },

    #[command(about = "Show the rental history")]
    History {
        #[arg(long, help = "Only records for this plate")]
        plate: Option<String>,
        #[arg(long, help = "Only records for this customer ID")]
        customer: Option<String>,
    },

    #[command(about = "Export all data as JSON")]
    Export {
        #[arg(short, long, help = "Write to a file instead of stdout")]
        output: Option<PathBuf>,
    },

    #[command(about = "Show or change configuration")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum VehicleAction {
    #[command(about = "Register a vehicle")]
    Add {
        #[arg(long, value_enum, help = "Vehicle type")]
        kind: KindArg,
        #[arg(long)]
        make: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        year: i32,
        #[arg(long, help = "License plate, three letters and three digits")]
        plate: String,
        #[arg(
            long,
            help = "Seats (car), sidecar true/false (motorcycle) or cargo capacity (truck)"
        )]
        spec: String,
    },
    #[command(about = "List vehicles")]
    List {
        #[arg(long, help = "Only vehicles available for rent")]
        available: bool,
    },
    #[command(about = "Show one vehicle and its history")]
    Show {
        #[arg(help = "License plate")]
        plate: String,
    },
    #[command(about = "Change a vehicle's status outside rent and return")]
    Status {
        #[arg(help = "License plate")]
        plate: String,
        #[arg(value_enum, help = "New status")]
        status: StatusArg,
    },
}

#[derive(Subcommand)]
enum CustomerAction {
    #[command(about = "Register a customer")]
    Add {
        #[arg(help = "Customer ID")]
        id: String,
        #[arg(help = "Customer name")]
        name: String,
    },
    #[command(about = "List customers")]
    List,
}

#[derive(Subcommand)]
enum ConfigAction {
    #[command(about = "Show the configuration")]
    Show,
    #[command(about = "Set a configuration key (data_dir, persistence)")]
    Set { key: String, value: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Car,
    Motorcycle,
    Truck,
}

impl From<KindArg> for VehicleType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Car => VehicleType::Car,
            KindArg::Motorcycle => VehicleType::Motorcycle,
            KindArg::Truck => VehicleType::Truck,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Available,
    Reserved,
    Rented,
    Maintenance,
    OutOfService,
}

impl From<StatusArg> for VehicleStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Available => VehicleStatus::Available,
            StatusArg::Reserved => VehicleStatus::Reserved,
            StatusArg::Rented => VehicleStatus::Rented,
            StatusArg::Maintenance => VehicleStatus::Maintenance,
            StatusArg::OutOfService => VehicleStatus::OutOfService,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("{} {e:#}", "Warning:".yellow());
    }

    if let Err(e) = run(cli) {
        eprintln!("{}", e.to_string().trim_end());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let verbose = cli.verbose;
    let manager = match &cli.config {
        Some(path) => ConfigManager::at(path),
        None => ConfigManager::new()?,
    };

    if let Commands::Config { action } = &cli.command {
        return match action {
            ConfigAction::Show => {
                ConfigShowCommand::new(verbose).execute(&manager, cli.data_dir.as_deref())
            }
            ConfigAction::Set { key, value } => {
                ConfigSetCommand::new(verbose).execute(&manager, key, value)
            }
        };
    }

    let config = manager.load()?;
    let data_dir = resolve_data_dir(cli.data_dir.as_deref(), &config)?;
    if verbose {
        eprintln!(
            "{} {}",
            "Data directory:".dimmed(),
            data_dir.display().to_string().dimmed()
        );
    }
    let mut registry = commands::open_registry(&data_dir, config.persistence)?;

    dispatch(cli.command, &mut registry, verbose)
}

fn dispatch(command: Commands, registry: &mut RentalRegistry, verbose: bool) -> Result<()> {
    match command {
        Commands::Vehicle { action } => match action {
            VehicleAction::Add {
                kind,
                make,
                model,
                year,
                plate,
                spec,
            } => {
                let draft = VehicleDraft {
                    vehicle_type: kind.into(),
                    make,
                    model,
                    year,
                    plate,
                    spec,
                };
                VehicleAddCommand::new(verbose).execute(registry, &draft)
            }
            VehicleAction::List { available } => {
                VehicleListCommand::new(verbose).execute(registry, available)
            }
            VehicleAction::Show { plate } => {
                VehicleShowCommand::new(verbose).execute(registry, &plate)
            }
            VehicleAction::Status { plate, status } => {
                VehicleStatusCommand::new(verbose).execute(registry, &plate, status.into())
            }
        },
        Commands::Customer { action } => match action {
            CustomerAction::Add { id, name } => {
                CustomerAddCommand::new(verbose).execute(registry, &id, &name)
            }
            CustomerAction::List => CustomerListCommand::new(verbose).execute(registry),
        },
        Commands::Rent {
            plate,
            customer,
            amount,
            date,
        } => RentCommand::new(verbose).execute(
            registry,
            &plate,
            &customer,
            &amount,
            date.as_deref(),
        ),
        Commands::Return {
            plate,
            customer,
            fees,
            date,
        } => ReturnCommand::new(verbose).execute(
            registry,
            &plate,
            customer.as_deref(),
            fees.as_deref(),
            date.as_deref(),
        ),
        Commands::History { plate, customer } => {
            HistoryCommand::new(verbose).execute(registry, plate.as_deref(), customer.as_deref())
        }
        Commands::Export { output } => {
            ExportCommand::new(verbose).execute(registry, output.as_deref())
        }
        Commands::Config { .. } => Err(RentalError::Other(anyhow::anyhow!(
            "configuration commands do not open the registry"
        ))),
    }
}
