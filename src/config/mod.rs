pub mod manager;

pub use manager::{resolve_data_dir, ConfigManager, RentalConfig, CONFIG_FILE, DATA_DIR_ENV};
