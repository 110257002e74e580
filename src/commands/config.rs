use colored::Colorize;
use std::path::Path;

use crate::config::{resolve_data_dir, ConfigManager};
use crate::error::Result;

pub struct ConfigShowCommand {
    verbose: bool,
}

impl ConfigShowCommand {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn execute(&self, manager: &ConfigManager, data_dir_override: Option<&Path>) -> Result<()> {
        let config = manager.load()?;

        println!("{}", "Rental tracker configuration".blue().bold());
        for (key, value) in config.entries() {
            println!("  {}: {}", key.cyan(), value);
        }

        let data_dir = resolve_data_dir(data_dir_override, &config)?;
        println!("  {}: {}", "effective data_dir".cyan(), data_dir.display());
        if self.verbose {
            println!(
                "  {}: {}",
                "config file".cyan(),
                manager.config_path().display().to_string().dimmed()
            );
        }
        Ok(())
    }
}

pub struct ConfigSetCommand {
    verbose: bool,
}

impl ConfigSetCommand {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn execute(&self, manager: &ConfigManager, key: &str, value: &str) -> Result<()> {
        let config = manager.set(key, value)?;
        let shown = config
            .entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .unwrap_or_else(|| value.to_string());

        println!("{} Set {} = {}", "✓".green().bold(), key.cyan(), shown);
        if self.verbose {
            println!(
                "  {} Saved to {}",
                "→".dimmed(),
                manager.config_path().display()
            );
        }
        Ok(())
    }
}
