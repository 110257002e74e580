use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::registry::PersistencePolicy;
use crate::utils::secure_file;

pub const CONFIG_FILE: &str = "config.json";

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "RENTAL_DATA_DIR";

const APP_NAME: &str = "rental-tracker";

/// Settings read from `config.json`. Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RentalConfig {
    pub data_dir: Option<PathBuf>,
    pub persistence: PersistencePolicy,
}

impl RentalConfig {
    pub const KEYS: [&'static str; 2] = ["data_dir", "persistence"];

    /// Sets one setting from its textual form. An empty `data_dir` clears it.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data_dir" => {
                let value = value.trim();
                self.data_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "persistence" => {
                self.persistence = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            }
            _ => anyhow::bail!(
                "Unknown configuration key: {key} (expected one of: {})",
                Self::KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Key/value pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "data_dir",
                self.data_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(default)".to_string()),
            ),
            ("persistence", self.persistence.to_string()),
        ]
    }
}

/// Reads and writes the configuration file
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Uses `config.json` in the platform configuration directory.
    pub fn new() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", APP_NAME)
            .context("Failed to get project directories")?;
        Ok(Self::at(dirs.config_dir().join(CONFIG_FILE)))
    }

    pub fn at(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<RentalConfig> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(RentalConfig::default());
        }

        let contents = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read {}", self.config_path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.config_path.display()))
    }

    pub fn save(&self, config: &RentalConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        let contents =
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;
        secure_file::write_secure(&self.config_path, contents.as_bytes())
            .context("Failed to write config file")
    }

    /// Loads, changes one key and saves. Returns the saved configuration.
    pub fn set(&self, key: &str, value: &str) -> Result<RentalConfig> {
        let mut config = self.load()?;
        config.apply(key, value)?;
        self.save(&config)?;
        tracing::info!(key = key, value = value, "Configuration updated");
        Ok(config)
    }
}

/// Picks the data directory: command line, then `RENTAL_DATA_DIR`, then the
/// config file, then the platform data directory.
pub fn resolve_data_dir(cli_override: Option<&Path>, config: &RentalConfig) -> Result<PathBuf> {
    if let Some(dir) = cli_override {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = &config.data_dir {
        return Ok(dir.clone());
    }
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)
        .context("Failed to get project directories")?;
    Ok(dirs.data_dir().to_path_buf())
}
