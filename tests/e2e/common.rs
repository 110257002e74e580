//! Binary execution and environment setup for E2E tests

#![allow(dead_code)]

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// An isolated environment: its own HOME, data directory and config file
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub binary_path: PathBuf,
    pub env_vars: HashMap<String, String>,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temporary directory")?;
        let home = temp_dir.path().to_string_lossy().to_string();

        let mut env_vars = HashMap::new();
        env_vars.insert("HOME".to_string(), home.clone());
        env_vars.insert("USERPROFILE".to_string(), home.clone());
        env_vars.insert("XDG_CONFIG_HOME".to_string(), format!("{home}/.config"));
        env_vars.insert("XDG_DATA_HOME".to_string(), format!("{home}/.local/share"));
        env_vars.insert("NO_COLOR".to_string(), "1".to_string());

        Ok(Self {
            temp_dir,
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_rental")),
            env_vars,
        })
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.temp_path().join("data")
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_path().join("config.json")
    }

    /// Contents of a data file, empty when it does not exist yet.
    pub fn read_data_file(&self, name: &str) -> String {
        fs::read_to_string(self.data_dir().join(name)).unwrap_or_default()
    }

    pub fn create_file<P: AsRef<Path>>(&self, path: P, contents: &str) -> Result<PathBuf> {
        let full_path = self.temp_path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&full_path, contents)
            .with_context(|| format!("Failed to write file: {}", full_path.display()))?;
        Ok(full_path)
    }

    /// Runs the binary with the environment's data directory and config file.
    pub fn run_command(&self, args: &[&str]) -> Result<CommandResult> {
        let data_dir = self.data_dir();
        let config_path = self.config_path();

        let mut cmd = Command::new(&self.binary_path);
        cmd.arg("--data-dir")
            .arg(&data_dir)
            .arg("--config")
            .arg(&config_path)
            .args(args)
            .current_dir(self.temp_path())
            .env_remove("RENTAL_DATA_DIR")
            .env_remove("RUST_LOG")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        let output = cmd
            .output()
            .with_context(|| format!("Failed to execute command: {cmd:?}"))?;

        Ok(CommandResult {
            output,
            args: args.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn run_success(&self, args: &[&str]) -> Result<CommandResult> {
        let result = self.run_command(args)?;
        if !result.success() {
            anyhow::bail!(
                "Command failed: {:?}\nstdout: {}\nstderr: {}",
                result.args,
                result.stdout_string(),
                result.stderr_string()
            );
        }
        Ok(result)
    }

    pub fn run_failure(&self, args: &[&str]) -> Result<CommandResult> {
        let result = self.run_command(args)?;
        if result.success() {
            anyhow::bail!(
                "Command unexpectedly succeeded: {:?}\nstdout: {}",
                result.args,
                result.stdout_string()
            );
        }
        Ok(result)
    }

    pub fn set_env(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.env_vars.insert(key.into(), value.into());
    }

    /// Registers the car ABC123 and customer C1, the usual starting point.
    pub fn seed_car_and_customer(&self) -> Result<()> {
        self.run_success(&[
            "vehicle", "add", "--kind", "car", "--make", "toyota", "--model", "CAMRY", "--year",
            "2020", "--plate", "abc123", "--spec", "5",
        ])?;
        self.run_success(&["customer", "add", "C1", "Jane"])?;
        Ok(())
    }
}

pub struct CommandResult {
    output: Output,
    args: Vec<String>,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.output.status.success()
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.output.status.code()
    }

    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).to_string()
    }

    pub fn stderr_string(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).to_string()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}
