use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured logging based on verbosity level.
///
/// Log lines go to stderr so command output on stdout stays clean.
pub fn init_logging(verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("rental_tracker=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rental_tracker=warn"))
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if verbose {
        tracing::info!("Verbose logging enabled");
    }

    Ok(())
}

/// Log a vehicle or customer registration
pub fn log_registered(entity: &str, key: &str) {
    tracing::info!(entity = entity, key = key, "Registered");
}

/// Log a completed rent or return
pub fn log_transaction(kind: &str, plate: &str, customer_id: &str, amount: &str) {
    tracing::info!(
        kind = kind,
        plate = plate,
        customer_id = customer_id,
        amount = amount,
        "Rental transaction recorded"
    );
}

/// Log an operation refused by a business rule
pub fn log_rule_violation(operation: &str, key: &str, reason: &str) {
    tracing::warn!(
        operation = operation,
        key = key,
        reason = reason,
        "Operation refused"
    );
}

/// Log a storage failure
pub fn log_persistence_failure(operation: &str, observer: &str, error: &anyhow::Error) {
    let message = format!("{error:#}");
    tracing::error!(
        operation = operation,
        observer = observer,
        error = %message,
        "Persistence failed"
    );
}

/// Log a stored line that could not be read back
pub fn log_skipped_line(path: &Path, line: usize, reason: &str) {
    tracing::warn!(
        path = %path.display(),
        line = line,
        reason = reason,
        "Skipping unreadable line"
    );
}

/// Log a loaded entry dropped while rebuilding the registry
pub fn log_dropped_on_load(entity: &str, key: &str, reason: &str) {
    tracing::warn!(
        entity = entity,
        key = key,
        reason = reason,
        "Dropping stored entry"
    );
}
