//! File writes for data and configuration files.
//!
//! Whole-file writes go through a temporary file in the target directory and
//! are renamed into place, so a reader sees either the old or the new
//! contents. Files are created readable by the owner only on Unix.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically replace `path` with `contents`.
///
/// # Example
/// ```rust,no_run
/// use rental_tracker::utils::secure_file;
/// use std::path::Path;
///
/// secure_file::write_secure(Path::new("/tmp/vehicles.txt"), b"Car,ABC123,Toyota,Camry,2020,AVAILABLE,5\n")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_secure(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp_file =
        NamedTempFile::new_in(parent).context("Failed to create temporary file")?;

    temp_file
        .write_all(contents)
        .context("Failed to write to temporary file")?;
    temp_file
        .as_file()
        .sync_all()
        .context("Failed to flush temporary file")?;

    #[cfg(unix)]
    restrict_permissions(temp_file.path())?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file to {}", path.display()))?;

    Ok(())
}

/// Append a single line, creating the file when it does not exist yet.
pub fn append_line_secure(path: &Path, line: &str) -> Result<()> {
    let existed = path.exists();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {} for appending", path.display()))?;

    #[cfg(unix)]
    if !existed {
        restrict_permissions(path)?;
    }
    #[cfg(not(unix))]
    let _ = existed;

    writeln!(file, "{line}").with_context(|| format!("Failed to append to {}", path.display()))?;
    file.sync_data()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o600);
    fs::set_permissions(path, perms).context("Failed to set file permissions")
}
