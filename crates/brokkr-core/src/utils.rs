//! Filesystem helpers

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default number of polls in [`wait_for_dir`]
pub const DEFAULT_WAIT_ATTEMPTS: u32 = 10;

/// Default interval between polls in [`wait_for_dir`]
pub const DEFAULT_WAIT_INTERVAL: Duration = Duration::from_millis(100);

/// Wait for a directory to appear on disk, with bounded polling.
///
/// External generators create their output asynchronously from the
/// caller's point of view; this polls up to `attempts` times with
/// `interval` between polls.
///
/// # Errors
/// Returns [`Error::PathWaitTimeout`] if the directory never appears.
pub async fn wait_for_dir(path: &Utf8Path, attempts: u32, interval: Duration) -> Result<()> {
    for attempt in 0..attempts {
        if path.is_dir() {
            debug!("Directory appeared after {} poll(s): {}", attempt + 1, path);
            return Ok(());
        }
        if attempt + 1 < attempts {
            tokio::time::sleep(interval).await;
        }
    }

    Err(Error::path_wait_timeout(path.as_str()))
}

/// Resolve a possibly relative path against the current working directory.
///
/// Subprocesses may run with their own working directory, so every path
/// handed to them has to be absolute first.
///
/// # Errors
/// Returns an error if the current directory cannot be determined or is
/// not valid UTF-8.
pub fn absolutize(path: &Utf8Path) -> Result<Utf8PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir()?;
    let cwd = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| Error::non_utf8_path(p.to_string_lossy().into_owned()))?;
    Ok(cwd.join(path))
}
