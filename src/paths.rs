//! Location of the home directory that the source directory table hangs off.
//!
//! # Environment Variables
//!
//! - `MVR_HOME` - Override the home directory (e.g. for a sandboxed run)

use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable for home directory override
pub const ENV_HOME: &str = "MVR_HOME";

/// Raised when no home directory can be determined.
#[derive(Debug, Error)]
#[error("could not determine home directory (set MVR_HOME to override)")]
pub struct HomeDirError;

/// Get the home directory used to resolve `~/Documents` and friends.
///
/// Priority:
/// 1. `MVR_HOME` env var
/// 2. Platform home directory
pub fn home_dir() -> Result<PathBuf, HomeDirError> {
    home_dir_with_override(std::env::var_os(ENV_HOME))
}

/// Resolves the home directory from an explicit `MVR_HOME` value.
///
/// An empty override counts as unset.
pub fn home_dir_with_override(home_override: Option<OsString>) -> Result<PathBuf, HomeDirError> {
    if let Some(dir) = home_override.filter(|dir| !dir.is_empty()) {
        let path = PathBuf::from(dir);
        log::debug!("Using home dir from {}: {}", ENV_HOME, path.display());
        return Ok(path);
    }

    let path = dirs::home_dir().ok_or(HomeDirError)?;
    log::debug!("Using platform home dir: {}", path.display());
    Ok(path)
}
