//! Option validation for refwatch
//!
//! Checks the two required options before a run starts. A blank value is a
//! configuration error; a mirror path whose parent is missing can never be
//! cloned into, so it is rejected up front as well.

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Option '{0}' cannot be blank")]
    Blank(&'static str),

    #[error("Check interval must be greater than zero")]
    ZeroInterval,

    #[error("Parent directory '{0}' does not exist")]
    MissingParent(PathBuf),
}

/// Validate the remote repository URL
///
/// Any non-blank string is accepted; reachability is only known once the
/// clone or fetch runs.
pub fn validate_repository(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Err(ValidationError::Blank("repository"));
    }
    Ok(())
}

/// Validate the local mirror path
///
/// Rules:
/// - Cannot be blank
/// - Its parent directory must already exist (the mirror itself may not)
pub fn validate_mirror_path(path: &Path) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() || path.to_string_lossy().trim().is_empty() {
        return Err(ValidationError::Blank("path"));
    }

    match path.parent() {
        // Relative single-component paths live in the current directory
        Some(parent) if parent.as_os_str().is_empty() => Ok(()),
        Some(parent) if !parent.is_dir() => Err(ValidationError::MissingParent(parent.to_path_buf())),
        _ => Ok(()),
    }
}

/// Validate the periodic check interval
pub fn validate_interval(interval: Duration) -> Result<(), ValidationError> {
    if interval.is_zero() {
        return Err(ValidationError::ZeroInterval);
    }
    Ok(())
}
