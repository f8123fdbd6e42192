//! Error types for refwatch
//!
//! Operational failures (an unreachable remote, a bad mirror path, a failed
//! fetch, invalid options) abort a run before any report is assembled.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for refwatch operations
#[derive(Debug, Error)]
pub enum Error {
    // ==========================================================================
    // Acquire Errors
    // ==========================================================================
    #[error("Remote '{url}' is unreachable: {source}")]
    RemoteUnreachable {
        url: String,
        #[source]
        source: git2::Error,
    },

    #[error("Invalid local mirror path '{path}': {reason}")]
    InvalidLocalPath { path: PathBuf, reason: String },

    // ==========================================================================
    // Sync Errors
    // ==========================================================================
    #[error("Failed to fetch from '{url}': {source}")]
    FetchError {
        url: String,
        #[source]
        source: git2::Error,
    },

    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    #[error("Invalid option '{option}': {reason}")]
    ConfigurationInvalid {
        option: &'static str,
        reason: String,
    },

    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ==========================================================================
    // Git Errors
    // ==========================================================================
    #[error("Git operation failed: {message}")]
    GitError {
        message: String,
        #[source]
        source: Option<git2::Error>,
    },

    #[error("Commit '{sha}' not found in mirror")]
    CommitNotFound { sha: String },

    // ==========================================================================
    // Serialization Errors
    // ==========================================================================
    #[error("Failed to parse YAML: {message}")]
    YamlParseError { message: String },

    #[error("Failed to serialize JSON: {message}")]
    JsonError { message: String },

    // ==========================================================================
    // Catch-all
    // ==========================================================================
    #[error("{0}")]
    Other(String),
}

/// Result type alias for refwatch operations
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Conversions from external error types
// =============================================================================

impl From<git2::Error> for Error {
    fn from(err: git2::Error) -> Self {
        Error::GitError {
            message: err.message().to_string(),
            source: Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::YamlParseError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonError {
            message: err.to_string(),
        }
    }
}

impl From<crate::validation::ValidationError> for Error {
    fn from(err: crate::validation::ValidationError) -> Self {
        use crate::validation::ValidationError;

        match err {
            ValidationError::Blank(option) => Error::ConfigurationInvalid {
                option,
                reason: "must not be blank".to_string(),
            },
            ValidationError::ZeroInterval => Error::ConfigurationInvalid {
                option: "interval",
                reason: "must be greater than zero".to_string(),
            },
            ValidationError::MissingParent(path) => Error::InvalidLocalPath {
                reason: format!("parent directory '{}' does not exist", path.display()),
                path,
            },
        }
    }
}

// =============================================================================
// Error Display Helpers
// =============================================================================

impl Error {
    /// Returns a user-friendly suggestion for fixing the error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::RemoteUnreachable { .. } => {
                Some("Check the repository URL and that the remote accepts anonymous access")
            }
            Error::InvalidLocalPath { .. } => {
                Some("Point 'path' at an empty or missing directory whose parent exists")
            }
            Error::FetchError { .. } => Some("The mirror is kept as-is; the next run fetches again"),
            Error::ConfigurationInvalid { .. } => {
                Some("Set both 'repository' and 'path' in refwatch.yaml or on the command line")
            }
            _ => None,
        }
    }

    /// Returns true for failures that abort a run without a report
    pub fn is_operational(&self) -> bool {
        matches!(
            self,
            Error::RemoteUnreachable { .. }
                | Error::InvalidLocalPath { .. }
                | Error::FetchError { .. }
                | Error::ConfigurationInvalid { .. }
        )
    }
}
