//! Domain error types
//!
//! This module defines the error hierarchy for dbapi. Configuration resolution
//! has its own [`ConfigError`] so callers can tell a missing file apart from a
//! corrupt one; everything else funnels into [`AppError`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while resolving the application configuration snapshot
///
/// Every variant carries enough context to name the layer or section that
/// produced it. None of them are retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was discovered in any search location
    #[error("application config not found (searched: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    /// A candidate file exists but cannot be read due to access rights
    #[error("application config permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    /// An explicitly requested file could not be read
    #[error("unable to read application config={:?}: {reason}", .path)]
    Read { path: PathBuf, reason: String },

    /// A file's contents are not valid structured data
    #[error("unable to parse config={:?}: {reason}", .path)]
    Parse { path: PathBuf, reason: String },

    /// The merged store could not be mapped onto the typed configuration
    #[error("unable to parse config: {0}")]
    Unmarshal(String),

    /// A section rejected a value during post-load processing
    #[error("invalid application config [{section}]: {reason}")]
    Validation {
        section: &'static str,
        reason: String,
    },

    /// A layer could not be registered with the merge store
    #[error("unable to merge configuration layers: {0}")]
    Merge(String),

    /// The process-wide snapshot was already installed
    #[error("application config snapshot is already installed")]
    AlreadyInstalled,
}

impl ConfigError {
    /// Creates a validation error for the given section
    pub fn validation(section: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Validation {
            section,
            reason: reason.into(),
        }
    }

    /// Returns true for the "no configuration file anywhere" outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::NotFound { .. })
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Main dbapi error type
///
/// This is the error type used outside the configuration layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Logging setup errors
    #[error("Logging error: {0}")]
    Logging(String),
}
