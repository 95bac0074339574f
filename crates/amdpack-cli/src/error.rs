//! Error handling for the amdpack CLI.
//!
//! Commands return [`CliError`]; `main` turns it into a miette report.

mod miette;

use std::path::PathBuf;
use thiserror::Error;

pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The `--project` directory does not exist. Checked before any work.
    #[error("Project directory not found: {}", .0.display())]
    ProjectNotFound(PathBuf),

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] amdpack_config::ConfigError),

    /// Bundle construction or output writing failed
    #[error(transparent)]
    Bundler(#[from] amdpack_bundler::Error),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
