//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("no configuration documents found in {}", .0.display())]
    NoDocuments(PathBuf),

    #[error("unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error(
        "bundle '{id}' is declared in both {} and {}",
        first.display(),
        second.display()
    )]
    DuplicateBundle {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("base url not found: {}", .0.display())]
    BaseUrlNotFound(PathBuf),

    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Actionable hint for the user, when one is known.
    pub fn hint(&self) -> Option<&str> {
        match self {
            ConfigError::SchemaValidation { hint, .. } => hint.as_deref(),
            ConfigError::NoDocuments(_) => {
                Some("Create an amdpack.json file or pass --config <path>")
            }
            ConfigError::UnsupportedFormat(_) => Some("Use a .json or .toml document"),
            _ => None,
        }
    }
}
