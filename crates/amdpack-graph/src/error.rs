use std::path::PathBuf;

use crate::runtime::RuntimeError;

/// Errors that abort closure discovery.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Failed to read file '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    #[error("File '{}' is not valid UTF-8", path.display())]
    InvalidUtf8 { path: PathBuf },

    #[error("Failed to list directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    /// Every include was missing or excluded.
    #[error("no usable include files")]
    NoUsableIncludes,
}

pub type Result<T> = std::result::Result<T, GraphError>;
