//! File access used by closure discovery.
//!
//! The closure builder and directory expansion never touch `std::fs`
//! directly. Reads go through [`Runtime`], so a graph can be built from
//! disk ([`NativeRuntime`](native::NativeRuntime)) or from an in-memory
//! script tree ([`MemoryRuntime`](memory::MemoryRuntime)).

pub mod native;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Failure of a single runtime call. The path is attached by the caller.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("no such file or directory")]
    NotFound,

    #[error("{0}")]
    Io(io::Error),

    #[error("blocking task failed: {0}")]
    Join(String),
}

impl From<io::Error> for RuntimeError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            RuntimeError::NotFound
        } else {
            RuntimeError::Io(err)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }
}

#[async_trait]
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Raw bytes of a script.
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// `true` when `path` names an existing regular file.
    ///
    /// Synchronous: the resolver probes a handful of candidates per
    /// dependency and only needs a yes or no.
    fn is_file(&self, path: &Path) -> bool;

    /// Children of `path` that are files or directories, in no
    /// particular order. Other entry types are left out.
    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<DirEntry>>;

    /// Absolute path of `path` with every symlink resolved.
    async fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf>;
}
