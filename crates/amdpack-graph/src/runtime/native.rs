//! Disk-backed runtime.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::task;

use super::{DirEntry, EntryKind, Runtime, RuntimeError, RuntimeResult};

/// Reads scripts from the local filesystem.
///
/// Filesystem calls run on tokio's blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    pub fn new() -> Self {
        Self
    }
}

async fn blocking<T, F>(f: F) -> RuntimeResult<T>
where
    F: FnOnce() -> RuntimeResult<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|e| RuntimeError::Join(e.to_string()))?
}

fn list(dir: PathBuf) -> RuntimeResult<Vec<DirEntry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(String::from) else {
            tracing::debug!("Skipping non UTF-8 entry in {}", dir.display());
            continue;
        };

        // Follows symlinks, so a linked script directory is expanded too.
        let kind = match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_dir() => EntryKind::Directory,
            Ok(meta) if meta.is_file() => EntryKind::File,
            Ok(_) => continue,
            Err(err) => {
                tracing::debug!("Skipping {}: {}", entry.path().display(), err);
                continue;
            }
        };

        entries.push(DirEntry { name, kind });
    }

    Ok(entries)
}

#[async_trait]
impl Runtime for NativeRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        let path = path.to_path_buf();
        blocking(move || Ok(fs::read(path)?)).await
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<DirEntry>> {
        let path = path.to_path_buf();
        blocking(move || list(path)).await
    }

    async fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf> {
        let path = path.to_path_buf();
        blocking(move || Ok(fs::canonicalize(path)?)).await
    }
}
