//! In-memory `Runtime` for tests.
//!
//! Files live in a map keyed by cleaned absolute path; directories are
//! implied by the files below them.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use path_clean::PathClean;

use super::{DirEntry, Runtime, RuntimeError, RuntimeResult};

#[derive(Debug)]
pub struct MemoryRuntime {
    cwd: PathBuf,
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemoryRuntime {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            files: RwLock::new(BTreeMap::new()),
        }
    }

    /// Add a file; relative paths are anchored at the runtime's cwd.
    pub fn insert(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = self.absolute(path.as_ref());
        self.files.write().insert(path, content.into());
    }

    /// Builder-style `insert`.
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.clean()
        } else {
            self.cwd.join(path).clean()
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = self.absolute(path);
        self.files
            .read()
            .keys()
            .any(|file| file != &path && file.starts_with(&path))
    }
}

#[async_trait]
impl Runtime for MemoryRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        self.files
            .read()
            .get(&self.absolute(path))
            .cloned()
            .ok_or(RuntimeError::NotFound)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.read().contains_key(&self.absolute(path))
    }

    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<DirEntry>> {
        let dir = self.absolute(path);
        if !self.is_dir(&dir) {
            return Err(RuntimeError::NotFound);
        }

        // name -> has children below it
        let mut children: BTreeMap<String, bool> = BTreeMap::new();
        for file in self.files.read().keys() {
            let Ok(rest) = file.strip_prefix(&dir) else {
                continue;
            };
            let mut components = rest.components();
            if let Some(Component::Normal(name)) = components.next() {
                if let Some(name) = name.to_str() {
                    *children.entry(name.to_string()).or_default() |=
                        components.next().is_some();
                }
            }
        }

        Ok(children
            .into_iter()
            .map(|(name, is_dir)| {
                if is_dir {
                    DirEntry::directory(name)
                } else {
                    DirEntry::file(name)
                }
            })
            .collect())
    }

    async fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf> {
        let path = self.absolute(path);
        if self.is_dir(&path) || self.files.read().contains_key(&path) {
            Ok(path)
        } else {
            Err(RuntimeError::NotFound)
        }
    }
}
