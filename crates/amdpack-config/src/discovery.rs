//! File-based config discovery for CLI use
//!
//! Handles finding and loading amdpack configuration documents in a project
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{load_configuration, Configuration};
use crate::error::{ConfigError, Result};

const PRIMARY_NAMES: [&str; 2] = ["amdpack.json", "amdpack.toml"];
const SECONDARY_SUFFIX: &str = ".amdpack.json";

/// File-based configuration discovery
///
/// Searches a project root for configuration documents and loads them into
/// one `Configuration`. Library users can call `load_configuration` directly.
///
/// # Example
///
/// ```no_run
/// use amdpack_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find configuration documents in the root directory.
    ///
    /// Order:
    /// 1. `amdpack.json`, then `amdpack.toml`
    /// 2. every `*.amdpack.json`, sorted by file name
    pub fn find(&self) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = PRIMARY_NAMES
            .iter()
            .map(|name| self.root.join(name))
            .filter(|path| path.is_file())
            .collect();

        let mut secondary: Vec<PathBuf> = match fs::read_dir(&self.root) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file()
                        && path
                            .file_name()
                            .and_then(|name| name.to_str())
                            .is_some_and(|name| name.ends_with(SECONDARY_SUFFIX))
                })
                .collect(),
            Err(_) => Vec::new(),
        };
        secondary.sort();
        found.extend(secondary);

        found
    }

    /// Load every discovered document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoDocuments` if nothing is found.
    pub fn load(&self) -> Result<Configuration> {
        let paths = self.find();
        if paths.is_empty() {
            return Err(ConfigError::NoDocuments(self.root.clone()));
        }
        load_configuration(&paths)
    }
}

/// Discover and load config from the current directory (convenience function)
pub fn discover() -> Result<Configuration> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}
