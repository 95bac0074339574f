use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Compression applied to bundled files.
///
/// The value is carried through to every file placed in the bundle. amdpack
/// itself never rewrites code for size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionType {
    /// Files are concatenated as-is (default)
    #[default]
    None,
    /// Files are marked for standard compression by downstream tooling
    Standard,
}

/// A single include or exclude rule.
///
/// Serialized as `{ "file": "..." }` or `{ "directory": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleItem {
    /// One logical module id, relative path, or URL.
    File(String),
    /// Every `.js` file below a directory, recursively.
    Directory(String),
}

impl BundleItem {
    pub fn path(&self) -> &str {
        match self {
            BundleItem::File(path) | BundleItem::Directory(path) => path,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, BundleItem::Directory(_))
    }
}

impl std::fmt::Display for BundleItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BundleItem::File(path) => write!(f, "file:{}", path),
            BundleItem::Directory(path) => write!(f, "directory:{}", path),
        }
    }
}

/// Auto-bundle declaration as written in a configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoBundleOptions {
    #[serde(default)]
    pub output_path: String,

    #[serde(default)]
    pub compression_type: CompressionType,

    #[serde(default)]
    pub include: Vec<BundleItem>,

    #[serde(default)]
    pub exclude: Vec<BundleItem>,
}

/// A fully loaded bundle declaration, bound to the document that declared it.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleSpec {
    pub id: String,
    pub includes: Vec<BundleItem>,
    pub excludes: Vec<BundleItem>,
    pub compression_type: CompressionType,
    /// Output location as declared; relative paths are anchored at the
    /// owning document's directory.
    pub output_path: PathBuf,
    /// Path of the configuration document that declared this bundle.
    pub config_path: PathBuf,
    /// Absolute directory logical module ids are resolved against.
    pub base_url: PathBuf,
}

impl BundleSpec {
    /// Directory containing the owning configuration document.
    pub fn config_dir(&self) -> PathBuf {
        self.config_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default()
    }
}
