//! Configuration documents and the merged `Configuration`.
//!
//! Each document is loaded on its own through figment so that its bundles
//! remember where they were declared. Documents are then merged in order:
//! aliases from later documents win, bundle ids must stay unique.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Json, Toml};
use indexmap::IndexMap;
use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bundle::{AutoBundleOptions, BundleSpec};
use crate::error::{ConfigError, Result};

/// Environment variable prefix for overrides (`AMDPACK_BASE_URL`).
pub const ENV_PREFIX: &str = "AMDPACK_";

fn default_base_url() -> String {
    ".".to_string()
}

/// One configuration document as written on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub paths: IndexMap<String, String>,

    #[serde(default)]
    pub auto_bundles: IndexMap<String, AutoBundleOptions>,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            paths: IndexMap::new(),
            auto_bundles: IndexMap::new(),
        }
    }
}

impl ConfigDocument {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// ```
    /// use amdpack_config::ConfigDocument;
    /// use serde_json::json;
    ///
    /// let doc = ConfigDocument::from_value(json!({
    ///     "baseUrl": "scripts",
    ///     "autoBundles": {
    ///         "main": { "outputPath": "bundles", "include": [{ "file": "app/main" }] }
    ///     }
    /// }))
    /// .unwrap();
    /// assert_eq!(doc.auto_bundles.len(), 1);
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<value>"),
            message: e.to_string(),
        })
    }
}

/// A loaded document's identity inside a merged configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    pub path: PathBuf,
    /// Absolute `baseUrl`, anchored at the document's directory.
    pub base_url: PathBuf,
}

/// The merged configuration for one run.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    pub documents: Vec<SourceDocument>,
    pub paths: IndexMap<String, String>,
    pub bundles: Vec<BundleSpec>,
}

impl Configuration {
    /// Merge already-parsed documents. `path` is the location each document
    /// would have on disk; it anchors `baseUrl` and every output path.
    pub fn from_documents(
        documents: impl IntoIterator<Item = (PathBuf, ConfigDocument)>,
    ) -> Result<Self> {
        let mut config = Configuration::default();

        for (path, document) in documents {
            let path = absolutize(&path)?;
            let config_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            let base_url = config_dir.join(&document.base_url).clean();

            for (alias, target) in document.paths {
                config.paths.insert(alias, target);
            }

            for (id, options) in document.auto_bundles {
                if let Some(existing) = config.bundles.iter().find(|b| b.id == id) {
                    return Err(ConfigError::DuplicateBundle {
                        id,
                        first: existing.config_path.clone(),
                        second: path,
                    });
                }

                config.bundles.push(BundleSpec {
                    id,
                    includes: options.include,
                    excludes: options.exclude,
                    compression_type: options.compression_type,
                    output_path: PathBuf::from(options.output_path),
                    config_path: path.clone(),
                    base_url: base_url.clone(),
                });
            }

            config.documents.push(SourceDocument { path, base_url });
        }

        Ok(config)
    }

    /// `baseUrl` of the first document, used when no document context exists.
    pub fn base_url(&self) -> Option<&Path> {
        self.documents.first().map(|doc| doc.base_url.as_path())
    }

    pub fn bundle(&self, id: &str) -> Option<&BundleSpec> {
        self.bundles.iter().find(|b| b.id == id)
    }
}

/// Load and parse a single configuration document.
///
/// `.json` and `.toml` documents are supported. `AMDPACK_BASE_URL`, when
/// set, overrides the document's `baseUrl`.
pub fn load_document(path: &Path) -> Result<ConfigDocument> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let figment = match extension.as_deref() {
        Some("json") => Figment::new().merge(Json::file(path)),
        Some("toml") => Figment::new().merge(Toml::file(path)),
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    let figment = figment.merge(
        Env::prefixed(ENV_PREFIX)
            .only(&["base_url"])
            .map(|_| "baseUrl".into()),
    );

    let document: ConfigDocument = figment.extract().map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::debug!(
        "Loaded {} ({} bundles, {} aliases)",
        path.display(),
        document.auto_bundles.len(),
        document.paths.len()
    );

    Ok(document)
}

/// Load every document in order and merge them into one `Configuration`.
///
/// Any unreadable or malformed document is a fatal error naming the file.
pub fn load_configuration<P: AsRef<Path>>(paths: &[P]) -> Result<Configuration> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let path = absolutize(path.as_ref())?;
        let document = load_document(&path)?;
        documents.push((path, document));
    }
    Configuration::from_documents(documents)
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.clean())
    } else {
        Ok(std::env::current_dir()?.join(path).clean())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{BundleItem, CompressionType};
    use serde_json::json;

    fn document(value: Value) -> ConfigDocument {
        ConfigDocument::from_value(value).unwrap()
    }

    #[test]
    fn from_documents_anchors_base_url_at_document_dir() {
        let doc = document(json!({
            "baseUrl": "scripts",
            "autoBundles": {
                "main": { "outputPath": "bundles", "include": [{ "file": "app/main" }] }
            }
        }));

        let config =
            Configuration::from_documents([(PathBuf::from("/site/amdpack.json"), doc)]).unwrap();

        assert_eq!(config.base_url(), Some(Path::new("/site/scripts")));
        let bundle = config.bundle("main").unwrap();
        assert_eq!(bundle.base_url, PathBuf::from("/site/scripts"));
        assert_eq!(bundle.config_path, PathBuf::from("/site/amdpack.json"));
        assert_eq!(bundle.includes, vec![BundleItem::File("app/main".into())]);
        assert_eq!(bundle.compression_type, CompressionType::None);
    }

    #[test]
    fn later_documents_override_aliases() {
        let first = document(json!({ "paths": { "jquery": "lib/jquery-1.9" } }));
        let second = document(json!({ "paths": { "jquery": "lib/jquery-2.0" } }));

        let config = Configuration::from_documents([
            (PathBuf::from("/site/a.json"), first),
            (PathBuf::from("/site/b.json"), second),
        ])
        .unwrap();

        assert_eq!(config.paths["jquery"], "lib/jquery-2.0");
        assert_eq!(config.documents.len(), 2);
    }

    #[test]
    fn duplicate_bundle_ids_are_rejected() {
        let bundle = json!({
            "autoBundles": { "main": { "outputPath": "out", "include": [{ "file": "a" }] } }
        });

        let err = Configuration::from_documents([
            (PathBuf::from("/site/a.json"), document(bundle.clone())),
            (PathBuf::from("/site/b.json"), document(bundle)),
        ])
        .unwrap_err();

        assert!(matches!(err, ConfigError::DuplicateBundle { ref id, .. } if id == "main"));
    }

    #[test]
    fn default_base_url_is_document_dir() {
        let config = Configuration::from_documents([(
            PathBuf::from("/site/amdpack.json"),
            ConfigDocument::default(),
        )])
        .unwrap();

        assert_eq!(config.base_url(), Some(Path::new("/site")));
    }
}
