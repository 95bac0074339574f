//! Override documents.
//!
//! One document per configuration file. For every bundle it lists the
//! scripts folded into the bundle and a `paths` rule redirecting each of
//! them to the bundle output, all as loader-relative module ids:
//!
//! ```json
//! {
//!   "overrides": {
//!     "main": {
//!       "bundledScripts": ["app/main", "app/util"],
//!       "paths": { "app/main": "bundles/main", "app/util": "bundles/main" }
//!     }
//!   }
//! }
//! ```

use std::path::{Path, PathBuf};

use amdpack_graph::logical_id;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::bundle::Bundle;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideDocument {
    pub overrides: IndexMap<String, BundleOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleOverride {
    pub bundled_scripts: Vec<String>,
    pub paths: IndexMap<String, String>,
}

impl OverrideDocument {
    /// Number of rewrite rules across all bundles.
    pub fn rule_count(&self) -> usize {
        self.overrides.values().map(|b| b.paths.len()).sum()
    }

    /// Bundle output `original` is redirected to.
    pub fn target_of(&self, original: &str) -> Option<&str> {
        self.overrides
            .values()
            .find_map(|b| b.paths.get(original))
            .map(String::as_str)
    }
}

/// Group `bundles` by containing configuration and build their documents.
///
/// Keys are configuration paths in order of first appearance. A script
/// claimed by two bundles of the same configuration is reported but left
/// in both; keeping memberships disjoint is up to the configuration.
pub fn compose(bundles: &[Bundle]) -> IndexMap<PathBuf, OverrideDocument> {
    let mut documents: IndexMap<PathBuf, OverrideDocument> = IndexMap::new();
    let mut owners: FxHashMap<(PathBuf, String), String> = FxHashMap::default();

    for bundle in bundles {
        let output_id = logical_id(&bundle.output, &bundle.base_url);
        let mut entry = BundleOverride::default();

        for file in &bundle.files {
            let original = logical_id(file.file_name.as_path(), &bundle.base_url);

            let key = (bundle.containing_config.clone(), original.clone());
            if let Some(owner) = owners.insert(key, bundle.bundle_id.clone()) {
                tracing::warn!(
                    "'{}' is bundled by both '{}' and '{}'",
                    original,
                    owner,
                    bundle.bundle_id
                );
            }

            entry.bundled_scripts.push(original.clone());
            entry.paths.insert(original, output_id.clone());
        }

        documents
            .entry(bundle.containing_config.clone())
            .or_default()
            .overrides
            .insert(bundle.bundle_id.clone(), entry);
    }

    documents
}

/// Where the override document for `config_path` is written:
/// `dir/name.ext` becomes `dir/name.override.json`.
pub fn override_path_for(config_path: &Path) -> PathBuf {
    let stem = config_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "amdpack".to_string());
    config_path.with_file_name(format!("{stem}.override.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use amdpack_config::CompressionType;
    use amdpack_graph::{FileSpec, PhysicalPath};

    fn bundle(id: &str, config: &str, files: &[&str]) -> Bundle {
        Bundle {
            bundle_id: id.into(),
            files: files
                .iter()
                .map(|f| FileSpec {
                    file_name: PhysicalPath::new(format!("/web/scripts/{f}.js")),
                    file_content: String::new(),
                    compression_type: CompressionType::None,
                })
                .collect(),
            output: PathBuf::from(format!("/web/scripts/bundles/{id}.js")),
            containing_config: PathBuf::from(config),
            base_url: PathBuf::from("/web/scripts"),
        }
    }

    #[test]
    fn groups_by_containing_config() {
        let docs = compose(&[
            bundle("a", "/web/one.json", &["x"]),
            bundle("b", "/web/two.json", &["y"]),
            bundle("c", "/web/one.json", &["z"]),
        ]);

        assert_eq!(docs.len(), 2);
        let one = &docs[Path::new("/web/one.json")];
        assert_eq!(one.overrides.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(one.target_of("z"), Some("bundles/c"));
    }

    #[test]
    fn serializes_with_loader_field_names() {
        let docs = compose(&[bundle("main", "/web/amdpack.json", &["app/main"])]);
        let json = serde_json::to_value(&docs[0]).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "overrides": {
                    "main": {
                        "bundledScripts": ["app/main"],
                        "paths": { "app/main": "bundles/main" }
                    }
                }
            })
        );
    }

    #[test]
    fn override_path_replaces_extension() {
        assert_eq!(
            override_path_for(Path::new("/web/amdpack.json")),
            Path::new("/web/amdpack.override.json")
        );
        assert_eq!(
            override_path_for(Path::new("/web/admin.amdpack.toml")),
            Path::new("/web/admin.amdpack.override.json")
        );
    }
}
