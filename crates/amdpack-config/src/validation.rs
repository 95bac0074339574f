//! Pluggable config validation strategies
//!
//! Separates schema validation (pure, no I/O) from filesystem validation
//! (for CLI use).

use crate::config::Configuration;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &Configuration) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use amdpack_config::{ConfigDocument, Configuration, ConfigValidator, SchemaValidator};
/// use serde_json::json;
///
/// let doc = ConfigDocument::from_value(json!({
///     "autoBundles": {
///         "main": { "outputPath": "bundles", "include": [{ "file": "app/main" }] }
///     }
/// }))
/// .unwrap();
/// let config = Configuration::from_documents([("/site/amdpack.json".into(), doc)]).unwrap();
///
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &Configuration) -> Result<()> {
        for bundle in &config.bundles {
            if bundle.id.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: format!(
                        "bundle ids cannot be blank (declared in {})",
                        bundle.config_path.display()
                    ),
                    hint: Some("Give every entry in 'autoBundles' a name".to_string()),
                });
            }

            if bundle.output_path.as_os_str().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: format!("bundle '{}' has no outputPath", bundle.id),
                    hint: Some("Set 'outputPath' to a directory or a .js file".to_string()),
                });
            }

            if bundle.includes.is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: format!("bundle '{}' has no include rules", bundle.id),
                    hint: Some("Add at least one { \"file\" } or { \"directory\" } include".to_string()),
                });
            }

            let blank = bundle
                .includes
                .iter()
                .chain(&bundle.excludes)
                .find(|item| item.path().trim().is_empty());
            if let Some(item) = blank {
                return Err(ConfigError::SchemaValidation {
                    message: format!("bundle '{}' has an empty {} rule", bundle.id, item),
                    hint: Some("Remove empty strings from 'include' and 'exclude'".to_string()),
                });
            }
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs schema validation, then checks that every document's `baseUrl`
/// exists on disk.
pub struct FsValidator;

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &Configuration) -> Result<()> {
        SchemaValidator.validate(config)?;

        for doc in &config.documents {
            if !doc.base_url.is_dir() {
                return Err(ConfigError::BaseUrlNotFound(doc.base_url.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigDocument;
    use serde_json::{json, Value};
    use std::path::PathBuf;

    fn config(value: Value) -> Configuration {
        let doc = ConfigDocument::from_value(value).unwrap();
        Configuration::from_documents([(PathBuf::from("/site/amdpack.json"), doc)]).unwrap()
    }

    #[test]
    fn rejects_missing_output_path() {
        let config = config(json!({
            "autoBundles": { "main": { "include": [{ "file": "app/main" }] } }
        }));

        let err = SchemaValidator.validate(&config).unwrap_err();
        assert!(err.to_string().contains("outputPath"));
        assert!(err.hint().is_some());
    }

    #[test]
    fn rejects_empty_includes() {
        let config = config(json!({
            "autoBundles": { "main": { "outputPath": "out" } }
        }));

        let err = SchemaValidator.validate(&config).unwrap_err();
        assert!(err.to_string().contains("no include rules"));
    }

    #[test]
    fn rejects_blank_exclude() {
        let config = config(json!({
            "autoBundles": {
                "main": {
                    "outputPath": "out",
                    "include": [{ "file": "app/main" }],
                    "exclude": [{ "directory": " " }]
                }
            }
        }));

        assert!(SchemaValidator.validate(&config).is_err());
    }

    #[test]
    fn fs_validator_requires_base_url() {
        let config = config(json!({ "baseUrl": "does-not-exist" }));
        let err = FsValidator.validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::BaseUrlNotFound(_)));
    }
}
