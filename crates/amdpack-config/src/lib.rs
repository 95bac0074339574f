//! # amdpack-config
//!
//! Configuration model for amdpack auto-bundles.
//!
//! A project declares its bundles in one or more configuration documents
//! (`amdpack.json`, `amdpack.toml`, or `*.amdpack.json`). Each document
//! carries a `baseUrl`, module path aliases, and a set of named auto-bundles
//! built from include and exclude rules.
//!
//! ```no_run
//! use amdpack_config::{ConfigDiscovery, ConfigValidator, SchemaValidator};
//!
//! let config = ConfigDiscovery::new("./web").load().unwrap();
//! SchemaValidator.validate(&config).unwrap();
//!
//! for bundle in &config.bundles {
//!     println!("{} -> {}", bundle.id, bundle.output_path.display());
//! }
//! ```

pub mod bundle;
pub mod config;
pub mod discovery;
pub mod error;
pub mod expand;
pub mod validation;

pub use bundle::{AutoBundleOptions, BundleItem, BundleSpec, CompressionType};
pub use config::{load_configuration, load_document, ConfigDocument, Configuration, SourceDocument};
pub use discovery::{discover, ConfigDiscovery};
pub use error::{ConfigError, Result};
pub use expand::expand_paths;
pub use validation::{ConfigValidator, FsValidator, SchemaValidator};
