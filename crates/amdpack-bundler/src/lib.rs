//! # amdpack-bundler
//!
//! Turns declared auto-bundles into bundle files and override documents.
//!
//! For every bundle in a [`Configuration`], the builder resolves include and
//! exclude items to physical files, discovers their closure, orders it with
//! the cycle-tolerant packer and assembles a [`Bundle`]. Bundles are then
//! grouped by the configuration document that declared them and composed
//! into one [`OverrideDocument`] per document, redirecting the module loader
//! from each original script to its bundle.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use amdpack_bundler::{compose, write_all, BundleBuilder};
//! use amdpack_config::ConfigDiscovery;
//! use amdpack_graph::NativeRuntime;
//!
//! # async fn run() -> amdpack_bundler::Result<()> {
//! let config = ConfigDiscovery::new("./web").load()?;
//! let report = BundleBuilder::new(Arc::new(NativeRuntime)).build_all(&config).await?;
//!
//! let overrides = compose(&report.bundles);
//! write_all(&report.bundles, &overrides)?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod bundle;
pub mod includes;
pub mod overrides;
pub mod writer;

pub use builder::{BuildDiagnostic, BuildReport, BundleBuilder};
pub use bundle::{assemble, Bundle};
pub use includes::{resolve_items, ResolvedItems};
pub use overrides::{compose, override_path_for, BundleOverride, OverrideDocument};
pub use writer::{render_bundle, write_all, write_bundle, write_override_document, WriteSummary};

// Re-export foundation types used in this crate's API
pub use amdpack_config::{BundleItem, BundleSpec, CompressionType, ConfigError, Configuration};
pub use amdpack_graph::{CycleBreak, FileSpec, GraphError, PhysicalPath, UnresolvedDependency};

use miette::Diagnostic;

/// Error types for amdpack-bundler operations.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum Error {
    /// Include resolution left nothing to bundle.
    #[error(
        "Bundle '{bundle_id}' has no usable include files (include: [{}], exclude: [{}])",
        format_items(.includes),
        format_items(.excludes)
    )]
    #[diagnostic(
        code(amdpack::bundle::empty),
        help("Check that each include resolves to an existing .js file under baseUrl and is not excluded")
    )]
    EmptyBundle {
        bundle_id: String,
        includes: Vec<BundleItem>,
        excludes: Vec<BundleItem>,
    },

    /// Closure discovery failed for a bundle.
    #[error("Bundle '{bundle_id}': {source}")]
    #[diagnostic(code(amdpack::bundle::graph))]
    Graph {
        bundle_id: String,
        #[source]
        source: GraphError,
    },

    /// Invalid or missing configuration.
    #[error(transparent)]
    #[diagnostic(code(amdpack::config::invalid))]
    Config(#[from] ConfigError),

    /// Output path cannot be written to.
    #[error("Invalid output path: {0}")]
    #[diagnostic(code(amdpack::output::invalid_path))]
    InvalidOutputPath(String),

    /// File write operation failed.
    #[error("Write failure: {0}")]
    #[diagnostic(code(amdpack::output::write_failed))]
    WriteFailure(String),

    /// Override document serialization failed.
    #[error("Failed to serialize override document: {0}")]
    #[diagnostic(code(amdpack::output::serialize_failed))]
    Json(#[from] serde_json::Error),
}

/// Result type alias for amdpack-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

fn format_items(items: &[BundleItem]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
