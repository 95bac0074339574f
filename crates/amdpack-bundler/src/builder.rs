//! Bundle orchestration.
//!
//! Per declared bundle: resolve items → build closure → pack → assemble.
//! Bundles are built one after another in declaration order; the first
//! fatal error aborts the run.

use std::fmt;
use std::sync::Arc;

use amdpack_config::{BundleItem, BundleSpec, Configuration};
use amdpack_graph::{
    order, ClosureBuilder, CycleBreak, GraphError, ResolveContext, Runtime, UnresolvedDependency,
};
use serde::Serialize;

use crate::bundle::{assemble, Bundle};
use crate::includes::resolve_items;
use crate::{Error, Result};

/// Non-fatal finding attached to a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BuildDiagnostic {
    /// An include item selected no file and was left out of the bundle.
    UnresolvedInclude { bundle_id: String, item: BundleItem },
    UnresolvedPath {
        bundle_id: String,
        #[serde(flatten)]
        dependency: UnresolvedDependency,
    },
    CycleBreak {
        bundle_id: String,
        #[serde(flatten)]
        cycle: CycleBreak,
    },
}

impl BuildDiagnostic {
    pub fn bundle_id(&self) -> &str {
        match self {
            BuildDiagnostic::UnresolvedInclude { bundle_id, .. }
            | BuildDiagnostic::UnresolvedPath { bundle_id, .. }
            | BuildDiagnostic::CycleBreak { bundle_id, .. } => bundle_id,
        }
    }
}

impl fmt::Display for BuildDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildDiagnostic::UnresolvedInclude { bundle_id, item } => {
                write!(f, "[{bundle_id}] include '{item}' selected no files")
            }
            BuildDiagnostic::UnresolvedPath {
                bundle_id,
                dependency,
            } => write!(f, "[{bundle_id}] {dependency}"),
            BuildDiagnostic::CycleBreak { bundle_id, cycle } => {
                write!(f, "[{bundle_id}] {cycle}")
            }
        }
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub bundles: Vec<Bundle>,
    pub diagnostics: Vec<BuildDiagnostic>,
}

impl BuildReport {
    pub fn file_count(&self) -> usize {
        self.bundles.iter().map(Bundle::len).sum()
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

#[derive(Debug)]
pub struct BundleBuilder {
    closure: ClosureBuilder,
}

impl BundleBuilder {
    pub fn new(runtime: Arc<dyn Runtime>) -> Self {
        Self {
            closure: ClosureBuilder::new(runtime),
        }
    }

    /// Use a preconfigured closure builder (custom resolver or extractor).
    pub fn with_closure_builder(closure: ClosureBuilder) -> Self {
        Self { closure }
    }

    /// Build every bundle declared in `config`.
    ///
    /// # Errors
    ///
    /// `Error::EmptyBundle` when a bundle's includes select no usable file,
    /// `Error::Graph` when a selected file cannot be read.
    pub async fn build_all(&self, config: &Configuration) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        for spec in &config.bundles {
            let (bundle, diagnostics) = self.build_bundle(spec, config).await?;
            report.bundles.push(bundle);
            report.diagnostics.extend(diagnostics);
        }

        tracing::info!(
            "Built {} bundles ({} files, {} diagnostics)",
            report.bundles.len(),
            report.file_count(),
            report.diagnostics.len()
        );

        Ok(report)
    }

    /// Build one bundle.
    pub async fn build_bundle(
        &self,
        spec: &BundleSpec,
        config: &Configuration,
    ) -> Result<(Bundle, Vec<BuildDiagnostic>)> {
        let runtime = self.closure.runtime().as_ref();
        let resolver = self.closure.resolver();

        let includes =
            resolve_items(runtime, resolver, &spec.includes, &spec.base_url, config).await;
        let excludes = resolve_items(runtime, resolver, &spec.excludes, &spec.base_url, config)
            .await
            .into_set();

        let empty = || Error::EmptyBundle {
            bundle_id: spec.id.clone(),
            includes: spec.includes.clone(),
            excludes: spec.excludes.clone(),
        };

        if includes.paths.iter().all(|path| excludes.contains(path)) {
            return Err(empty());
        }

        let ctx = ResolveContext {
            config,
            base_url: &spec.base_url,
        };
        let closure = self
            .closure
            .build_closure(&includes.paths, &excludes, ctx)
            .await
            .map_err(|source| match source {
                GraphError::NoUsableIncludes => empty(),
                source => Error::Graph {
                    bundle_id: spec.id.clone(),
                    source,
                },
            })?;

        let mut diagnostics: Vec<BuildDiagnostic> = includes
            .dropped
            .into_iter()
            .map(|item| BuildDiagnostic::UnresolvedInclude {
                bundle_id: spec.id.clone(),
                item,
            })
            .collect();
        diagnostics.extend(closure.unresolved.into_iter().map(|dependency| {
            BuildDiagnostic::UnresolvedPath {
                bundle_id: spec.id.clone(),
                dependency,
            }
        }));

        let packed = order(closure.files, &excludes, spec.compression_type);
        diagnostics.extend(
            packed
                .forced_flushes
                .into_iter()
                .map(|cycle| BuildDiagnostic::CycleBreak {
                    bundle_id: spec.id.clone(),
                    cycle,
                }),
        );

        let bundle = assemble(spec, packed.files);
        tracing::info!(
            "Bundle '{}': {} files -> {}",
            bundle.bundle_id,
            bundle.len(),
            bundle.output.display()
        );

        Ok((bundle, diagnostics))
    }
}
