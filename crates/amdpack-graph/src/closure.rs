//! Closure builder.
//!
//! Breadth-first discovery of every file reachable from a bundle's includes.
//! Excludes are checked when a path is dequeued, so a file reachable only
//! through an excluded file never enters the closure.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use amdpack_config::Configuration;
use rustc_hash::FxHashSet;

use crate::diagnostics::UnresolvedDependency;
use crate::error::{GraphError, Result};
use crate::extractor::{AmdExtractor, DependencyExtractor};
use crate::path::{is_loader_addressable, logical_id, PhysicalPath};
use crate::resolver::{ModuleResolver, PathResolver, ResolveResult};
use crate::runtime::Runtime;

/// A discovered module file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: PhysicalPath,
    /// Content after `DependencyExtractor::rewrite_content`.
    pub content: String,
    /// Resolved direct dependencies, deduplicated.
    pub dependencies: Vec<PhysicalPath>,
}

/// Output of one discovery run.
#[derive(Debug, Clone, Default)]
pub struct Closure {
    /// Files in discovery (dequeue) order.
    pub files: Vec<ResolvedFile>,
    pub unresolved: Vec<UnresolvedDependency>,
}

impl Closure {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &PhysicalPath) -> bool {
        self.files.iter().any(|file| &file.path == path)
    }
}

/// Explicit resolution context for one bundle.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub config: &'a Configuration,
    pub base_url: &'a Path,
}

pub struct ClosureBuilder {
    runtime: Arc<dyn Runtime>,
    resolver: Arc<dyn PathResolver>,
    extractor: Arc<dyn DependencyExtractor>,
}

impl ClosureBuilder {
    /// Builder with the default `ModuleResolver` and `AmdExtractor`.
    pub fn new(runtime: Arc<dyn Runtime>) -> Self {
        let resolver = Arc::new(ModuleResolver::new(Arc::clone(&runtime)));
        Self {
            runtime,
            resolver,
            extractor: Arc::new(AmdExtractor::new()),
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn PathResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn DependencyExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn resolver(&self) -> &dyn PathResolver {
        self.resolver.as_ref()
    }

    pub fn runtime(&self) -> &Arc<dyn Runtime> {
        &self.runtime
    }

    /// Discover the closure of `includes`, skipping `excludes`.
    ///
    /// Every unique physical path is visited at most once. Reads happen one
    /// at a time because each file's dependencies decide what is queued next.
    ///
    /// # Errors
    ///
    /// `GraphError::NoUsableIncludes` when nothing remains to visit after
    /// excludes are applied, and read errors for files that vanish mid-run.
    pub async fn build_closure(
        &self,
        includes: &[PhysicalPath],
        excludes: &FxHashSet<PhysicalPath>,
        ctx: ResolveContext<'_>,
    ) -> Result<Closure> {
        let mut closure = Closure::default();
        let mut queued: FxHashSet<PhysicalPath> = FxHashSet::default();
        let mut queue: VecDeque<PhysicalPath> = VecDeque::new();

        for include in includes {
            if excludes.contains(include) {
                continue;
            }
            if queued.insert(include.clone()) {
                queue.push_back(include.clone());
            }
        }

        if queue.is_empty() {
            return Err(GraphError::NoUsableIncludes);
        }

        while let Some(path) = queue.pop_front() {
            if excludes.contains(&path) {
                tracing::debug!("Skipping excluded {}", path);
                continue;
            }

            let file = self.visit(&path, ctx, &mut closure.unresolved).await?;

            for dependency in &file.dependencies {
                if queued.insert(dependency.clone()) {
                    queue.push_back(dependency.clone());
                }
            }

            closure.files.push(file);
        }

        if closure.files.is_empty() {
            return Err(GraphError::NoUsableIncludes);
        }

        Ok(closure)
    }

    async fn visit(
        &self,
        path: &PhysicalPath,
        ctx: ResolveContext<'_>,
        unresolved: &mut Vec<UnresolvedDependency>,
    ) -> Result<ResolvedFile> {
        let raw = self.read_file(path.as_path()).await?;
        let declared = self.extractor.extract_dependencies(&raw);

        let mut seen = FxHashSet::default();
        let mut dependencies = Vec::with_capacity(declared.len());

        for id in &declared {
            match self
                .resolver
                .resolve(id, ctx.base_url, Some(path.as_path()), ctx.config)
            {
                ResolveResult::Local(dependency) => {
                    if seen.insert(dependency.clone()) {
                        dependencies.push(dependency);
                    }
                }
                ResolveResult::External(id) => {
                    tracing::trace!("{} depends on external '{}'", path, id);
                }
                ResolveResult::Unresolved(id) => {
                    tracing::warn!("Unresolved dependency '{}' referenced from {}", id, path);
                    unresolved.push(UnresolvedDependency {
                        identifier: id,
                        referenced_from: path.clone(),
                    });
                }
            }
        }

        let module_name = logical_id(path.as_path(), ctx.base_url);
        let mut content = self.extractor.rewrite_content(&raw, &module_name);
        if content != raw && !is_loader_addressable(&module_name) {
            tracing::warn!(
                "{} lies outside baseUrl {}; its anonymous define stays unnamed",
                path,
                ctx.base_url.display()
            );
            content = raw;
        }

        tracing::debug!(
            "Visited {} ({} dependencies, {} declared)",
            module_name,
            dependencies.len(),
            declared.len()
        );

        Ok(ResolvedFile {
            path: path.clone(),
            content,
            dependencies,
        })
    }

    async fn read_file(&self, path: &Path) -> Result<String> {
        let bytes = self
            .runtime
            .read_file(path)
            .await
            .map_err(|source| GraphError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;

        let text = String::from_utf8(bytes).map_err(|_| GraphError::InvalidUtf8 {
            path: path.to_path_buf(),
        })?;

        if let Some(stripped) = text.strip_prefix('\u{feff}') {
            return Ok(stripped.to_string());
        }
        Ok(text)
    }
}

impl std::fmt::Debug for ClosureBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureBuilder")
            .field("runtime", &self.runtime)
            .finish_non_exhaustive()
    }
}
