//! Include and exclude item resolution.
//!
//! `file` items go through the path resolver; items that do not resolve are
//! dropped with a warning, loader-handled ids (URLs, plugins) are dropped
//! quietly. `directory` items expand to every `.js` file beneath them.

use std::path::{Path, PathBuf};

use amdpack_config::{expand_paths, BundleItem, Configuration};
use amdpack_graph::{expand_directory, PathResolver, PhysicalPath, ResolveResult, Runtime};
use rustc_hash::FxHashSet;

/// Physical files selected by a list of items, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedItems {
    pub paths: Vec<PhysicalPath>,
    /// Items that selected no file at all.
    pub dropped: Vec<BundleItem>,
}

impl ResolvedItems {
    pub fn into_set(self) -> FxHashSet<PhysicalPath> {
        self.paths.into_iter().collect()
    }
}

/// Resolve `items` relative to `base_url`.
///
/// Duplicates (case-insensitive) keep their first position.
pub async fn resolve_items(
    runtime: &dyn Runtime,
    resolver: &dyn PathResolver,
    items: &[BundleItem],
    base_url: &Path,
    config: &Configuration,
) -> ResolvedItems {
    let mut resolved = ResolvedItems::default();
    let mut seen: FxHashSet<PhysicalPath> = FxHashSet::default();

    for item in items {
        let found = match item {
            BundleItem::File(id) => match resolver.resolve(id, base_url, None, config) {
                ResolveResult::Local(path) => vec![path],
                ResolveResult::External(id) => {
                    tracing::debug!("Skipping loader-handled item '{}'", id);
                    Vec::new()
                }
                ResolveResult::Unresolved(id) => {
                    tracing::warn!("Item '{}' does not resolve to a file under {}", id, base_url.display());
                    Vec::new()
                }
            },
            BundleItem::Directory(dir) => {
                let dir = directory_path(dir, base_url, config);
                match expand_directory(runtime, &dir).await {
                    Ok(files) => files,
                    Err(err) => {
                        tracing::warn!("Directory item '{}' skipped: {}", item.path(), err);
                        Vec::new()
                    }
                }
            }
        };

        if found.is_empty() {
            resolved.dropped.push(item.clone());
        }

        for path in found {
            if seen.insert(path.clone()) {
                resolved.paths.push(path);
            }
        }
    }

    resolved
}

fn directory_path(raw: &str, base_url: &Path, config: &Configuration) -> PathBuf {
    let expanded = expand_paths(raw.trim_end_matches('/'), config);
    let path = Path::new(&expanded);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_url.join(path)
    }
}
