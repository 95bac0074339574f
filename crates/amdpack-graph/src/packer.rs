//! Topological packer.
//!
//! Greedy layered ordering over a closure. Each pass emits every remaining
//! file whose dependencies were all emitted in earlier passes (or are
//! excluded). When a pass selects nothing, the whole remainder is flushed in
//! its current order and the flush is recorded as a `CycleBreak`.

use amdpack_config::CompressionType;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::closure::ResolvedFile;
use crate::diagnostics::CycleBreak;
use crate::path::PhysicalPath;

/// One file placed into a bundle, in final emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSpec {
    pub file_name: PhysicalPath,
    pub file_content: String,
    pub compression_type: CompressionType,
}

/// Result of ordering a closure.
#[derive(Debug, Clone, Default)]
pub struct PackedOrder {
    pub files: Vec<FileSpec>,
    pub forced_flushes: Vec<CycleBreak>,
    /// Number of passes taken, forced flush included.
    pub passes: usize,
}

impl PackedOrder {
    pub fn file_names(&self) -> impl Iterator<Item = &PhysicalPath> {
        self.files.iter().map(|file| &file.file_name)
    }

    pub fn is_strict(&self) -> bool {
        self.forced_flushes.is_empty()
    }
}

/// Order `nodes` so that dependencies precede dependents where possible.
///
/// Relative input order is kept within each pass, so the result is
/// deterministic for a given closure. The loop ends after at most
/// `nodes.len()` passes since every pass emits at least one node.
pub fn order(
    nodes: Vec<ResolvedFile>,
    excludes: &FxHashSet<PhysicalPath>,
    compression_type: CompressionType,
) -> PackedOrder {
    let mut packed = PackedOrder {
        files: Vec::with_capacity(nodes.len()),
        ..PackedOrder::default()
    };
    let mut emitted: FxHashSet<PhysicalPath> = FxHashSet::default();
    let mut remaining = nodes;

    while !remaining.is_empty() {
        packed.passes += 1;

        let (ready, blocked): (Vec<ResolvedFile>, Vec<ResolvedFile>) =
            remaining.into_iter().partition(|node| {
                node.dependencies
                    .iter()
                    .all(|dep| emitted.contains(dep) || excludes.contains(dep))
            });

        let batch = if ready.is_empty() {
            let members: Vec<PhysicalPath> = blocked.iter().map(|node| node.path.clone()).collect();
            let cycle = CycleBreak { members };
            tracing::warn!("No module qualified for ordering; {}", cycle);
            packed.forced_flushes.push(cycle);
            remaining = Vec::new();
            blocked
        } else {
            remaining = blocked;
            ready
        };

        for node in batch {
            emitted.insert(node.path.clone());
            packed.files.push(FileSpec {
                file_name: node.path,
                file_content: node.content,
                compression_type,
            });
        }
    }

    tracing::debug!(
        "Packed {} files in {} passes ({} forced)",
        packed.files.len(),
        packed.passes,
        packed.forced_flushes.len()
    );

    packed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, deps: &[&str]) -> ResolvedFile {
        ResolvedFile {
            path: PhysicalPath::new(format!("/p/{name}.js")),
            content: format!("// {name}"),
            dependencies: deps
                .iter()
                .map(|dep| PhysicalPath::new(format!("/p/{dep}.js")))
                .collect(),
        }
    }

    fn names(packed: &PackedOrder) -> Vec<String> {
        packed
            .files
            .iter()
            .map(|file| file.file_content.trim_start_matches("// ").to_string())
            .collect()
    }

    #[test]
    fn leaves_come_first_in_input_order() {
        let packed = order(
            vec![node("a", &["b"]), node("c", &[]), node("b", &[])],
            &FxHashSet::default(),
            CompressionType::None,
        );
        assert_eq!(names(&packed), vec!["c", "b", "a"]);
        assert_eq!(packed.passes, 2);
        assert!(packed.is_strict());
    }

    #[test]
    fn passes_are_layered() {
        // c only qualifies once b was emitted by an earlier pass.
        let packed = order(
            vec![node("c", &["b"]), node("b", &["a"]), node("a", &[])],
            &FxHashSet::default(),
            CompressionType::None,
        );
        assert_eq!(names(&packed), vec!["a", "b", "c"]);
        assert_eq!(packed.passes, 3);
    }

    #[test]
    fn excluded_dependencies_count_as_satisfied() {
        let mut excludes = FxHashSet::default();
        excludes.insert(PhysicalPath::new("/p/vendor.js"));
        let packed = order(
            vec![node("a", &["vendor"])],
            &excludes,
            CompressionType::Standard,
        );
        assert_eq!(names(&packed), vec!["a"]);
        assert!(packed.is_strict());
        assert_eq!(packed.files[0].compression_type, CompressionType::Standard);
    }

    #[test]
    fn dependency_outside_closure_forces_flush() {
        let packed = order(
            vec![node("a", &[]), node("b", &["missing"]), node("c", &["b"])],
            &FxHashSet::default(),
            CompressionType::None,
        );
        assert_eq!(names(&packed), vec!["a", "b", "c"]);
        assert_eq!(packed.forced_flushes.len(), 1);
        assert_eq!(packed.forced_flushes[0].members.len(), 2);
    }

    #[test]
    fn empty_input_takes_no_passes() {
        let packed = order(Vec::new(), &FxHashSet::default(), CompressionType::None);
        assert!(packed.files.is_empty());
        assert_eq!(packed.passes, 0);
    }
}
