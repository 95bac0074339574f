//! # amdpack-graph
//!
//! Dependency discovery and ordering for AMD (RequireJS-style) modules.
//!
//! ## Overview
//!
//! Given a set of include files, the crate finds every module they reach,
//! then orders that set so that each module follows the modules it depends
//! on:
//!
//! - **Runtime**: async file access, native or in-memory
//! - **Path identity**: [`PhysicalPath`] compares case-insensitively
//! - **Resolution**: [`ModuleResolver`] maps logical ids to files using the
//!   configuration's `baseUrl` and `paths`
//! - **Extraction**: [`AmdExtractor`] reads `define`/`require` dependency
//!   lists with Oxc
//! - **Closure**: [`ClosureBuilder`] walks the graph breadth-first
//! - **Packing**: [`order`] emits a cycle-tolerant layered ordering
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use amdpack_config::ConfigDiscovery;
//! use amdpack_graph::{order, ClosureBuilder, NativeRuntime, PhysicalPath, ResolveContext};
//! use rustc_hash::FxHashSet;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigDiscovery::new("./web").load()?;
//! let base_url = config.base_url().ok_or("no configuration documents")?.to_path_buf();
//!
//! let builder = ClosureBuilder::new(Arc::new(NativeRuntime));
//! let ctx = ResolveContext { config: &config, base_url: &base_url };
//!
//! let includes = vec![PhysicalPath::new(base_url.join("app/main.js"))];
//! let excludes = FxHashSet::default();
//! let closure = builder.build_closure(&includes, &excludes, ctx).await?;
//!
//! let packed = order(closure.files, &excludes, Default::default());
//! for file in &packed.files {
//!     println!("{}", file.file_name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Cycles
//!
//! Circular `require`s do not fail a bundle. When no module can be placed
//! next, the packer emits everything left in discovery order and records a
//! [`CycleBreak`] listing the forced set.

pub mod closure;
pub mod diagnostics;
pub mod directory;
pub mod error;
pub mod extractor;
pub mod module_ref;
pub mod packer;
pub mod path;
pub mod resolver;
pub mod runtime;

pub use closure::{Closure, ClosureBuilder, ResolveContext, ResolvedFile};
pub use diagnostics::{CycleBreak, UnresolvedDependency};
pub use directory::expand_directory;
pub use error::{GraphError, Result};
pub use extractor::{AmdExtractor, DependencyExtractor};
pub use module_ref::ModuleRef;
pub use packer::{order, FileSpec, PackedOrder};
pub use path::{has_js_extension, is_loader_addressable, logical_id, PhysicalPath};
pub use resolver::{ModuleResolver, PathResolver, ResolveResult};

// Re-export runtime types
pub use runtime::native::NativeRuntime;
pub use runtime::{DirEntry, EntryKind, Runtime, RuntimeError, RuntimeResult};

#[cfg(any(test, feature = "test-utils"))]
pub use runtime::memory::MemoryRuntime;

#[cfg(test)]
mod tests;
