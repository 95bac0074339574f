//! Shared fixtures for graph tests.

use std::path::Path;
use std::sync::Arc;

use amdpack_config::Configuration;
use rustc_hash::FxHashSet;

use crate::closure::{Closure, ClosureBuilder, ResolveContext};
use crate::path::PhysicalPath;
use crate::runtime::memory::MemoryRuntime;

pub const BASE_URL: &str = "/web/scripts";

/// An AMD module declaring `deps`.
pub fn module(deps: &[&str]) -> String {
    let list: Vec<String> = deps.iter().map(|dep| format!("\"{dep}\"")).collect();
    format!("define([{}], function () {{ return {{}}; }});", list.join(", "))
}

/// Runtime holding `scripts/<name>.js` for each `(name, deps)` pair.
pub fn project(modules: &[(&str, &[&str])]) -> MemoryRuntime {
    let runtime = MemoryRuntime::new("/web");
    for (name, deps) in modules {
        runtime.insert(format!("scripts/{name}.js"), module(deps));
    }
    runtime
}

pub fn script(name: &str) -> PhysicalPath {
    PhysicalPath::new(Path::new(BASE_URL).join(format!("{name}.js")))
}

pub fn scripts(names: &[&str]) -> Vec<PhysicalPath> {
    names.iter().map(|name| script(name)).collect()
}

pub async fn closure_of(
    runtime: MemoryRuntime,
    includes: &[&str],
    excludes: &[&str],
) -> crate::Result<Closure> {
    let config = Configuration::default();
    let builder = ClosureBuilder::new(Arc::new(runtime));
    let excludes: FxHashSet<PhysicalPath> = scripts(excludes).into_iter().collect();
    let ctx = ResolveContext {
        config: &config,
        base_url: Path::new(BASE_URL),
    };
    builder.build_closure(&scripts(includes), &excludes, ctx).await
}

/// Module names of a closure, in discovery order.
pub fn names(closure: &Closure) -> Vec<String> {
    closure
        .files
        .iter()
        .map(|file| crate::logical_id(file.path.as_path(), Path::new(BASE_URL)))
        .collect()
}
