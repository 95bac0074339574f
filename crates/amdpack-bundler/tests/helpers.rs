//! Shared fixtures for bundler integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use amdpack_bundler::BundleBuilder;
use amdpack_config::{ConfigDocument, Configuration};
use amdpack_graph::MemoryRuntime;
use serde_json::Value;

/// An AMD module declaring `deps`.
pub fn module(deps: &[&str]) -> String {
    let list: Vec<String> = deps.iter().map(|dep| format!("\"{dep}\"")).collect();
    format!("define([{}], function () {{ return {{}}; }});", list.join(", "))
}

/// Runtime rooted at `/web` holding `scripts/<name>.js` per entry.
pub fn project(modules: &[(&str, &[&str])]) -> MemoryRuntime {
    let runtime = MemoryRuntime::new("/web");
    for (name, deps) in modules {
        runtime.insert(format!("scripts/{name}.js"), module(deps));
    }
    runtime
}

/// Configuration from `(path, document)` pairs written as JSON values.
pub fn config(documents: Vec<(&str, Value)>) -> Configuration {
    Configuration::from_documents(documents.into_iter().map(|(path, value)| {
        (
            PathBuf::from(path),
            ConfigDocument::from_value(value).expect("valid document"),
        )
    }))
    .expect("valid configuration")
}

pub fn builder(runtime: MemoryRuntime) -> BundleBuilder {
    BundleBuilder::new(Arc::new(runtime))
}
