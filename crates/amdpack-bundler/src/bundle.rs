//! Bundle assembly.

use std::path::{Path, PathBuf};

use amdpack_config::BundleSpec;
use amdpack_graph::{has_js_extension, FileSpec};
use path_clean::PathClean;
use serde::Serialize;

/// An ordered set of files concatenated into one output script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub bundle_id: String,
    /// Emission order. Concatenation follows this order exactly.
    pub files: Vec<FileSpec>,
    pub output: PathBuf,
    /// Configuration document that declared the bundle.
    pub containing_config: PathBuf,
    /// `baseUrl` of the containing configuration.
    pub base_url: PathBuf,
}

impl Bundle {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Wrap `ordered` into a [`Bundle`] for `spec`.
///
/// A relative `outputPath` is anchored at the declaring document's
/// directory. An `outputPath` ending in `.js` names the bundle file itself;
/// anything else is a directory receiving `<bundleId>.js`.
pub fn assemble(spec: &BundleSpec, ordered: Vec<FileSpec>) -> Bundle {
    Bundle {
        bundle_id: spec.id.clone(),
        files: ordered,
        output: output_path(spec),
        containing_config: spec.config_path.clone(),
        base_url: spec.base_url.clone(),
    }
}

fn output_path(spec: &BundleSpec) -> PathBuf {
    let declared: &Path = &spec.output_path;
    let anchored = if declared.is_absolute() {
        declared.to_path_buf()
    } else {
        spec.config_dir().join(declared)
    };

    let anchored = anchored.clean();
    if has_js_extension(&anchored) {
        anchored
    } else {
        anchored.join(format!("{}.js", spec.id))
    }
}
