//! Atomic output writing.
//!
//! Bundle files and override documents are staged as temporary files in
//! their destination directories, then renamed into place once every
//! file of the run has been staged. Readers never see a partially written
//! file; if staging fails, staged files are removed when dropped and no
//! destination is touched.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tempfile::NamedTempFile;

use crate::bundle::Bundle;
use crate::overrides::OverrideDocument;
use crate::{Error, Result};

/// Paths written by [`write_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub bundles: Vec<PathBuf>,
    pub overrides: Vec<PathBuf>,
}

/// Bundle text: file contents in emission order, one per line group.
///
/// Each file is terminated with `;` unless it already ends in one, so a
/// file without a trailing semicolon cannot merge with the next.
pub fn render_bundle(bundle: &Bundle) -> String {
    let mut out = String::new();
    for file in &bundle.files {
        let content = file.file_content.trim_end();
        out.push_str(content);
        if !content.ends_with(';') {
            out.push(';');
        }
        out.push('\n');
    }
    out
}

/// Write a single bundle atomically.
pub fn write_bundle(bundle: &Bundle) -> Result<()> {
    let staged = stage(&bundle.output, render_bundle(bundle).as_bytes())?;
    commit(vec![staged])
}

/// Serialize `doc` as pretty JSON and write it atomically to `path`.
pub fn write_override_document(path: &Path, doc: &OverrideDocument) -> Result<()> {
    let staged = stage(path, &override_bytes(doc)?)?;
    commit(vec![staged])
}

/// Write every bundle and override document of a run.
///
/// All files are staged first; nothing is renamed into place unless
/// staging succeeded for every file.
pub fn write_all(
    bundles: &[Bundle],
    overrides: &IndexMap<PathBuf, OverrideDocument>,
) -> Result<WriteSummary> {
    let mut summary = WriteSummary::default();
    let mut staged = Vec::with_capacity(bundles.len() + overrides.len());

    for bundle in bundles {
        staged.push(stage(&bundle.output, render_bundle(bundle).as_bytes())?);
        summary.bundles.push(bundle.output.clone());
    }

    for (config_path, doc) in overrides {
        let path = crate::overrides::override_path_for(config_path);
        staged.push(stage(&path, &override_bytes(doc)?)?);
        summary.overrides.push(path);
    }

    commit(staged)?;

    tracing::info!(
        "Wrote {} bundles and {} override documents",
        summary.bundles.len(),
        summary.overrides.len()
    );
    Ok(summary)
}

fn override_bytes(doc: &OverrideDocument) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(doc)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write `content` to a temporary file next to `target`.
fn stage(target: &Path, content: &[u8]) -> Result<(NamedTempFile, PathBuf)> {
    let parent = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| {
            Error::InvalidOutputPath(format!("'{}' has no parent directory", target.display()))
        })?;

    fs::create_dir_all(parent).map_err(|e| {
        Error::WriteFailure(format!(
            "Failed to create directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| {
        Error::WriteFailure(format!(
            "Failed to create temporary file in '{}': {}",
            parent.display(),
            e
        ))
    })?;

    temp.write_all(content)
        .and_then(|()| temp.flush())
        .map_err(|e| {
            Error::WriteFailure(format!(
                "Failed to write temporary file for '{}': {}",
                target.display(),
                e
            ))
        })?;

    Ok((temp, target.to_path_buf()))
}

/// Rename staged files into place.
fn commit(staged: Vec<(NamedTempFile, PathBuf)>) -> Result<()> {
    for (temp, target) in staged {
        temp.persist(&target).map_err(|e| {
            Error::WriteFailure(format!(
                "Failed to move output into '{}': {}",
                target.display(),
                e.error
            ))
        })?;
        tracing::debug!("Wrote {}", target.display());
    }
    Ok(())
}
