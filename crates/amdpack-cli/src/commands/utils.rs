//! Shared helpers for command implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use amdpack_bundler::{BuildReport, BundleBuilder};
use amdpack_config::{load_configuration, ConfigDiscovery, ConfigValidator, Configuration, FsValidator};
use amdpack_graph::NativeRuntime;

use crate::cli::ProjectArgs;
use crate::error::{CliError, Result};
use crate::ui;

/// Absolute project root. Fails with `ProjectNotFound` before any work.
pub fn resolve_project(project: &Path) -> Result<PathBuf> {
    let absolute = if project.is_absolute() {
        project.to_path_buf()
    } else {
        std::env::current_dir()?.join(project)
    };

    if !absolute.is_dir() {
        return Err(CliError::ProjectNotFound(absolute));
    }
    Ok(absolute)
}

/// Load and validate the configuration named by `args`.
pub fn load_config(args: &ProjectArgs) -> Result<Configuration> {
    let root = resolve_project(&args.project)?;

    let config = if args.config.is_empty() {
        ConfigDiscovery::new(&root).load()?
    } else {
        let paths: Vec<PathBuf> = args
            .config
            .iter()
            .map(|path| if path.is_absolute() { path.clone() } else { root.join(path) })
            .collect();
        load_configuration(&paths)?
    };

    FsValidator.validate(&config)?;

    tracing::debug!(
        "Loaded {} documents declaring {} bundles",
        config.documents.len(),
        config.bundles.len()
    );
    Ok(config)
}

/// Build every bundle with the native runtime and report diagnostics.
pub async fn build_bundles(config: &Configuration) -> Result<BuildReport> {
    let builder = BundleBuilder::new(Arc::new(NativeRuntime::new()));
    let report = builder.build_all(config).await?;

    for diagnostic in &report.diagnostics {
        ui::warning(&diagnostic.to_string());
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_project_is_reported() {
        let err = resolve_project(Path::new("/definitely/not/a/project")).unwrap_err();
        assert!(matches!(err, CliError::ProjectNotFound(_)));
    }

    #[test]
    fn relative_project_is_anchored_at_cwd() {
        let root = resolve_project(Path::new(".")).unwrap();
        assert!(root.is_absolute());
    }
}
