//! Directory include expansion.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use crate::error::{GraphError, Result};
use crate::path::{has_js_extension, PhysicalPath};
use crate::runtime::{EntryKind, Runtime};

/// Every `.js` file below `dir`, recursively, sorted by canonical key.
///
/// The extension check ignores case. Other files are skipped. A directory
/// reached twice through symlinks is listed once.
pub async fn expand_directory(runtime: &dyn Runtime, dir: &Path) -> Result<Vec<PhysicalPath>> {
    let mut files = Vec::new();
    let mut visited: FxHashSet<PathBuf> = FxHashSet::default();
    let mut pending: Vec<PathBuf> = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let identity = runtime
            .canonicalize(&current)
            .await
            .unwrap_or_else(|_| current.clone());
        if !visited.insert(identity) {
            tracing::debug!("Skipping {}: directory already expanded", current.display());
            continue;
        }

        let entries = runtime
            .read_dir(&current)
            .await
            .map_err(|source| GraphError::ReadDir {
                path: current.clone(),
                source,
            })?;

        for entry in entries {
            let path = current.join(&entry.name);
            match entry.kind {
                EntryKind::Directory => pending.push(path),
                EntryKind::File if has_js_extension(&path) => files.push(PhysicalPath::new(path)),
                EntryKind::File => {}
            }
        }
    }

    files.sort();
    files.dedup();

    tracing::debug!("Expanded {} to {} scripts", dir.display(), files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::memory::MemoryRuntime;

    #[tokio::test]
    async fn collects_js_files_recursively() {
        let runtime = MemoryRuntime::new("/web")
            .with_file("scripts/app/main.js", "")
            .with_file("scripts/app/views/List.JS", "")
            .with_file("scripts/app/readme.txt", "")
            .with_file("scripts/other.js", "");

        let files = expand_directory(&runtime, Path::new("/web/scripts/app"))
            .await
            .unwrap();

        let keys: Vec<&str> = files.iter().map(PhysicalPath::key).collect();
        assert_eq!(
            keys,
            vec!["/web/scripts/app/main.js", "/web/scripts/app/views/list.js"]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlink_cycles_are_expanded_once() {
        use crate::runtime::native::NativeRuntime;
        use std::os::unix::fs::symlink;

        let temp = tempfile::TempDir::new().unwrap();
        let app = temp.path().join("app");
        std::fs::create_dir_all(app.join("views")).unwrap();
        std::fs::write(app.join("a.js"), "define([], {});").unwrap();
        std::fs::write(app.join("views/list.js"), "define([], {});").unwrap();
        symlink(&app, app.join("loop")).unwrap();
        symlink(app.join("views"), app.join("alias")).unwrap();

        let files = expand_directory(&NativeRuntime, &app).await.unwrap();

        assert_eq!(files.len(), 2, "{files:?}");
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let runtime = MemoryRuntime::new("/web");
        let err = expand_directory(&runtime, Path::new("/web/nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::ReadDir { .. }));
    }
}
