//! Path resolution from logical module ids to physical files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use amdpack_config::{expand_paths, Configuration};
use path_clean::PathClean;

use crate::module_ref::ModuleRef;
use crate::path::{has_js_extension, PhysicalPath};
use crate::runtime::Runtime;

/// Result of module resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult {
    /// Module resolved to a local file path.
    Local(PhysicalPath),

    /// Loader-handled reference (URL, plugin resource, builtin id).
    External(String),

    /// No file exists for the id.
    Unresolved(String),
}

impl ResolveResult {
    pub fn is_local(&self) -> bool {
        matches!(self, ResolveResult::Local(_))
    }

    pub fn is_external(&self) -> bool {
        matches!(self, ResolveResult::External(_))
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, ResolveResult::Unresolved(_))
    }

    pub fn into_local(self) -> Option<PhysicalPath> {
        match self {
            ResolveResult::Local(path) => Some(path),
            _ => None,
        }
    }
}

/// Maps a logical id or path to a physical file.
///
/// Implementations never fail on "not found"; they report
/// `ResolveResult::Unresolved` instead.
pub trait PathResolver: Send + Sync {
    /// Resolve `id`. Relative ids are anchored at the directory of `from`
    /// when given, otherwise at `base_url`.
    fn resolve(
        &self,
        id: &str,
        base_url: &Path,
        from: Option<&Path>,
        config: &Configuration,
    ) -> ResolveResult;

    fn resolve_physical_path(
        &self,
        id: &str,
        base_url: &Path,
        config: &Configuration,
    ) -> Option<PhysicalPath> {
        self.resolve(id, base_url, None, config).into_local()
    }
}

/// Default RequireJS-style resolver.
///
/// - URLs, loader plugins and builtin ids are external
/// - `paths` aliases are expanded before joining to `baseUrl`
/// - `.js` is appended when missing
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    runtime: Arc<dyn Runtime>,
}

impl ModuleResolver {
    pub fn new(runtime: Arc<dyn Runtime>) -> Self {
        Self { runtime }
    }

    fn candidate(
        &self,
        id: &str,
        base_url: &Path,
        from: Option<&Path>,
        config: &Configuration,
    ) -> Option<PathBuf> {
        let reference = ModuleRef::classify(id);
        if reference.is_external() {
            return None;
        }

        let path = match reference {
            ModuleRef::Relative(rel) => from.and_then(Path::parent).unwrap_or(base_url).join(rel),
            ModuleRef::Absolute(abs) => PathBuf::from(abs),
            ModuleRef::Logical(logical) => {
                // An alias may point at a CDN or a plugin resource.
                let expanded = expand_paths(logical, config);
                let target = ModuleRef::classify(&expanded);
                if target.is_external() {
                    return None;
                }
                match target {
                    ModuleRef::Absolute(abs) => PathBuf::from(abs),
                    _ => base_url.join(&expanded),
                }
            }
            _ => return None,
        };

        Some(path)
    }
}

impl PathResolver for ModuleResolver {
    fn resolve(
        &self,
        id: &str,
        base_url: &Path,
        from: Option<&Path>,
        config: &Configuration,
    ) -> ResolveResult {
        let Some(candidate) = self.candidate(id, base_url, from, config) else {
            return ResolveResult::External(id.to_string());
        };

        let mut candidate = candidate.clean();
        if !has_js_extension(&candidate) {
            let mut with_ext = candidate.into_os_string();
            with_ext.push(".js");
            candidate = PathBuf::from(with_ext);
        }

        if self.runtime.is_file(&candidate) {
            ResolveResult::Local(PhysicalPath::new(candidate))
        } else {
            ResolveResult::Unresolved(id.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::memory::MemoryRuntime;

    fn resolver() -> ModuleResolver {
        let runtime = MemoryRuntime::new("/site")
            .with_file("scripts/app/main.js", "")
            .with_file("scripts/app/util.js", "")
            .with_file("scripts/lib/jquery-1.9.1.js", "")
            .with_file("vendor/legacy.js", "");
        ModuleResolver::new(Arc::new(runtime))
    }

    fn config() -> Configuration {
        let mut config = Configuration::default();
        config
            .paths
            .insert("jquery".into(), "lib/jquery-1.9.1".into());
        config
            .paths
            .insert("cdn".into(), "https://cdn.example.com/lib".into());
        config
            .paths
            .insert("tmpl".into(), "text!templates".into());
        config
    }

    const BASE: &str = "/site/scripts";

    #[test]
    fn resolves_logical_id_against_base_url() {
        let resolved = resolver().resolve_physical_path("app/main", Path::new(BASE), &config());
        assert_eq!(resolved, Some(PhysicalPath::new("/site/scripts/app/main.js")));
    }

    #[test]
    fn expands_aliases() {
        let resolved = resolver().resolve_physical_path("jquery", Path::new(BASE), &config());
        assert_eq!(
            resolved,
            Some(PhysicalPath::new("/site/scripts/lib/jquery-1.9.1.js"))
        );
    }

    #[test]
    fn relative_ids_use_referencing_file() {
        let from = Path::new("/site/scripts/app/main.js");
        let result = resolver().resolve("./util", Path::new(BASE), Some(from), &config());
        assert_eq!(
            result,
            ResolveResult::Local(PhysicalPath::new("/site/scripts/app/util.js"))
        );

        let result = resolver().resolve("../../vendor/legacy", Path::new(BASE), Some(from), &config());
        assert!(result.is_local());
    }

    #[test]
    fn urls_plugins_and_builtins_are_external() {
        let resolver = resolver();
        let config = config();
        for id in [
            "https://cdn.example.com/x.js",
            "text!a.html",
            "exports",
            "cdn/x",
            "tmpl/list.html",
        ] {
            let result = resolver.resolve(id, Path::new(BASE), None, &config);
            assert!(result.is_external(), "{id} should be external");
        }
    }

    #[test]
    fn missing_files_are_unresolved_not_errors() {
        let result = resolver().resolve("app/missing", Path::new(BASE), None, &config());
        assert_eq!(result, ResolveResult::Unresolved("app/missing".to_string()));
    }

    #[test]
    fn explicit_extension_is_kept() {
        let resolved = resolver().resolve_physical_path("app/main.js", Path::new(BASE), &config());
        assert!(resolved.is_some());
    }
}
