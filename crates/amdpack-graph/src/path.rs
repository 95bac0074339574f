//! Physical path identity and logical id relativization.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;
use serde::{Serialize, Serializer};

/// Absolute location of a module file on disk.
///
/// File-system paths are case-insensitive keys throughout amdpack: two
/// `PhysicalPath`s are equal when their lowercase, forward-slash forms are
/// equal, even if the original spelling differs. The original spelling is
/// kept for display and I/O.
#[derive(Debug, Clone)]
pub struct PhysicalPath {
    path: PathBuf,
    key: String,
}

impl PhysicalPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().clean();
        let key = canonical_key(&path);
        Self { path, key }
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }

    /// Canonical comparison key.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn display(&self) -> std::path::Display<'_> {
        self.path.display()
    }
}

fn canonical_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}

impl PartialEq for PhysicalPath {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PhysicalPath {}

impl Hash for PhysicalPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for PhysicalPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PhysicalPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for PhysicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl Serialize for PhysicalPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.path.to_string_lossy())
    }
}

impl From<PathBuf> for PhysicalPath {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for PhysicalPath {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

/// Module id the runtime loader uses for `path`, relative to `base_url`.
///
/// Forward slashes, `.js` stripped. Files outside `base_url` climb out with
/// `..` segments; paths sharing no root with `base_url` keep their full form.
///
/// ```
/// use amdpack_graph::logical_id;
/// use std::path::Path;
///
/// let base = Path::new("/site/scripts");
/// assert_eq!(logical_id(Path::new("/site/scripts/app/main.js"), base), "app/main");
/// assert_eq!(logical_id(Path::new("/site/vendor/lib.js"), base), "../vendor/lib");
/// ```
pub fn logical_id(path: &Path, base_url: &Path) -> String {
    let path = path.clean();
    let base = base_url.clean();

    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let shared = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| same_component(a, b))
        .count();

    let id = if shared > 0 {
        let mut segments: Vec<String> = Vec::new();
        for _ in shared..base_parts.len() {
            segments.push("..".to_string());
        }
        for part in &path_parts[shared..] {
            segments.push(part.as_os_str().to_string_lossy().to_string());
        }
        segments.join("/")
    } else {
        path.to_string_lossy().replace('\\', "/")
    };

    strip_js_extension(&id).to_string()
}

/// `false` for ids a loader cannot map back through `baseUrl`: ones that
/// climb above it or stayed absolute.
pub fn is_loader_addressable(id: &str) -> bool {
    !(id == ".." || id.starts_with("../") || id.starts_with('/') || Path::new(id).is_absolute())
}

fn same_component(a: &Component<'_>, b: &Component<'_>) -> bool {
    a.as_os_str().to_string_lossy().to_lowercase() == b.as_os_str().to_string_lossy().to_lowercase()
}

fn strip_js_extension(id: &str) -> &str {
    let len = id.len();
    if len > 3 && id.is_char_boundary(len - 3) && id[len - 3..].eq_ignore_ascii_case(".js") {
        &id[..len - 3]
    } else {
        id
    }
}

/// `true` when `path` has a `.js` extension (any case).
pub fn has_js_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("js"))
}
