//! Classification of raw module identifiers.

/// What a raw dependency or include string refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleRef<'a> {
    /// `http://...`, `//cdn...`, or anything carrying a query string.
    Url(&'a str),
    /// Loader plugin resource such as `text!templates/list.html`.
    Plugin { plugin: &'a str, resource: &'a str },
    /// Special ids provided by the loader itself.
    Builtin(&'a str),
    /// `./x` or `../x`, relative to the referencing module.
    Relative(&'a str),
    /// An absolute filesystem path.
    Absolute(&'a str),
    /// A plain module id resolved against `baseUrl` and `paths`.
    Logical(&'a str),
}

const BUILTINS: [&str; 3] = ["require", "exports", "module"];

impl<'a> ModuleRef<'a> {
    pub fn classify(raw: &'a str) -> Self {
        let raw = raw.trim();

        if is_url(raw) {
            return ModuleRef::Url(raw);
        }

        if let Some((plugin, resource)) = raw.split_once('!') {
            return ModuleRef::Plugin { plugin, resource };
        }

        if BUILTINS.contains(&raw) {
            return ModuleRef::Builtin(raw);
        }

        if raw.starts_with("./") || raw.starts_with("../") {
            return ModuleRef::Relative(raw);
        }

        if raw.starts_with('/') || has_drive_prefix(raw) {
            return ModuleRef::Absolute(raw);
        }

        ModuleRef::Logical(raw)
    }

    /// `true` for references the loader handles without a local file.
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            ModuleRef::Url(_) | ModuleRef::Plugin { .. } | ModuleRef::Builtin(_)
        )
    }
}

fn is_url(raw: &str) -> bool {
    raw.starts_with("//")
        || raw.contains('?')
        || raw.split_once("://").is_some_and(|(scheme, _)| {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        })
}

fn has_drive_prefix(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && matches!(bytes[2], b'/' | b'\\')
}
