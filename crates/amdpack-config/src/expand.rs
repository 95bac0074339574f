//! Module path alias expansion.

use crate::config::Configuration;

/// Rewrite the longest alias prefix of `raw` using `config.paths`.
///
/// A prefix only matches on a whole path segment: with `{ "app": "src/app" }`
/// the id `app/main` becomes `src/app/main` while `application` is left alone.
///
/// ```
/// use amdpack_config::{expand_paths, Configuration};
///
/// let mut config = Configuration::default();
/// config.paths.insert("jquery".into(), "lib/jquery-1.9.1".into());
///
/// assert_eq!(expand_paths("jquery", &config), "lib/jquery-1.9.1");
/// assert_eq!(expand_paths("app/main", &config), "app/main");
/// ```
pub fn expand_paths(raw: &str, config: &Configuration) -> String {
    let mut best: Option<(&str, &str)> = None;

    for (alias, target) in &config.paths {
        let alias = alias.trim_end_matches('/');
        if alias.is_empty() {
            continue;
        }

        let matches = raw == alias
            || raw
                .strip_prefix(alias)
                .is_some_and(|rest| rest.starts_with('/'));

        if matches && best.is_none_or(|(current, _)| alias.len() > current.len()) {
            best = Some((alias, target.as_str()));
        }
    }

    match best {
        Some((alias, target)) => {
            let target = target.trim_end_matches('/');
            format!("{}{}", target, &raw[alias.len()..])
        }
        None => raw.to_string(),
    }
}
