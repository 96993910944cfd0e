//! Conversion between path strings and fragment lists.
//!
//! Fragments stay percent-encoded here; decoding is left to the codecs.

use crate::config::RouterConfig;
use crate::constants::{HASH_DELIMITER, PATH_SEPARATOR, QUERY_DELIMITER};

/// Splits an incoming path into raw fragments.
///
/// A single leading `/` is dropped, so `"/"` and `""` are both the empty
/// path. Empty fragments elsewhere are kept. Returns `None` if the path lies
/// outside the configured base path.
pub(crate) fn split(path: &str, config: &RouterConfig) -> Option<Vec<String>> {
    let mut path = path;
    if config.strip_query
        && let Some(end) = path.find([QUERY_DELIMITER, HASH_DELIMITER])
    {
        path = &path[..end];
    }

    if let Some(base) = base_path(config) {
        path = path.strip_prefix(base)?;
        if !path.is_empty() && !path.starts_with(PATH_SEPARATOR) {
            return None;
        }
    }

    let path = path.strip_prefix(PATH_SEPARATOR).unwrap_or(path);
    if path.is_empty() {
        return Some(Vec::new());
    }

    let mut fragments: Vec<String> = path.split(PATH_SEPARATOR).map(str::to_string).collect();
    if config.ignore_trailing_slash
        && fragments.len() > 1
        && fragments.last().is_some_and(String::is_empty)
    {
        fragments.pop();
    }
    Some(fragments)
}

/// Joins written fragments into a path under the configured base path.
pub(crate) fn join(fragments: &[String], config: &RouterConfig) -> String {
    let base = base_path(config).unwrap_or_default();
    if fragments.is_empty() && !base.is_empty() {
        return base.to_string();
    }

    let separator = PATH_SEPARATOR.to_string();
    let mut path = String::with_capacity(
        base.len() + fragments.iter().map(|f| f.len() + 1).sum::<usize>(),
    );
    path.push_str(base);
    path.push(PATH_SEPARATOR);
    path.push_str(&fragments.join(separator.as_str()));
    path
}

/// Base path without a trailing `/`; `None` when unset or the root.
fn base_path(config: &RouterConfig) -> Option<&str> {
    let base = config.base_path.as_deref()?.trim_end_matches(PATH_SEPARATOR);
    if base.is_empty() { None } else { Some(base) }
}
