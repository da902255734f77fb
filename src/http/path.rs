//! Request path normalization.
//!
//! Relative paths are rooted under the API namespace before they are joined
//! with the base URL. Absolute URLs pass through untouched.

use crate::config::schema::DEFAULT_API_PREFIX;

/// Returns true for `http://` and `https://` URLs, ignoring case.
pub fn is_absolute_url(path: &str) -> bool {
    let lower = |n: usize| path.get(..n).map(str::to_ascii_lowercase);
    lower(7).as_deref() == Some("http://") || lower(8).as_deref() == Some("https://")
}

/// Normalize `path` against the default `/api` namespace.
pub fn normalize_path(path: &str) -> String {
    normalize_path_with_prefix(path, DEFAULT_API_PREFIX)
}

/// Normalize `path` against an arbitrary namespace prefix.
///
/// - empty input and absolute URLs are returned unchanged
/// - a missing leading `/` is added
/// - `prefix` is prepended unless the path already sits under it
///
/// "Under it" means the path equals the prefix or continues with `/`, `?`
/// or `#` right after it, so `/apis` still gets prefixed. A prefix of `/`
/// (or empty) disables prefixing.
pub fn normalize_path_with_prefix(path: &str, prefix: &str) -> String {
    if path.is_empty() || is_absolute_url(path) {
        return path.to_string();
    }

    let rooted = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() || has_prefix(&rooted, prefix) {
        return rooted;
    }

    format!("{prefix}{rooted}")
}

fn has_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with(['/', '?', '#']),
        None => false,
    }
}
