//! Path normalization for comparisons and index lookups.
//!
//! Discovered paths, header/footer entries and the input root are all
//! compared as forward-slash strings, regardless of platform.

use std::path::{MAIN_SEPARATOR, Path};

/// Convert a platform path string to forward-slash form.
pub fn ensure_posix(path: &str) -> String {
    if MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(MAIN_SEPARATOR, "/")
    }
}

/// Forward-slash form of a filesystem path.
pub fn posix_path(path: &Path) -> String {
    ensure_posix(&path.to_string_lossy())
}

/// Path of `file` relative to `posix_root`.
///
/// Strips a leading `"<posix_root>/"`; paths outside the root (including
/// already-relative ones) come back unchanged.
pub fn relative_to_root(file: &str, posix_root: &str) -> String {
    let prefix = format!("{}/", posix_root.trim_end_matches('/'));
    file.strip_prefix(&prefix).unwrap_or(file).to_string()
}

/// Discovered entries are directories iff they end with a trailing slash.
pub fn is_directory(path: &str) -> bool {
    path.ends_with('/')
}
