//! Input sensitivity and file discovery.
//!
//! An engine is sensitive to the union of its header, input and footer
//! patterns. Discovery walks the single input tree and yields every entry
//! that falls inside that sensitivity, in a deterministic order:
//! directories carry a trailing `/` and always precede their contents.

use crate::error::{ConcatError, Result};
use crate::paths::posix_path;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Which files under the input tree an engine cares about.
#[derive(Debug, Clone)]
pub enum InputSensitivity {
    /// No restriction: every file under the input tree.
    All,
    /// Only files matching one of the patterns (relative, forward slashes).
    Patterns { patterns: Vec<String>, set: GlobSet },
}

impl InputSensitivity {
    /// Build the sensitivity from header, input and footer lists.
    ///
    /// The union is deduplicated preserving first-seen order. An empty union
    /// means "no restriction". Header and footer entries name exact files and
    /// are matched literally; only `input_files` are globs.
    pub fn from_lists(
        header_files: &[String],
        input_files: Option<&[String]>,
        footer_files: &[String],
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        let patterns: Vec<String> = header_files
            .iter()
            .chain(input_files.unwrap_or_default())
            .chain(footer_files)
            .filter(|p| seen.insert(p.to_string()))
            .cloned()
            .collect();

        if patterns.is_empty() {
            return Ok(Self::All);
        }

        let literals = header_files.iter().chain(footer_files).map(|f| globset::escape(f));
        let globs = input_files.unwrap_or_default().iter().cloned();
        let set = build_globset(literals.chain(globs))?;
        Ok(Self::Patterns { patterns, set })
    }

    /// The patterns, or `None` for "no restriction".
    pub fn patterns(&self) -> Option<&[String]> {
        match self {
            Self::All => None,
            Self::Patterns { patterns, .. } => Some(patterns),
        }
    }

    /// Whether a relative forward-slash path is inside the sensitivity.
    pub fn matches(&self, relative_path: &str) -> bool {
        match self {
            Self::All => true,
            Self::Patterns { set, .. } => set.is_match(relative_path),
        }
    }
}

/// Compile patterns into a GlobSet with path-aware `*` (it never crosses `/`).
fn build_globset(patterns: impl Iterator<Item = String>) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let glob = GlobBuilder::new(&pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| {
                ConcatError::Configuration(format!(
                    "invalid input pattern '{}': {}",
                    pattern, e
                ))
            })?;
        builder.add(glob);
    }

    builder
        .build()
        .map_err(|e| ConcatError::Configuration(format!("failed to compile input patterns: {}", e)))
}

/// The discovery collaborator: enumerates candidate files under an input root.
pub trait TreeListing {
    /// List entries under `root` as forward-slash path strings rooted at
    /// `root`. Directories end with `/` and precede their contents.
    fn list(&self, root: &Path, sensitivity: &InputSensitivity) -> Result<Vec<String>>;
}

/// Recursive filesystem walk, sorted by name within each directory.
///
/// Directories are only reported when the sensitivity is unrestricted.
/// Symlinks are not followed into directories, so a link cycle inside the
/// input tree cannot make the walk fail. Links to files are listed.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkListing;

impl TreeListing for WalkListing {
    fn list(&self, root: &Path, sensitivity: &InputSensitivity) -> Result<Vec<String>> {
        let posix_root = posix_path(root);
        let mut out = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                ConcatError::io(path, e.into())
            })?;

            let relative = entry
                .path()
                .strip_prefix(root)
                .map(posix_path)
                .unwrap_or_else(|_| posix_path(entry.path()));
            let file_type = entry.file_type();

            if file_type.is_dir() {
                if matches!(sensitivity, InputSensitivity::All) {
                    out.push(join_root(&posix_root, &format!("{}/", relative)));
                }
            } else if (file_type.is_file() || entry.path().is_file())
                && sensitivity.matches(&relative)
            {
                out.push(join_root(&posix_root, &relative));
            }
        }
        Ok(out)
    }
}

fn join_root(posix_root: &str, relative: &str) -> String {
    format!("{}/{}", posix_root.trim_end_matches('/'), relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn relative(listed: &[String], root: &Path) -> Vec<String> {
        let prefix = format!("{}/", posix_path(root));
        listed
            .iter()
            .map(|p| p.strip_prefix(&prefix).unwrap().to_string())
            .collect()
    }

    #[test]
    fn empty_union_is_unrestricted() {
        let sensitivity = InputSensitivity::from_lists(&[], None, &[]).unwrap();
        assert!(sensitivity.patterns().is_none());
        assert!(sensitivity.matches("anything/at/all.js"));
    }

    #[test]
    fn union_is_deduplicated_in_order() {
        let sensitivity = InputSensitivity::from_lists(
            &strings(&["h.js", "shared.js"]),
            Some(&strings(&["*.js", "h.js"])),
            &strings(&["shared.js", "f.js"]),
        )
        .unwrap();

        assert_eq!(
            sensitivity.patterns().unwrap(),
            strings(&["h.js", "shared.js", "*.js", "f.js"]).as_slice()
        );
    }

    #[test]
    fn explicit_empty_input_list_is_unrestricted() {
        let sensitivity = InputSensitivity::from_lists(&[], Some(&[]), &[]).unwrap();
        assert!(matches!(sensitivity, InputSensitivity::All));
    }

    #[test]
    fn star_does_not_cross_directories() {
        let sensitivity =
            InputSensitivity::from_lists(&[], Some(&strings(&["*.js", "lib/**/*.css"])), &[])
                .unwrap();

        assert!(sensitivity.matches("a.js"));
        assert!(!sensitivity.matches("lib/a.js"));
        assert!(sensitivity.matches("lib/deep/x.css"));
        assert!(sensitivity.matches("lib/x.css"));
    }

    #[test]
    fn invalid_pattern_is_a_configuration_error() {
        let err = InputSensitivity::from_lists(&[], Some(&strings(&["lib/[a.js"])), &[])
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
        assert!(err.to_string().contains("lib/[a.js"));
    }

    #[test]
    fn unrestricted_walk_lists_directories_first() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "b.js", "B");
        write(root, "a.js", "A");
        write(root, "lib/c.js", "C");
        write(root, "lib/nested/d.js", "D");

        let listed = WalkListing.list(root, &InputSensitivity::All).unwrap();

        assert_eq!(
            relative(&listed, root),
            strings(&["a.js", "b.js", "lib/", "lib/c.js", "lib/nested/", "lib/nested/d.js"])
        );
    }

    #[test]
    fn pattern_walk_lists_only_matching_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "a.js", "A");
        write(root, "a.css", "x");
        write(root, "lib/b.js", "B");

        let sensitivity =
            InputSensitivity::from_lists(&[], Some(&strings(&["**/*.js"])), &[]).unwrap();
        let listed = WalkListing.list(root, &sensitivity).unwrap();

        assert_eq!(relative(&listed, root), strings(&["a.js", "lib/b.js"]));
    }

    #[test]
    fn walk_of_missing_root_is_an_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = WalkListing
            .list(&temp_dir.path().join("missing"), &InputSensitivity::All)
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    }

    #[test]
    fn header_and_footer_entries_match_literally() {
        let sensitivity = InputSensitivity::from_lists(
            &strings(&["a?.js"]),
            None,
            &strings(&["b!.js"]),
        )
        .unwrap();

        assert!(sensitivity.matches("a?.js"));
        assert!(!sensitivity.matches("ab.js"));
        assert!(sensitivity.matches("b!.js"));
        assert_eq!(
            sensitivity.patterns().unwrap(),
            strings(&["a?.js", "b!.js"]).as_slice()
        );
    }

    #[test]
    fn input_patterns_stay_globs_next_to_literal_headers() {
        let sensitivity = InputSensitivity::from_lists(
            &strings(&["a?.js"]),
            Some(&strings(&["lib/?.js"])),
            &[],
        )
        .unwrap();

        assert!(!sensitivity.matches("ab.js"));
        assert!(sensitivity.matches("lib/x.js"));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_cycle_does_not_break_the_walk() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "a.js", "A");
        write(root, "lib/b.js", "B");
        std::os::unix::fs::symlink(root, root.join("loop")).unwrap();
        std::os::unix::fs::symlink(root.join("a.js"), root.join("alias.js")).unwrap();

        let listed = WalkListing.list(root, &InputSensitivity::All).unwrap();
        assert_eq!(
            relative(&listed, root),
            strings(&["a.js", "alias.js", "lib/", "lib/b.js"])
        );

        let sensitivity =
            InputSensitivity::from_lists(&[], Some(&strings(&["**/*.js"])), &[]).unwrap();
        let listed = WalkListing.list(root, &sensitivity).unwrap();
        assert_eq!(
            relative(&listed, root),
            strings(&["a.js", "alias.js", "lib/b.js"])
        );
    }
}
