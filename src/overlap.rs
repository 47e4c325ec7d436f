//! Header/footer membership index.

use std::collections::HashSet;

/// Set of relative paths already designated as header or footer files.
///
/// Body candidates found here are dropped from the body section. Duplicates
/// between the header and footer lists themselves are left alone.
#[derive(Debug, Clone, Default)]
pub struct OverlapIndex {
    paths: HashSet<String>,
}

impl OverlapIndex {
    pub fn new(header_files: &[String], footer_files: &[String]) -> Self {
        Self {
            paths: header_files.iter().chain(footer_files).cloned().collect(),
        }
    }

    pub fn contains(&self, relative_path: &str) -> bool {
        self.paths.contains(relative_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
