//! Encoder cache shared across runs of one engine.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

#[derive(Debug)]
struct CachedContent {
    len: u64,
    modified: Option<SystemTime>,
    bytes: Arc<[u8]>,
    /// Run in which the entry was last read.
    run: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    run: u64,
    entries: HashMap<PathBuf, CachedContent>,
}

/// Memoized file contents, keyed by absolute path.
///
/// Cloning yields another handle onto the same storage. An entry is reused
/// only while the file's length and modification time are unchanged, and is
/// dropped by [`EncoderCache::end_run`] once a run finishes without reading it.
#[derive(Debug, Clone, Default)]
pub struct EncoderCache {
    state: Arc<Mutex<CacheState>>,
}

impl EncoderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `path`, reusing the cached bytes when the file is unchanged.
    pub fn read(&self, path: &Path) -> io::Result<Arc<[u8]>> {
        let metadata = fs::metadata(path)?;
        let len = metadata.len();
        let modified = metadata.modified().ok();

        {
            let mut state = self.lock();
            let run = state.run;
            if let Some(hit) = state.entries.get_mut(path)
                && hit.len == len
                && hit.modified == modified
                && modified.is_some()
            {
                hit.run = run;
                return Ok(Arc::clone(&hit.bytes));
            }
        }

        let bytes: Arc<[u8]> = fs::read(path)?.into();
        let mut state = self.lock();
        let run = state.run;
        state.entries.insert(
            path.to_path_buf(),
            CachedContent {
                len,
                modified,
                bytes: Arc::clone(&bytes),
                run,
            },
        );
        Ok(bytes)
    }

    /// Close the current run: evict every entry it did not read.
    pub fn end_run(&self) {
        let mut state = self.lock();
        let run = state.run;
        state.entries.retain(|_, entry| entry.run == run);
        state.run += 1;
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    /// Whether both handles refer to the same storage.
    pub fn shares_storage_with(&self, other: &EncoderCache) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_populates_cache() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.js");
        fs::write(&path, "A;").unwrap();

        let cache = EncoderCache::new();
        assert!(cache.is_empty());

        assert_eq!(&*cache.read(&path).unwrap(), b"A;");
        assert_eq!(cache.len(), 1);

        assert_eq!(&*cache.read(&path).unwrap(), b"A;");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_length_invalidates_entry() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.js");
        fs::write(&path, "A;").unwrap();

        let cache = EncoderCache::new();
        cache.read(&path).unwrap();

        fs::write(&path, "A changed;").unwrap();
        assert_eq!(&*cache.read(&path).unwrap(), b"A changed;");
    }

    #[test]
    fn missing_file_is_not_cached() {
        let temp_dir = TempDir::new().unwrap();
        let cache = EncoderCache::new();

        let err = cache.read(&temp_dir.path().join("missing.js")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(cache.is_empty());
    }

    #[test]
    fn clones_share_storage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.js");
        fs::write(&path, "A;").unwrap();

        let cache = EncoderCache::new();
        let handle = cache.clone();
        handle.read(&path).unwrap();

        assert!(cache.shares_storage_with(&handle));
        assert!(!cache.shares_storage_with(&EncoderCache::new()));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(handle.is_empty());
    }

    #[test]
    fn end_run_evicts_entries_not_read() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.js");
        let b = temp_dir.path().join("b.js");
        fs::write(&a, "A;").unwrap();
        fs::write(&b, "B;").unwrap();

        let cache = EncoderCache::new();
        cache.read(&a).unwrap();
        cache.read(&b).unwrap();
        cache.end_run();
        assert_eq!(cache.len(), 2);

        // Second run only touches a.js (hit) so b.js goes away.
        cache.read(&a).unwrap();
        cache.end_run();
        assert_eq!(cache.len(), 1);

        cache.end_run();
        assert!(cache.is_empty());
    }
}
