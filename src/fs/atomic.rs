//! Atomic filesystem operations.
//!
//! All atomic writes follow this pattern:
//! 1. Write content to a temporary file in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Rename it over the target
//!
//! Source and destination share a directory, so the rename never crosses
//! filesystems. On crash, a temporary file named `.{filename}.tmp` may remain.

use crate::error::{ConcatError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| ConcatError::io(parent, e))?;
    }
    Ok(())
}

/// Atomically write bytes to a file, creating parent directories as needed.
///
/// # Example
///
/// ```no_run
/// use concat_maps::fs::atomic_write;
/// use std::path::Path;
///
/// atomic_write(Path::new("dist/app.js"), b"console.log(1);\n")?;
/// # Ok::<(), concat_maps::error::ConcatError>(())
/// ```
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    ensure_parent_dir(path)?;

    let temp_path = generate_temp_path(path)?;
    write_and_sync(&temp_path, content)?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ConcatError::io(path, e)
    })?;

    sync_parent_dir(path);
    Ok(())
}

/// Persist the directory entry of a freshly renamed file.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) {
    if let Some(parent) = path.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) {}

fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        ConcatError::Configuration(format!("invalid output path '{}'", target.display()))
    })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| ConcatError::io(path, e))?;

    let written = file.write_all(content).and_then(|()| file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(path);
        return Err(ConcatError::io(path, e));
    }

    Ok(())
}
