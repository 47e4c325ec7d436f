//! Rebuild gate.
//!
//! Concatenation is the expensive path of an incremental build. A
//! [`Rebuilder`] lists the engine's input tree, stamps every entry with its
//! length and modification time, and only runs the engine when that stamp
//! differs from the one recorded after the last successful build.

use crate::engine::{BuildInput, ConcatEngine};
use crate::error::{ConcatError, Result};
use crate::listing::{TreeListing, WalkListing};
use crate::paths::is_directory;
use crate::strategy::ConcatOutput;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
struct EntryStamp {
    path: String,
    len: u64,
    modified: Option<SystemTime>,
}

/// Snapshot of everything a run depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    output_root: PathBuf,
    entries: Vec<EntryStamp>,
}

impl Fingerprint {
    /// Stamp the listed entries. Directories are recorded by path only.
    pub fn capture(output_root: &Path, files: &[String]) -> Result<Self> {
        let mut entries = Vec::with_capacity(files.len());
        for path in files {
            if is_directory(path) {
                entries.push(EntryStamp {
                    path: path.clone(),
                    len: 0,
                    modified: None,
                });
                continue;
            }
            let metadata = fs::metadata(path).map_err(|e| ConcatError::io(path, e))?;
            entries.push(EntryStamp {
                path: path.clone(),
                len: metadata.len(),
                modified: metadata.modified().ok(),
            });
        }
        Ok(Self {
            output_root: output_root.to_path_buf(),
            entries,
        })
    }
}

/// What a call to [`Rebuilder::rebuild`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildOutcome {
    Built(ConcatOutput),
    Unchanged,
}

/// Runs an engine only when its inputs changed.
#[derive(Debug)]
pub struct Rebuilder<L = WalkListing> {
    engine: ConcatEngine,
    listing: L,
    last: Option<Fingerprint>,
}

impl Rebuilder<WalkListing> {
    pub fn new(engine: ConcatEngine) -> Self {
        Self::with_listing(engine, WalkListing)
    }
}

impl<L: TreeListing> Rebuilder<L> {
    pub fn with_listing(engine: ConcatEngine, listing: L) -> Self {
        Self {
            engine,
            listing,
            last: None,
        }
    }

    pub fn engine(&self) -> &ConcatEngine {
        &self.engine
    }

    /// Forget the last fingerprint so the next call always builds.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Build if the input tree changed since the last successful build.
    ///
    /// A failed build leaves no fingerprint behind, so the next call retries.
    pub fn rebuild(&mut self, input_root: &Path, output_root: &Path) -> Result<RebuildOutcome> {
        let files = self.listing.list(input_root, self.engine.sensitivity())?;
        let fingerprint = Fingerprint::capture(output_root, &files)?;

        if self.last.as_ref() == Some(&fingerprint) {
            debug!(
                name = %self.engine.name(),
                annotation = self.engine.annotation().unwrap_or(""),
                "inputs unchanged, skipping build"
            );
            return Ok(RebuildOutcome::Unchanged);
        }

        self.last = None;
        let output = self
            .engine
            .build(&BuildInput::new(input_root, output_root, files))?;
        self.last = Some(fingerprint);

        Ok(RebuildOutcome::Built(output))
    }
}
