//! The concatenation strategy contract.
//!
//! An engine never touches file contents itself. For every run it asks a
//! [`StrategyFactory`] for a fresh [`ConcatStrategy`], feeds it sections in
//! order, and hands back whatever [`ConcatStrategy::finish`] produces. Any
//! conforming backend can be plugged in: plain concatenation
//! ([`SimpleConcat`]) or one that also tracks source positions.

mod cache;
mod simple;

pub use cache::EncoderCache;
pub use simple::{SimpleConcat, SimpleConcatFactory};

use crate::config::SourceMapConfig;
use crate::error::Result;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// A backend that accumulates sections and writes the final artifact.
pub trait ConcatStrategy {
    /// Append the content of a file, named relative to the input root with
    /// forward slashes.
    fn add_file(&mut self, relative_path: &str) -> Result<()>;

    /// Append literal text.
    fn add_space(&mut self, text: &str) -> Result<()>;

    /// Durably write the artifact (and any source map) and report it.
    ///
    /// Blocks until the output is on disk.
    fn finish(self: Box<Self>) -> Result<ConcatOutput>;
}

/// Creates one strategy instance per run.
pub trait StrategyFactory: Send + Sync {
    /// Short backend name, used to label the engine (`"<name>Concat"`).
    fn name(&self) -> &str {
        "Unknown"
    }

    fn create(&self, options: StrategyOptions) -> Result<Box<dyn ConcatStrategy>>;
}

impl<F> StrategyFactory for F
where
    F: Fn(StrategyOptions) -> Result<Box<dyn ConcatStrategy>> + Send + Sync,
{
    fn create(&self, options: StrategyOptions) -> Result<Box<dyn ConcatStrategy>> {
        self(options)
    }
}

/// Per-run parameters handed to a [`StrategyFactory`].
#[derive(Debug, Clone)]
pub struct StrategyOptions {
    /// Absolute path of the artifact to write.
    pub output_file: PathBuf,
    /// Root that relative file names passed to `add_file` resolve against.
    pub base_dir: PathBuf,
    /// Long-lived memoization handle shared by every run of one engine.
    pub cache: EncoderCache,
    /// The configured source map options with the per-run `outputFile` and
    /// `baseDir` merged in.
    pub source_map: SourceMapConfig,
}

impl StrategyOptions {
    /// Build options for a run. Per-run fields win over configured ones.
    pub fn new(
        output_file: PathBuf,
        base_dir: PathBuf,
        cache: EncoderCache,
        source_map_config: &SourceMapConfig,
    ) -> Self {
        let mut run_fields = Map::new();
        run_fields.insert(
            "outputFile".to_string(),
            Value::String(output_file.to_string_lossy().into_owned()),
        );
        run_fields.insert(
            "baseDir".to_string(),
            Value::String(base_dir.to_string_lossy().into_owned()),
        );

        let mut source_map = source_map_config.clone();
        deep_merge(&mut source_map, run_fields);

        Self {
            output_file,
            base_dir,
            cache,
            source_map,
        }
    }
}

/// Recursively merge `source` into `target`; objects merge key by key and
/// everything else in `source` replaces what `target` held.
pub fn deep_merge(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                deep_merge(existing, incoming);
            }
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}

/// The artifact produced by a finished strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatOutput {
    pub output_file: PathBuf,
    pub bytes_written: usize,
}
