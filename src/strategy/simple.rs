//! Plain concatenation backend.

use super::{ConcatOutput, ConcatStrategy, EncoderCache, StrategyFactory, StrategyOptions};
use crate::error::{ConcatError, Result};
use crate::fs::atomic_write;
use std::path::PathBuf;
use tracing::trace;

/// Concatenates sections byte for byte into an in-memory buffer and writes
/// it atomically on finish. Produces no source map.
#[derive(Debug)]
pub struct SimpleConcat {
    output_file: PathBuf,
    base_dir: PathBuf,
    cache: EncoderCache,
    buffer: Vec<u8>,
}

impl SimpleConcat {
    pub fn new(options: StrategyOptions) -> Self {
        Self {
            output_file: options.output_file,
            base_dir: options.base_dir,
            cache: options.cache,
            buffer: Vec::new(),
        }
    }

    /// Bytes accumulated so far.
    pub fn content(&self) -> &[u8] {
        &self.buffer
    }
}

impl ConcatStrategy for SimpleConcat {
    fn add_file(&mut self, relative_path: &str) -> Result<()> {
        let path = self.base_dir.join(relative_path);
        let bytes = self.cache.read(&path).map_err(|e| {
            ConcatError::Strategy(format!(
                "SimpleConcat: unable to read '{}': {}",
                relative_path, e
            ))
        })?;
        trace!(file = relative_path, bytes = bytes.len(), "appended file");
        self.buffer.extend_from_slice(&bytes);
        Ok(())
    }

    fn add_space(&mut self, text: &str) -> Result<()> {
        self.buffer.extend_from_slice(text.as_bytes());
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<ConcatOutput> {
        atomic_write(&self.output_file, &self.buffer)?;
        self.cache.end_run();
        Ok(ConcatOutput {
            output_file: self.output_file,
            bytes_written: self.buffer.len(),
        })
    }
}

/// Factory for [`SimpleConcat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleConcatFactory;

impl StrategyFactory for SimpleConcatFactory {
    fn name(&self) -> &str {
        "Simple"
    }

    fn create(&self, options: StrategyOptions) -> Result<Box<dyn ConcatStrategy>> {
        Ok(Box::new(SimpleConcat::new(options)))
    }
}
