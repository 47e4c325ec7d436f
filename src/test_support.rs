use crate::engine::BuildInput;
use crate::error::{ConcatError, Result};
use crate::paths::posix_path;
use crate::strategy::{ConcatOutput, ConcatStrategy, StrategyFactory, StrategyOptions};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// One call made against a recording strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Op {
    File(String),
    Space(String),
}

#[derive(Debug, Default)]
struct Recorded {
    ops: Vec<Op>,
    options: Vec<StrategyOptions>,
    finished: usize,
}

/// Factory whose strategies only record the calls they receive.
///
/// Files named in `missing` make `add_file` fail like a real backend would.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingFactory {
    recorded: Arc<Mutex<Recorded>>,
    missing: Vec<String>,
}

impl RecordingFactory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_missing(missing: &[&str]) -> Self {
        Self {
            missing: missing.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Calls made during the most recent run.
    pub(crate) fn ops(&self) -> Vec<Op> {
        self.recorded.lock().unwrap().ops.clone()
    }

    /// Render the most recent run, showing files as `<name>`.
    pub(crate) fn rendered(&self) -> String {
        self.ops()
            .iter()
            .map(|op| match op {
                Op::File(f) => format!("<{}>", f),
                Op::Space(s) => s.clone(),
            })
            .collect()
    }

    /// Options handed to every strategy created so far.
    pub(crate) fn options(&self) -> Vec<StrategyOptions> {
        self.recorded.lock().unwrap().options.clone()
    }

    pub(crate) fn finished(&self) -> usize {
        self.recorded.lock().unwrap().finished
    }
}

impl StrategyFactory for RecordingFactory {
    fn name(&self) -> &str {
        "Recording"
    }

    fn create(&self, options: StrategyOptions) -> Result<Box<dyn ConcatStrategy>> {
        let output_file = options.output_file.clone();
        {
            let mut recorded = self.recorded.lock().unwrap();
            recorded.ops.clear();
            recorded.options.push(options);
        }
        Ok(Box::new(RecordingStrategy {
            recorded: Arc::clone(&self.recorded),
            missing: self.missing.clone(),
            output_file,
        }))
    }
}

struct RecordingStrategy {
    recorded: Arc<Mutex<Recorded>>,
    missing: Vec<String>,
    output_file: std::path::PathBuf,
}

impl ConcatStrategy for RecordingStrategy {
    fn add_file(&mut self, relative_path: &str) -> Result<()> {
        if self.missing.iter().any(|m| m == relative_path) {
            return Err(ConcatError::Strategy(format!(
                "ENOENT: no such file or directory '{}'",
                relative_path
            )));
        }
        self.recorded
            .lock()
            .unwrap()
            .ops
            .push(Op::File(relative_path.to_string()));
        Ok(())
    }

    fn add_space(&mut self, text: &str) -> Result<()> {
        self.recorded
            .lock()
            .unwrap()
            .ops
            .push(Op::Space(text.to_string()));
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<ConcatOutput> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.finished += 1;
        let bytes_written = recorded
            .ops
            .iter()
            .map(|op| match op {
                Op::File(f) => f.len(),
                Op::Space(s) => s.len(),
            })
            .sum();
        Ok(ConcatOutput {
            output_file: self.output_file.clone(),
            bytes_written,
        })
    }
}

/// Discovered entries for `relative` paths, rooted at `root` the way a
/// listing would report them.
pub(crate) fn discovered(root: &Path, relative: &[&str]) -> Vec<String> {
    let posix_root = posix_path(root);
    relative
        .iter()
        .map(|rel| format!("{}/{}", posix_root, rel))
        .collect()
}

pub(crate) fn build_input(root: &Path, relative: &[&str]) -> BuildInput {
    BuildInput::new(root, root.join("dist"), discovered(root, relative))
}
