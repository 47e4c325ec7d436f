//! The concatenation engine.
//!
//! A [`ConcatEngine`] is created once from validated options and then run
//! (via [`ConcatEngine::build`]) every time the change-detection layer
//! decides the inputs moved. Each run:
//!
//! 1. resolves the output path and makes sure its directory exists
//! 2. asks the strategy factory for a fresh strategy
//! 3. writes sections in a fixed order: literal header, header files, body
//!    files, footer files, literal footer
//! 4. returns what the strategy's `finish` produced
//!
//! Body files come from the run's discovered file list, deduplicated, with
//! directories and anything already used as a header or footer file removed.

mod sections;


pub use sections::SectionKind;

use crate::config::{ConcatOptions, ResolvedConfig};
use crate::error::{ConcatError, Result};
use crate::fs::ensure_parent_dir;
use crate::listing::InputSensitivity;
use crate::overlap::OverlapIndex;
use crate::paths::{ensure_posix, is_directory, posix_path, relative_to_root};
use crate::strategy::{ConcatOutput, EncoderCache, StrategyFactory, StrategyOptions};
use sections::SectionWriter;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// One run's view of the world, supplied by the caller.
#[derive(Debug, Clone)]
pub struct BuildInput {
    /// Root of the single input tree.
    pub input_root: PathBuf,
    /// Directory the output file is resolved against.
    pub output_root: PathBuf,
    /// Discovered entries under `input_root`, in discovery order.
    /// Directories end with a trailing `/`.
    pub files: Vec<String>,
}

impl BuildInput {
    pub fn new(
        input_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        files: Vec<String>,
    ) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            files,
        }
    }
}

/// Orchestrates concatenation runs for one output file.
///
/// `build` takes `&mut self`: runs on one engine are serialized by the
/// borrow checker. Use one engine per independent output.
pub struct ConcatEngine {
    config: ResolvedConfig,
    factory: Arc<dyn StrategyFactory>,
    sensitivity: InputSensitivity,
    overlap: OverlapIndex,
    encoder_cache: EncoderCache,
    runs: u64,
}

impl std::fmt::Debug for ConcatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConcatEngine")
            .field("name", &self.name())
            .field("config", &self.config)
            .field("sensitivity", &self.sensitivity.patterns())
            .field("runs", &self.runs)
            .finish()
    }
}

impl ConcatEngine {
    /// Validate options and create an engine.
    ///
    /// # Errors
    ///
    /// `ConcatError::Configuration` when `outputFile` is missing, when no
    /// strategy factory is given, when `headerFiles`/`footerFiles` contain a
    /// glob character, or when an input pattern does not compile.
    pub fn new(options: ConcatOptions, factory: Option<Arc<dyn StrategyFactory>>) -> Result<Self> {
        options.require_output_file()?;

        let factory = factory.ok_or_else(|| {
            ConcatError::Configuration("ConcatWithMaps requires a concat Strategy".to_string())
        })?;

        let config = options.resolve()?;
        let sensitivity = InputSensitivity::from_lists(
            &config.header_files,
            config.input_files.as_deref(),
            &config.footer_files,
        )?;
        let overlap = OverlapIndex::new(&config.header_files, &config.footer_files);

        debug!(
            name = %format!("{}Concat", factory.name()),
            output = %config.output_file,
            annotation = config.annotation.as_deref().unwrap_or(""),
            "created concat engine"
        );

        Ok(Self {
            config,
            factory,
            sensitivity,
            overlap,
            encoder_cache: EncoderCache::new(),
            runs: 0,
        })
    }

    /// Convenience constructor taking the factory by value.
    pub fn with_strategy<F>(options: ConcatOptions, factory: F) -> Result<Self>
    where
        F: StrategyFactory + 'static,
    {
        Self::new(options, Some(Arc::new(factory)))
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Files the change-detection layer should watch.
    pub fn sensitivity(&self) -> &InputSensitivity {
        &self.sensitivity
    }

    pub fn annotation(&self) -> Option<&str> {
        self.config.annotation.as_deref()
    }

    /// Label of this engine, e.g. `SimpleConcat`.
    pub fn name(&self) -> String {
        format!("{}Concat", self.factory.name())
    }

    /// The cache threaded through every strategy this engine creates.
    pub fn encoder_cache(&self) -> &EncoderCache {
        &self.encoder_cache
    }

    /// Number of runs that finished successfully.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Run one concatenation.
    ///
    /// Errors raised by the strategy propagate unchanged; a run that fails
    /// never reaches `finish`, so no artifact is written.
    pub fn build(&mut self, input: &BuildInput) -> Result<ConcatOutput> {
        let output_file = input.output_root.join(&self.config.output_file);
        ensure_parent_dir(&output_file)?;

        let options = StrategyOptions::new(
            output_file,
            input.input_root.clone(),
            self.encoder_cache.clone(),
            &self.config.source_map_config,
        );
        let strategy = self.factory.create(options)?;
        let mut writer = SectionWriter::new(strategy, &self.config.separator);

        if let Some(header) = &self.config.header {
            writer.literal(SectionKind::HeaderLiteral, header)?;
        }

        for file in &self.config.header_files {
            writer.file(SectionKind::HeaderFile, file)?;
        }

        self.add_files(&mut writer, input)?;

        for file in &self.config.footer_files {
            writer.file(SectionKind::FooterFile, file)?;
        }

        if let Some(footer) = &self.config.footer {
            writer.literal(SectionKind::FooterLiteral, &format!("{}\n", footer))?;
        }

        let sections = writer.sections();
        let output = writer.finish()?;
        self.runs += 1;

        info!(
            output = %output.output_file.display(),
            bytes = output.bytes_written,
            sections,
            "concatenation finished"
        );
        Ok(output)
    }

    fn add_files(&self, writer: &mut SectionWriter<'_>, input: &BuildInput) -> Result<()> {
        for file in self.resolve_body_files(input)? {
            writer.file(SectionKind::BodyFile, &file)?;
        }
        Ok(())
    }

    /// Body files for a run, relative to the input root, in discovery order.
    ///
    /// # Errors
    ///
    /// `ConcatError::NoMatch` when nothing is left, no header/footer overlap
    /// explains it, and `allowNone` is off.
    pub fn resolve_body_files(&self, input: &BuildInput) -> Result<Vec<String>> {
        let posix_root = posix_path(&input.input_root);
        let mut seen = HashSet::new();
        let mut overlap_occurred = false;
        let mut files = Vec::new();

        for discovered in &input.files {
            let file = ensure_posix(discovered);
            if !seen.insert(file.clone()) {
                continue;
            }

            let relative = relative_to_root(&file, &posix_root);
            if self.overlap.contains(&relative) {
                overlap_occurred = true;
                continue;
            }
            if is_directory(&file) {
                continue;
            }
            files.push(relative);
        }

        if !overlap_occurred && files.is_empty() && !self.config.allow_none {
            return Err(ConcatError::NoMatch {
                patterns: self.config.input_files.clone().unwrap_or_default(),
            });
        }

        debug!(
            body_files = files.len(),
            overlap_occurred, "resolved body files"
        );
        Ok(files)
    }
}
