//! concat-maps: deterministic file concatenation with pluggable backends.
//!
//! A [`ConcatEngine`] joins a literal header, header files, the discovered
//! body files, footer files and a literal footer into one output, inserting
//! a separator between sections. The actual appending and encoding is done
//! by a [`ConcatStrategy`] so that source-map-aware backends can be swapped
//! in for plain concatenation. A [`Rebuilder`] skips runs whose inputs have
//! not changed.
//!
//! ```no_run
//! use concat_maps::{ConcatEngine, ConcatOptions, Rebuilder, SimpleConcatFactory};
//! use std::path::Path;
//!
//! let options = ConcatOptions::new("assets/app.js")
//!     .with_input_files(["app/**/*.js"])
//!     .with_header_files(["vendor/loader.js"]);
//! let engine = ConcatEngine::with_strategy(options, SimpleConcatFactory)?;
//!
//! let mut rebuilder = Rebuilder::new(engine);
//! rebuilder.rebuild(Path::new("src"), Path::new("dist"))?;
//! # Ok::<(), concat_maps::ConcatError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod fs;
pub mod listing;
pub mod overlap;
pub mod paths;
pub mod rebuild;
pub mod strategy;
pub mod telemetry;

#[cfg(test)]
mod test_support;

pub use config::{ConcatOptions, ResolvedConfig, SourceMapConfig};
pub use engine::{BuildInput, ConcatEngine, SectionKind};
pub use error::{ConcatError, ErrorKind, Result};
pub use listing::{InputSensitivity, TreeListing, WalkListing};
pub use overlap::OverlapIndex;
pub use rebuild::{Fingerprint, RebuildOutcome, Rebuilder};
pub use strategy::{
    ConcatOutput, ConcatStrategy, EncoderCache, SimpleConcat, SimpleConcatFactory,
    StrategyFactory, StrategyOptions,
};
