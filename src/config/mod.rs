//! Configuration model for concat-maps.
//!
//! This module defines the [`ConcatOptions`] struct that callers build (or
//! load from a YAML file) to describe one concatenated output, and the
//! validated [`ResolvedConfig`] that an engine keeps for its lifetime.

mod model;
mod operations;
pub mod types;


pub use model::ConcatOptions;
pub use types::{DEFAULT_SEPARATOR, ResolvedConfig, SourceMapConfig};
