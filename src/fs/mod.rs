//! Filesystem utilities for concat-maps.
//!
//! Output artifacts are written atomically so an interrupted rebuild never
//! leaves a truncated bundle behind for the next stage of the pipeline.

pub mod atomic;

pub use atomic::{atomic_write, ensure_parent_dir};
