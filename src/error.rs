//! Error types for concat-maps.
//!
//! Uses thiserror for derive macros. Every message names the offending
//! configuration so a failed rebuild points straight at the cause.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for concatenation runs.
#[derive(Error, Debug)]
pub enum ConcatError {
    /// Invalid or missing construction parameters. Always raised before any I/O.
    #[error("{0}")]
    Configuration(String),

    /// Body-file selection produced nothing and nothing explains it.
    #[error("ConcatWithMaps: nothing matched [{}]", .patterns.join(","))]
    NoMatch { patterns: Vec<String> },

    /// Raised by a concatenation strategy (missing file, encode or write failure).
    #[error("{0}")]
    Strategy(String),

    /// Filesystem access outside of a strategy failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of a [`ConcatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    NoMatch,
    Strategy,
    Io,
}

impl ConcatError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConcatError::Configuration(_) => ErrorKind::Configuration,
            ConcatError::NoMatch { .. } => ErrorKind::NoMatch,
            ConcatError::Strategy(_) => ErrorKind::Strategy,
            ConcatError::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConcatError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for concat-maps operations.
pub type Result<T> = std::result::Result<T, ConcatError>;
