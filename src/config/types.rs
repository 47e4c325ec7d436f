//! Validated configuration types and defaults.

use serde_json::{Map, Value};

/// Opaque strategy options, forwarded as-is apart from the `enabled` key.
pub type SourceMapConfig = Map<String, Value>;

/// Separator inserted between sections when none is configured.
pub const DEFAULT_SEPARATOR: &str = "\n";

/// Immutable, validated configuration held by an engine.
///
/// Produced by [`super::ConcatOptions::resolve`]. Empty `header`/`footer`
/// strings are folded into `None` since they produce no section.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub output_file: String,
    pub input_files: Option<Vec<String>>,
    pub header_files: Vec<String>,
    pub footer_files: Vec<String>,
    pub header: Option<String>,
    pub footer: Option<String>,
    pub separator: String,
    pub allow_none: bool,
    pub source_map_config: SourceMapConfig,
    pub annotation: Option<String>,
}
