//! ConcatOptions struct definition.

use super::types::SourceMapConfig;
use serde::{Deserialize, Serialize};

/// Construction parameters for a concatenation engine.
///
/// Field names follow the camelCase spelling used in build configuration
/// files (`outputFile`, `headerFiles`, ...). Unknown keys are ignored for
/// forward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConcatOptions {
    /// Output path relative to the run's output root. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,

    /// Input patterns. Restricts discovery and names the inputs in
    /// "nothing matched" errors. `None` means every discovered file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_files: Option<Vec<String>>,

    /// Exact files emitted before the body, in order. No glob characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_files: Option<Vec<String>>,

    /// Exact files emitted after the body, in order. No glob characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_files: Option<Vec<String>>,

    /// Literal text emitted as the first section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,

    /// Literal text emitted as the last section, followed by a newline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,

    /// Text inserted between sections (default: `"\n"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,

    /// Permit an empty body without raising a no-match error.
    pub allow_none: bool,

    /// Options forwarded to the strategy. An `enabled` key is stripped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_map_config: Option<SourceMapConfig>,

    /// Label reported to the change-detection layer for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl ConcatOptions {
    /// Create options for the given output file with everything else defaulted.
    pub fn new(output_file: impl Into<String>) -> Self {
        Self {
            output_file: Some(output_file.into()),
            ..Self::default()
        }
    }

    pub fn with_input_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_files = Some(files.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_header_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header_files = Some(files.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_footer_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.footer_files = Some(files.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn with_allow_none(mut self, allow_none: bool) -> Self {
        self.allow_none = allow_none;
        self
    }

    pub fn with_source_map_config(mut self, config: SourceMapConfig) -> Self {
        self.source_map_config = Some(config);
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}
