//! Options loading, validation, and resolution.

use super::model::ConcatOptions;
use super::types::{DEFAULT_SEPARATOR, ResolvedConfig};
use crate::error::{ConcatError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static GLOB_MAGIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[{}*\[\]]").expect("Invalid glob magic regex"));

impl ConcatOptions {
    /// Load options from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(ConcatOptions)` - Successfully loaded and validated options
    /// * `Err(ConcatError::Configuration)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConcatError::Configuration(format!(
                "failed to read concat config '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse options from a YAML string and validate them.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let options: ConcatOptions = serde_yaml::from_str(yaml).map_err(|e| {
            ConcatError::Configuration(format!("failed to parse concat config YAML: {}", e))
        })?;

        options.validate()?;
        Ok(options)
    }

    /// Serialize options to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            ConcatError::Configuration(format!("failed to serialize concat config to YAML: {}", e))
        })
    }

    /// Validate options without resolving them.
    ///
    /// Validation rules:
    /// - `outputFile` must be present and non-empty
    /// - `headerFiles` and `footerFiles` must name exact files (no `{ } * [ ]`)
    pub fn validate(&self) -> Result<()> {
        self.require_output_file()?;
        ensure_no_magic("headerFiles", self.header_files.as_deref())?;
        ensure_no_magic("footerFiles", self.footer_files.as_deref())?;
        Ok(())
    }

    pub(crate) fn require_output_file(&self) -> Result<&str> {
        match self.output_file.as_deref() {
            Some(file) if !file.is_empty() => Ok(file),
            _ => Err(ConcatError::Configuration(
                "the outputFile option is required".to_string(),
            )),
        }
    }

    /// Validate and convert into the immutable form held by an engine.
    pub fn resolve(self) -> Result<ResolvedConfig> {
        self.validate()?;
        let output_file = self.require_output_file()?.to_string();

        let mut source_map_config = self.source_map_config.unwrap_or_default();
        source_map_config.remove("enabled");

        Ok(ResolvedConfig {
            output_file,
            input_files: self.input_files,
            header_files: self.header_files.unwrap_or_default(),
            footer_files: self.footer_files.unwrap_or_default(),
            header: self.header.filter(|h| !h.is_empty()),
            footer: self.footer.filter(|f| !f.is_empty()),
            separator: self
                .separator
                .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
            allow_none: self.allow_none,
            source_map_config,
            annotation: self.annotation,
        })
    }
}

/// Returns true if `entry` contains a glob metacharacter.
pub(crate) fn has_glob_magic(entry: &str) -> bool {
    GLOB_MAGIC.is_match(entry)
}

fn ensure_no_magic(field_name: &str, list: Option<&[String]>) -> Result<()> {
    for entry in list.unwrap_or_default() {
        if has_glob_magic(entry) {
            return Err(ConcatError::Configuration(format!(
                "{} cannot contain a glob, `{}`",
                field_name, entry
            )));
        }
    }
    Ok(())
}
