//! Section sequencing on top of a strategy.

use crate::error::Result;
use crate::strategy::{ConcatOutput, ConcatStrategy};
use std::fmt;
use tracing::debug;

/// One contiguous unit of emitted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    HeaderLiteral,
    HeaderFile,
    BodyFile,
    FooterFile,
    FooterLiteral,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionKind::HeaderLiteral => "header-literal",
            SectionKind::HeaderFile => "header-file",
            SectionKind::BodyFile => "body-file",
            SectionKind::FooterFile => "footer-file",
            SectionKind::FooterLiteral => "footer-literal",
        };
        f.write_str(name)
    }
}

/// Drives a strategy one section at a time.
///
/// The separator goes in front of every section except the first one
/// written in the run, so it never leads or trails the output.
pub(crate) struct SectionWriter<'a> {
    strategy: Box<dyn ConcatStrategy>,
    separator: &'a str,
    sections: usize,
}

impl<'a> SectionWriter<'a> {
    pub(crate) fn new(strategy: Box<dyn ConcatStrategy>, separator: &'a str) -> Self {
        Self {
            strategy,
            separator,
            sections: 0,
        }
    }

    fn begin_section(&mut self) -> Result<()> {
        if self.sections > 0 {
            self.strategy.add_space(self.separator)?;
        }
        self.sections += 1;
        Ok(())
    }

    pub(crate) fn literal(&mut self, kind: SectionKind, text: &str) -> Result<()> {
        self.begin_section()?;
        debug!(section = %kind, bytes = text.len(), "appending literal");
        self.strategy.add_space(text)
    }

    pub(crate) fn file(&mut self, kind: SectionKind, relative_path: &str) -> Result<()> {
        self.begin_section()?;
        debug!(section = %kind, file = relative_path, "appending file");
        self.strategy.add_file(relative_path)
    }

    pub(crate) fn sections(&self) -> usize {
        self.sections
    }

    pub(crate) fn finish(self) -> Result<ConcatOutput> {
        self.strategy.finish()
    }
}
