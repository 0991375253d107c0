//! JSON report format

use anyhow::Result;
use termcolor::WriteColor;

use super::{CleaningReport, ReportFormatter};

/// JSON report formatter
pub struct JsonReport {
    pretty: bool,
}

impl JsonReport {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonReport {
    fn render(&self, report: &CleaningReport, writer: &mut dyn WriteColor) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, report)?;
        } else {
            serde_json::to_writer(&mut *writer, report)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}
