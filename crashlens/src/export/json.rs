use serde::Serialize;
use std::io::Write;

use crate::domain::ExportError;
use crate::report::Report;

/// Top-level JSON document
#[derive(Serialize)]
struct ExportDocument<'a> {
    generator: String,
    #[serde(rename = "symbolCount")]
    symbol_count: usize,
    report: &'a Report,
}

/// Exports a report as pretty-printed JSON
pub struct ReportExporter<'a> {
    report: &'a Report,
}

impl<'a> ReportExporter<'a> {
    #[must_use]
    pub fn new(report: &'a Report) -> Self {
        Self { report }
    }

    /// Write the JSON document to `writer`
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails
    pub fn export<W: Write>(&self, mut writer: W) -> Result<(), ExportError> {
        let document = ExportDocument {
            generator: format!("crashlens {}", env!("CARGO_PKG_VERSION")),
            symbol_count: self.report.symbol_count,
            report: self.report,
        };
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
