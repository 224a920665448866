//! Analysis result and its plain-text rendering
//!
//! [`Report`] is what the pipeline hands to the presentation layer. The text
//! rendering here is deliberately plain (no colour); `--export` writes the
//! same data as JSON.

use serde::Serialize;
use std::io::{self, Write};

use crate::correction::Correction;
use crate::domain::DataFileReference;
use crate::stack_trace::{format_frame_line, StackTrace};

/// Where the report's data-file references came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceSource {
    /// `(file x.dta, line N)` lines after the failure sentinels (deduplicated, sorted)
    Gated,
    /// `x.dta(N)` tokens of the data stack trace block (log order, duplicates kept)
    DataStackTrace,
    /// The log had neither
    #[default]
    None,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub symbol_count: usize,
    pub stack_trace: StackTrace,
    pub failure_messages: Vec<String>,
    pub data_stack_trace: Vec<String>,
    pub reference_source: ReferenceSource,
    /// After correction
    pub references: Vec<DataFileReference>,
    pub corrections: Vec<Correction>,
    pub uncorrectable: Vec<DataFileReference>,
}

impl Report {
    /// True when any reference was flagged as uncorrectable
    #[must_use]
    pub fn has_uncorrectable(&self) -> bool {
        !self.uncorrectable.is_empty()
    }
}

/// Render the report as plain text
///
/// # Errors
/// Returns an error if writing fails
pub fn write_report<W: Write>(report: &Report, mut out: W) -> io::Result<()> {
    writeln!(out, "\n=== Resolved Stack Trace ===\n")?;
    if report.stack_trace.frames.is_empty() {
        writeln!(out, " (none found)")?;
    }
    for frame in &report.stack_trace.frames {
        writeln!(out, "{}", format_frame_line(frame))?;
    }

    writeln!(out, "\n=== FAIL-MSGs ===\n")?;
    if report.failure_messages.is_empty() {
        writeln!(out, " (none found)")?;
    }
    for message in &report.failure_messages {
        writeln!(out, " • {message}")?;
    }

    if !report.data_stack_trace.is_empty() {
        writeln!(out, "\n=== Data Stack Trace ===\n")?;
        for line in &report.data_stack_trace {
            writeln!(out, "{line}")?;
        }
    }

    match report.reference_source {
        ReferenceSource::None => writeln!(out, "\nNo post-trace data file references found.")?,
        ReferenceSource::Gated => writeln!(out, "\n=== Data File References ===\n")?,
        ReferenceSource::DataStackTrace => {
            writeln!(out, "\n=== Data File References (from data stack trace) ===\n")?;
        }
    }
    for reference in &report.references {
        writeln!(out, " {reference}")?;
    }

    if !report.corrections.is_empty() {
        writeln!(out, "\n=== Corrected Paths ===\n")?;
        for c in &report.corrections {
            writeln!(out, " {} -> {} (line {})", c.from, c.to, c.line)?;
        }
    }

    if report.has_uncorrectable() {
        writeln!(out, "\n=== Missing Data Files ===\n")?;
        for reference in &report.uncorrectable {
            writeln!(out, " {reference}")?;
        }
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Address;
    use crate::symbolization::ResolvedFrame;

    fn render(report: &Report) -> String {
        let mut buffer = Vec::new();
        write_report(report, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_empty_report() {
        let text = render(&Report::default());
        assert!(text.contains("=== Resolved Stack Trace ==="));
        assert!(text.contains("=== FAIL-MSGs ===\n\n (none found)"));
        assert!(!text.contains("=== Data Stack Trace ==="));
        assert!(text.contains("No post-trace data file references found."));
    }

    #[test]
    fn test_full_report() {
        let report = Report {
            symbol_count: 3,
            stack_trace: StackTrace {
                format: None,
                frames: vec![ResolvedFrame::invalid(Address(0x10))],
            },
            failure_messages: vec!["Script error".to_string()],
            data_stack_trace: vec!["ui/main.dta(12)".to_string()],
            reference_source: ReferenceSource::DataStackTrace,
            references: vec![DataFileReference::new("ui/main.dta", 12)],
            corrections: vec![Correction {
                from: "ui/mian.dta".to_string(),
                to: "ui/main.dta".to_string(),
                line: 12,
            }],
            uncorrectable: Vec::new(),
        };
        let text = render(&report);
        assert!(text.contains("10: <invalid>"));
        assert!(text.contains(" • Script error"));
        assert!(text.contains("=== Data Stack Trace ===\n\nui/main.dta(12)"));
        assert!(text.contains("(from data stack trace)"));
        assert!(text.contains(" ui/main.dta @ line 12"));
        assert!(text.contains(" ui/mian.dta -> ui/main.dta (line 12)"));
        assert!(!text.contains("Missing Data Files"));
    }
}
