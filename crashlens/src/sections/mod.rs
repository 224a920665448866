//! Log section extraction
//!
//! Three scans over the same log text, each with its own state held in local
//! variables:
//!
//! - `failures`: every `FAIL-MSG: ...` line, ungated
//! - `data_stack`: the "Data Stack Trace" block
//! - `references`: `(file x.dta, line N)` references after the two failure sentinels
//!
//! The scans share nothing but the (read-only) log text, so one
//! [`SectionExtractor`] can serve any number of logs, in any order.

pub mod data_stack;
pub mod failures;
pub mod references;

use regex::Regex;

use crate::config::LogMarkers;
use crate::domain::DataFileReference;

pub use data_stack::{references_from_block, scan_data_stack_trace};
pub use failures::scan_failure_messages;
pub use references::{scan_gated_references, Gate};

/// Everything the section scans found in one log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSections {
    pub failure_messages: Vec<String>,
    pub data_stack_trace: Vec<String>,
    /// Deduplicated and sorted
    pub gated_references: Vec<DataFileReference>,
}

/// Marker-specific patterns compiled once per configuration
#[derive(Debug, Clone)]
pub struct SectionExtractor {
    markers: LogMarkers,
    failure_pattern: Regex,
    reference_pattern: Regex,
}

impl SectionExtractor {
    /// # Errors
    /// Returns an error if a marker produces an invalid pattern
    pub fn new(markers: &LogMarkers) -> Result<Self, regex::Error> {
        Ok(Self {
            failure_pattern: failures::failure_pattern(&markers.failure_message)?,
            reference_pattern: references::reference_pattern(&markers.data_extension)?,
            markers: markers.clone(),
        })
    }

    #[must_use]
    pub fn failure_messages(&self, log_text: &str) -> Vec<String> {
        scan_failure_messages(log_text, &self.failure_pattern)
    }

    #[must_use]
    pub fn data_stack_trace(&self, log_text: &str) -> Vec<String> {
        scan_data_stack_trace(log_text, &self.markers.data_stack_trace)
    }

    #[must_use]
    pub fn gated_references(&self, log_text: &str) -> Vec<DataFileReference> {
        let gate =
            Gate { failed: &self.markers.app_failed, start: &self.markers.stack_trace_start };
        scan_gated_references(log_text, gate, &self.reference_pattern)
    }

    /// Run all three scans
    #[must_use]
    pub fn extract(&self, log_text: &str) -> LogSections {
        LogSections {
            failure_messages: self.failure_messages(log_text),
            data_stack_trace: self.data_stack_trace(log_text),
            gated_references: self.gated_references(log_text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_all_sections() {
        let log = "\
FAIL-MSG: Script error
Data Stack Trace
  ui/main.dta(12)

APP FAILED
start stack trace
  (file ui/main.dta, line 12)
";
        let extractor = SectionExtractor::new(&LogMarkers::default()).unwrap();
        let sections = extractor.extract(log);
        assert_eq!(sections.failure_messages, vec!["Script error"]);
        assert_eq!(sections.data_stack_trace, vec!["ui/main.dta(12)"]);
        assert_eq!(sections.gated_references, vec![DataFileReference::new("ui/main.dta", 12)]);
    }

    #[test]
    fn test_absent_sections_are_empty() {
        let extractor = SectionExtractor::new(&LogMarkers::default()).unwrap();
        assert_eq!(extractor.extract("just noise\n"), LogSections::default());
    }

    #[test]
    fn test_custom_extension() {
        let markers = LogMarkers { data_extension: "dtx".to_string(), ..LogMarkers::default() };
        let extractor = SectionExtractor::new(&markers).unwrap();
        let log = "APP FAILED\nstart stack trace\n(file a.dtx, line 1)\n(file b.dta, line 2)\n";
        assert_eq!(extractor.gated_references(log), vec![DataFileReference::new("a.dtx", 1)]);
    }
}
