//! Report export
//!
//! Writes a [`crate::report::Report`] as JSON for tooling that post-processes
//! crash analyses (bug trackers, dashboards, diffing two crashes).

pub mod json;

pub use json::ReportExporter;
