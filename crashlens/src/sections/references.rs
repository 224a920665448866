//! Gated data-file reference scan
//!
//! References of the form `(file ui/main.dta, line 12)` show up in many
//! places of a log. Only those printed after the game reported its failure
//! and then started its stack dump are relevant, so the scan opens in two
//! steps and only collects after both sentinels were seen, in order.

use log::debug;
use regex::Regex;
use std::collections::BTreeSet;

use crate::domain::DataFileReference;

/// Build the `(file <path>.<ext>, line <N>)` pattern for an extension
///
/// # Errors
/// Returns an error if the pattern fails to compile
pub fn reference_pattern(extension: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\(file\s+([^,]+\.{}),\s*line\s*(\d+)\)", regex::escape(extension)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    BeforeFailed,
    BeforeStart,
    Collecting,
}

/// The two sentinels that open the scan
#[derive(Debug, Clone, Copy)]
pub struct Gate<'a> {
    pub failed: &'a str,
    pub start: &'a str,
}

/// Collect the references printed after both gate sentinels
///
/// A line that opens a gate is consumed by it and not searched. Matches are
/// deduplicated and returned sorted by path, then line.
#[must_use]
pub fn scan_gated_references(
    log_text: &str,
    gate: Gate<'_>,
    pattern: &Regex,
) -> Vec<DataFileReference> {
    let mut state = GateState::BeforeFailed;
    let mut references = BTreeSet::new();

    for line in log_text.lines() {
        match state {
            GateState::BeforeFailed => {
                if line.contains(gate.failed) {
                    debug!("Failure sentinel found");
                    state = GateState::BeforeStart;
                }
            }
            GateState::BeforeStart => {
                if line.contains(gate.start) {
                    debug!("Stack trace start sentinel found, collecting references");
                    state = GateState::Collecting;
                }
            }
            GateState::Collecting => {
                let Some(captures) = pattern.captures(line) else {
                    continue;
                };
                if let Ok(number) = captures[2].parse::<u32>() {
                    references.insert(DataFileReference::new(captures[1].trim(), number));
                }
            }
        }
    }

    references.into_iter().collect()
}
