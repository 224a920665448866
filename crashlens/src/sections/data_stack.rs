//! The "Data Stack Trace" block
//!
//! After a script error the game prints the chain of data-file locations that
//! were executing, one `file.ext(line)` per row. The block has no end marker,
//! so it ends at the first blank line or the first row without a location.

use log::debug;
use regex::Regex;
use std::sync::LazyLock;

use crate::domain::DataFileReference;
use crate::log_line::message_body;

/// `path.ext(NN)` anywhere in a line
pub static PATH_WITH_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\S+\.\w+)\((\d+)\)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    Before,
    InBlock,
    Done,
}

/// Collect the lines of the data stack trace block
///
/// Lines are returned without their log header and trimmed. A log without the
/// marker yields no lines.
#[must_use]
pub fn scan_data_stack_trace(log_text: &str, marker: &str) -> Vec<String> {
    let mut state = BlockState::Before;
    let mut lines = Vec::new();

    for line in log_text.lines() {
        match state {
            BlockState::Before => {
                if line.contains(marker) {
                    state = BlockState::InBlock;
                }
            }
            BlockState::InBlock => {
                if line.trim().is_empty() {
                    state = BlockState::Done;
                    continue;
                }
                let content = message_body(line).trim();
                if PATH_WITH_LINE.is_match(content) {
                    lines.push(content.to_string());
                } else {
                    debug!("Data stack trace ended at {content:?}");
                    state = BlockState::Done;
                }
            }
            BlockState::Done => break,
        }
    }

    lines
}

/// Pull every `path.ext(NN)` out of data stack trace lines
///
/// Order is kept and duplicates are not removed, so the result lines up with
/// the displayed block.
#[must_use]
pub fn references_from_block(lines: &[String]) -> Vec<DataFileReference> {
    lines
        .iter()
        .flat_map(|line| PATH_WITH_LINE.captures_iter(line))
        .filter_map(|captures| {
            let line = captures[2].parse::<u32>().ok()?;
            Some(DataFileReference::new(&captures[1], line))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "0:00:05 Core/HW/EXI_DeviceIPL.cpp:258 N[OSREPORT]:";

    #[test]
    fn test_block_ends_at_blank_line() {
        let log = format!(
            "{HEADER} Data Stack Trace\n\
             {HEADER}   ui/screens/main.dta(12)\n\
             {HEADER}   ui/screens/main.dta(40)\n\
             \n\
             {HEADER}   ui/screens/other.dta(3)\n"
        );
        let lines = scan_data_stack_trace(&log, "Data Stack Trace");
        assert_eq!(lines, vec!["ui/screens/main.dta(12)", "ui/screens/main.dta(40)"]);
    }

    #[test]
    fn test_block_ends_at_first_nonconforming_line() {
        let log = format!(
            "{HEADER} Data Stack Trace\n\
             {HEADER} config/song.dta(7) in handle\n\
             {HEADER} THREAD-ID 3\n\
             {HEADER} config/song.dta(8)\n"
        );
        let lines = scan_data_stack_trace(&log, "Data Stack Trace");
        assert_eq!(lines, vec!["config/song.dta(7) in handle"]);
    }

    #[test]
    fn test_header_only_line_counts_as_nonconforming() {
        let log = format!("Data Stack Trace\n{HEADER}\nx.dta(1)\n");
        assert!(scan_data_stack_trace(&log, "Data Stack Trace").is_empty());
    }

    #[test]
    fn test_missing_block() {
        assert!(scan_data_stack_trace("a.dta(1)\n", "Data Stack Trace").is_empty());
    }

    #[test]
    fn test_references_keep_order_and_duplicates() {
        let lines = vec!["x.dta(12) x.dta(12)".to_string(), "ui/y.dta(3)".to_string()];
        let refs = references_from_block(&lines);
        assert_eq!(
            refs,
            vec![
                DataFileReference::new("x.dta", 12),
                DataFileReference::new("x.dta", 12),
                DataFileReference::new("ui/y.dta", 3),
            ]
        );
    }
}
