//! Stack trace extraction and resolution
//!
//! Finds the stack trace in a crash log, pulls out its addresses, and resolves
//! each one against the symbol table.

use log::{debug, info};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::config::LogMarkers;
use crate::domain::Address;
use crate::log_line::message_body;
use crate::symbolization::{Demangler, ResolvedFrame, SymbolTable};

/// Old format: one address per line
static OLD_FORMAT_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([0-9A-Fa-f]+)\b").unwrap());

/// Table format: `frame: back-chain  lr-save`, optional `0x`, any width
static TABLE_FORMAT_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:0[xX])?[0-9A-Fa-f]+:\s*(?:0[xX])?[0-9A-Fa-f]+\s+((?:0[xX])?[0-9A-Fa-f]+)\b",
    )
    .unwrap()
});

/// Which encoding the log used for its stack trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceFormat {
    /// `Stack Trace (map file unavailable)` followed by bare addresses
    Old,
    /// `Address: Back Chain LR Save` header followed by three-column rows
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    InTrace(TraceFormat),
    Done,
}

/// Addresses found in a log, in log order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawStackTrace {
    pub format: Option<TraceFormat>,
    pub addresses: Vec<Address>,
}

/// Scan a log for its stack trace
///
/// Lines before a trigger are ignored. Once inside a trace, the first row
/// that doesn't match the format's row shape ends it. A log with no trigger
/// yields an empty trace.
#[must_use]
pub fn scan_stack_trace(log_text: &str, markers: &LogMarkers) -> RawStackTrace {
    let mut state = ScanState::Scanning;
    let mut trace = RawStackTrace::default();

    for line in log_text.lines() {
        let message = message_body(line);
        match state {
            ScanState::Scanning => {
                if let Some(format) = detect_trigger(message, markers) {
                    debug!("Found {format:?} stack trace, reading addresses...");
                    trace.format = Some(format);
                    state = ScanState::InTrace(format);
                }
            }
            ScanState::InTrace(format) => {
                if let Some(address) = parse_row(message, format) {
                    trace.addresses.push(address);
                } else {
                    debug!("Reached end of stack trace.");
                    state = ScanState::Done;
                }
            }
            ScanState::Done => break,
        }
    }

    trace
}

fn detect_trigger(message: &str, markers: &LogMarkers) -> Option<TraceFormat> {
    if message == markers.old_stack_trace {
        Some(TraceFormat::Old)
    } else if message.starts_with(&markers.table_header_prefix)
        && message.contains(&markers.table_header_column)
    {
        Some(TraceFormat::Table)
    } else {
        None
    }
}

fn parse_row(message: &str, format: TraceFormat) -> Option<Address> {
    let pattern = match format {
        TraceFormat::Old => &OLD_FORMAT_ROW,
        TraceFormat::Table => &TABLE_FORMAT_ROW,
    };
    let captures = pattern.captures(message)?;
    Address::from_hex(&captures[1])
}

/// Resolved stack trace, ready for output
#[derive(Debug, Clone, Default, Serialize)]
pub struct StackTrace {
    pub format: Option<TraceFormat>,
    pub frames: Vec<ResolvedFrame>,
}

/// Stack trace parser - finds, resolves, and demangles stack frames
///
/// Borrows the symbol table and the demangler; both are shared, read-only
/// collaborators.
pub struct StackTraceParser<'a> {
    symbols: &'a SymbolTable,
    demangler: &'a dyn Demangler,
    markers: &'a LogMarkers,
}

impl<'a> StackTraceParser<'a> {
    pub fn new(
        symbols: &'a SymbolTable,
        demangler: &'a dyn Demangler,
        markers: &'a LogMarkers,
    ) -> Self {
        Self { symbols, demangler, markers }
    }

    /// Extract and resolve the stack trace of a log
    #[must_use]
    pub fn parse(&self, log_text: &str) -> StackTrace {
        let raw = scan_stack_trace(log_text, self.markers);
        let frames: Vec<ResolvedFrame> =
            raw.addresses.iter().map(|&address| self.resolve_frame(address)).collect();

        info!("Stack trace has {} frames", frames.len());
        StackTrace { format: raw.format, frames }
    }

    /// Resolve one address and attach its demangled name when available
    #[must_use]
    pub fn resolve_frame(&self, address: Address) -> ResolvedFrame {
        let mut frame = self.symbols.resolve(address);
        if !frame.is_invalid() {
            frame.demangled_name = match self.demangler.demangle(&frame.symbol_name) {
                Ok(name) => Some(name),
                Err(e) => {
                    debug!("No demangled form for {}: {e}", frame.symbol_name);
                    None
                }
            };
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DemangleError;
    use crate::symbolization::NoDemangler;

    const HEADER: &str = "12:03:44:512 Core/HW/EXI_DeviceIPL.cpp:258 N[OSREPORT]:";

    const MAP: &str = "\
00000000 0000a4 80003100 00000100 4 __start init.o
000000a4 000120 800031a4 000001a4 4 main__FPCci main.o
000001c4 000040 800032c4 000002c4 4 Update__3AppFv app.o
";

    /// Demangles by appending `()` to the name
    struct SuffixDemangler;

    impl Demangler for SuffixDemangler {
        fn demangle(&self, symbol: &str) -> Result<String, DemangleError> {
            if symbol.starts_with("__") {
                return Err(DemangleError::Unavailable);
            }
            Ok(format!("{symbol}()"))
        }
    }

    fn log(lines: &[&str]) -> String {
        lines.iter().map(|l| format!("{HEADER} {l}\n")).collect()
    }

    #[test]
    fn test_old_format_stops_at_first_non_hex_line() {
        let text = log(&[
            "Loading...",
            "Stack Trace (map file unavailable)",
            "800031b0",
            "800032d0",
            "80003104",
            "Thread halted.",
            "80003200",
        ]);
        let trace = scan_stack_trace(&text, &LogMarkers::default());
        assert_eq!(trace.format, Some(TraceFormat::Old));
        assert_eq!(
            trace.addresses,
            vec![Address(0x8000_31b0), Address(0x8000_32d0), Address(0x8000_3104)]
        );
    }

    #[test]
    fn test_old_format_without_header() {
        let text = "Stack Trace (map file unavailable)\n800031b0\n\n800031b4\n";
        let trace = scan_stack_trace(text, &LogMarkers::default());
        assert_eq!(trace.addresses, vec![Address(0x8000_31b0)]);
    }

    #[test]
    fn test_table_format_takes_third_column() {
        let text = log(&[
            "Address:   BackChain   LR Save",
            "0x80421f00: 0x80421f20 0x800031b0",
            "80421f20:  80421f60    800032d0",
            "--------",
        ]);
        let trace = scan_stack_trace(&text, &LogMarkers::default());
        assert_eq!(trace.format, Some(TraceFormat::Table));
        assert_eq!(trace.addresses, vec![Address(0x8000_31b0), Address(0x8000_32d0)]);
    }

    #[test]
    fn test_table_format_accepts_narrow_addresses() {
        let text = "Address: BackChain LR Save\n1f00: 1f20 31b0\n";
        let trace = scan_stack_trace(text, &LogMarkers::default());
        assert_eq!(trace.addresses, vec![Address(0x31b0)]);
    }

    #[test]
    fn test_no_trigger_yields_empty_trace() {
        let text = log(&["800031b0", "800032d0"]);
        let trace = scan_stack_trace(&text, &LogMarkers::default());
        assert_eq!(trace.format, None);
        assert!(trace.addresses.is_empty());
    }

    #[test]
    fn test_only_first_trace_is_read() {
        let text = log(&[
            "Stack Trace (map file unavailable)",
            "800031b0",
            "end",
            "Stack Trace (map file unavailable)",
            "800032d0",
        ]);
        let trace = scan_stack_trace(&text, &LogMarkers::default());
        assert_eq!(trace.addresses, vec![Address(0x8000_31b0)]);
    }

    #[test]
    fn test_parse_resolves_and_demangles() {
        let symbols = SymbolTable::parse(MAP).unwrap();
        let markers = LogMarkers::default();
        let demangler = SuffixDemangler;
        let parser = StackTraceParser::new(&symbols, &demangler, &markers);

        let text = log(&["Stack Trace (map file unavailable)", "800031b0", "80003104", "80000000"]);
        let trace = parser.parse(&text);

        assert_eq!(trace.frames.len(), 3);
        assert_eq!(trace.frames[0].symbol_name, "main__FPCci");
        assert_eq!(trace.frames[0].demangled_name.as_deref(), Some("main__FPCci()"));
        // Demangler failure keeps the frame, without a demangled name
        assert_eq!(trace.frames[1].symbol_name, "__start");
        assert_eq!(trace.frames[1].demangled_name, None);
        assert!(trace.frames[2].is_invalid());
    }

    #[test]
    fn test_parse_without_demangler() {
        let symbols = SymbolTable::parse(MAP).unwrap();
        let markers = LogMarkers::default();
        let parser = StackTraceParser::new(&symbols, &NoDemangler, &markers);

        let trace = parser.parse("Stack Trace (map file unavailable)\n800032c4\n");
        assert_eq!(trace.frames[0].symbol_name, "Update__3AppFv");
        assert_eq!(trace.frames[0].demangled_name, None);
    }
}
