//! Resolved-stack file format
//!
//! One line per frame: `<symbol address>: <symbol name>`, and when a
//! demangled form exists the line is padded to [`DEMANGLE_COLUMN`] and
//! followed by ` -> <demangled name>`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::symbolization::ResolvedFrame;

/// Column the ` -> ` arrow is aligned to
pub const DEMANGLE_COLUMN: usize = 60;

/// Format a single frame as a resolved-stack line (without newline)
#[must_use]
pub fn format_frame_line(frame: &ResolvedFrame) -> String {
    let line = format!("{:x}: {}", frame.symbol_address, frame.symbol_name);
    match frame.demangled_name.as_deref() {
        Some(demangled) if !demangled.is_empty() => {
            format!("{line:<width$} -> {demangled}", width = DEMANGLE_COLUMN)
        }
        _ => line,
    }
}

/// Write all frames in resolved-stack format
///
/// # Errors
/// Returns an error if writing fails
pub fn write_resolved_stack<W: Write>(frames: &[ResolvedFrame], mut writer: W) -> io::Result<()> {
    for frame in frames {
        writeln!(writer, "{}", format_frame_line(frame))?;
    }
    writer.flush()
}

/// Create (or truncate) `path` and write the frames to it
///
/// # Errors
/// Returns an error if the file cannot be created or written
pub fn save_resolved_stack<P: AsRef<Path>>(frames: &[ResolvedFrame], path: P) -> io::Result<()> {
    let file = File::create(path)?;
    write_resolved_stack(frames, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Address;

    fn frame(symbol_address: u64, name: &str, demangled: Option<&str>) -> ResolvedFrame {
        ResolvedFrame {
            stack_address: Address(symbol_address + 0x10),
            symbol_address: Address(symbol_address),
            symbol_name: name.to_string(),
            demangled_name: demangled.map(str::to_string),
        }
    }

    #[test]
    fn test_line_without_demangled_name() {
        let line = format_frame_line(&frame(0x8000_31a4, "main__FPCci", None));
        assert_eq!(line, "800031a4: main__FPCci");
    }

    #[test]
    fn test_line_with_demangled_name_is_padded() {
        let line =
            format_frame_line(&frame(0x8000_31a4, "main__FPCci", Some("main(const char*, int)")));
        assert_eq!(line.find(" -> "), Some(DEMANGLE_COLUMN));
        assert!(line.starts_with("800031a4: main__FPCci "));
        assert!(line.ends_with(" -> main(const char*, int)"));
    }

    #[test]
    fn test_long_symbol_is_not_truncated() {
        let name = "x".repeat(80);
        let line = format_frame_line(&frame(0x1, &name, Some("x()")));
        assert_eq!(line, format!("1: {name} -> x()"));
    }

    #[test]
    fn test_invalid_frame_line() {
        let line = format_frame_line(&ResolvedFrame::invalid(Address(0x10)));
        assert_eq!(line, "10: <invalid>");
    }

    #[test]
    fn test_write_resolved_stack() {
        let frames = vec![frame(0x100, "a", None), frame(0x200, "b", None)];
        let mut buffer = Vec::new();
        write_resolved_stack(&frames, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "100: a\n200: b\n");
    }
}
