//! Stack trace handling
//!
//! - `parser`: detects which of the two stack trace encodings a log uses,
//!   extracts its addresses, and resolves them through the symbol table
//! - `output`: the resolved-stack file format

pub mod output;
pub mod parser;

pub use output::{format_frame_line, save_resolved_stack, write_resolved_stack};
pub use parser::{scan_stack_trace, RawStackTrace, StackTrace, StackTraceParser, TraceFormat};
