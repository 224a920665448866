//! Structured error types for crashlens
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! Only [`MapError`] is fatal to an analysis; everything a log can throw at the
//! pipeline is recovered locally and shows up as an empty or flagged result.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// The linker map could not be read as text.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("Failed to read map file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Map file is not text: invalid UTF-8 after byte {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("Map file is not text: NUL byte on line {line}")]
    BinaryContent { line: usize },
}

/// A single demangling attempt failed. Never fatal; the frame keeps its mangled name.
#[derive(Error, Debug)]
pub enum DemangleError {
    #[error("Demangler unavailable")]
    Unavailable,

    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} timed out after {timeout_ms}ms")]
    TimedOut { tool: String, timeout_ms: u128 },

    #[error("{tool} exited with {status}")]
    Failed { tool: String, status: ExitStatus },

    #[error("{tool} produced no output")]
    EmptyOutput { tool: String },

    #[error("{tool} failed the capability probe (got {got:?})")]
    ProbeMismatch { tool: String, got: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error("Invalid log marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to read log file {path}: {source}")]
    LogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write resolved stack to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
