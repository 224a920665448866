//! Pipeline configuration
//!
//! [`PipelineConfig`] is plain data: the CLI builds one from its arguments and
//! tests build one with `Default` plus struct-update syntax.

use std::path::PathBuf;
use std::time::Duration;

/// Default bound on a single demangler invocation
pub const DEFAULT_DEMANGLE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Literal sentinels the game writes into its crash log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMarkers {
    /// Message body that opens an old-format (single column) stack trace
    pub old_stack_trace: String,
    /// Prefix of the table-format stack trace header row
    pub table_header_prefix: String,
    /// Column title that must appear in the table-format header row
    pub table_header_column: String,
    /// Tag preceding each failure message (`FAIL-MSG: ...`)
    pub failure_message: String,
    /// Substring that opens the data stack trace block
    pub data_stack_trace: String,
    /// First gate of the data-file reference scan
    pub app_failed: String,
    /// Second gate of the data-file reference scan
    pub stack_trace_start: String,
    /// Extension of script data files (`dta`), without the dot
    pub data_extension: String,
}

impl Default for LogMarkers {
    fn default() -> Self {
        Self {
            old_stack_trace: "Stack Trace (map file unavailable)".to_string(),
            table_header_prefix: "Address:".to_string(),
            table_header_column: "LR Save".to_string(),
            failure_message: "FAIL-MSG".to_string(),
            data_stack_trace: "Data Stack Trace".to_string(),
            app_failed: "APP FAILED".to_string(),
            stack_trace_start: "start stack trace".to_string(),
            data_extension: "dta".to_string(),
        }
    }
}

/// How frames get demangled
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DemangleMode {
    /// Probe for `cwdemangle` next to the executable, then on `PATH`
    #[default]
    Auto,
    /// Use this tool and nothing else (still probed once)
    Tool(PathBuf),
    /// Keep mangled names only
    Disabled,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub markers: LogMarkers,
    /// Base directory for relative data-file paths
    pub data_root: PathBuf,
    pub demangle: DemangleMode,
    pub demangle_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            markers: LogMarkers::default(),
            data_root: PathBuf::from("."),
            demangle: DemangleMode::Auto,
            demangle_timeout: DEFAULT_DEMANGLE_TIMEOUT,
        }
    }
}
