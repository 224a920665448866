//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{DemangleMode, PipelineConfig};

#[derive(Parser, Debug)]
#[command(
    name = "crashlens",
    version,
    about = "Resolve and annotate game crash logs against a linker map",
    after_help = "\
EXAMPLES:
    crashlens --map main.map --log crash.log --out stack.txt
    crashlens --map main.map --log crash.log --out stack.txt --dta-root ./data
    crashlens --map main.map --log crash.log --out stack.txt --export crash.json --no-snippets"
)]
pub struct Args {
    /// Linker map file of the crashed build
    #[arg(long, value_name = "FILE")]
    pub map: PathBuf,

    /// Crash log captured from the console
    #[arg(long, value_name = "FILE")]
    pub log: PathBuf,

    /// Where to write the resolved stack trace
    #[arg(long, value_name = "FILE")]
    pub out: PathBuf,

    /// Directory that data file paths in the log are relative to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dta_root: PathBuf,

    /// Demangler to use instead of searching for cwdemangle
    #[arg(long, value_name = "PATH", conflicts_with = "no_demangle")]
    pub demangler: Option<PathBuf>,

    /// Keep mangled symbol names
    #[arg(long)]
    pub no_demangle: bool,

    /// Time limit for a single demangler call, in milliseconds
    #[arg(long, value_name = "MS", default_value = "2000")]
    pub demangle_timeout_ms: u64,

    /// Also write the full report as JSON
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Don't print data file excerpts
    #[arg(long)]
    pub no_snippets: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    #[must_use]
    pub fn demangle_mode(&self) -> DemangleMode {
        if self.no_demangle {
            DemangleMode::Disabled
        } else if let Some(ref tool) = self.demangler {
            DemangleMode::Tool(tool.clone())
        } else {
            DemangleMode::Auto
        }
    }

    #[must_use]
    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            data_root: self.dta_root.clone(),
            demangle: self.demangle_mode(),
            demangle_timeout: Duration::from_millis(self.demangle_timeout_ms),
            ..PipelineConfig::default()
        }
    }
}
