//! Demangling through the external `cwdemangle` tool
//!
//! The tool is probed once, when the demangler is built. A failed probe yields
//! [`NoDemangler`], so the stack parser never has to know whether demangling
//! is available.

use log::{debug, warn};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::DemangleMode;
use crate::domain::DemangleError;

/// Name of the demangler executable
pub const DEMANGLER_TOOL: &str = "cwdemangle";

/// Symbol used to check that a candidate tool really demangles
const PROBE_SYMBOL: &str = "main__FPCci";
const PROBE_EXPECTED: &str = "main(const char*, int)";

/// Interval between checks on a running demangler process
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Turns a mangled symbol name into its readable form
pub trait Demangler: Send + Sync {
    /// # Errors
    /// Returns an error if the symbol could not be demangled; callers treat
    /// any error as "no demangled form".
    fn demangle(&self, symbol: &str) -> Result<String, DemangleError>;

    fn is_available(&self) -> bool {
        true
    }
}

impl<T: Demangler + ?Sized> Demangler for Box<T> {
    fn demangle(&self, symbol: &str) -> Result<String, DemangleError> {
        (**self).demangle(symbol)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// Stand-in used when no working demangler was found
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDemangler;

impl Demangler for NoDemangler {
    fn demangle(&self, _symbol: &str) -> Result<String, DemangleError> {
        Err(DemangleError::Unavailable)
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Runs an external demangler once per symbol, bounded by a timeout
#[derive(Debug, Clone)]
pub struct CommandDemangler {
    program: PathBuf,
    timeout: Duration,
}

impl CommandDemangler {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self { program: program.into(), timeout }
    }

    /// Check that the tool runs and demangles a known symbol correctly
    ///
    /// # Errors
    /// Returns an error if the tool is missing, fails, times out, or
    /// produces the wrong answer
    pub fn probe(self) -> Result<Self, DemangleError> {
        let got = self.demangle(PROBE_SYMBOL)?;
        if got == PROBE_EXPECTED {
            Ok(self)
        } else {
            Err(DemangleError::ProbeMismatch { tool: self.tool_name(), got })
        }
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn tool_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl Demangler for CommandDemangler {
    fn demangle(&self, symbol: &str) -> Result<String, DemangleError> {
        let mut child = Command::new(&self.program)
            .arg(symbol)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| DemangleError::Spawn { tool: self.tool_name(), source })?;

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                // Reap the child so it doesn't linger as a zombie
                let _ = child.kill();
                let _ = child.wait();
                return Err(DemangleError::TimedOut {
                    tool: self.tool_name(),
                    timeout_ms: self.timeout.as_millis(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        if !status.success() {
            return Err(DemangleError::Failed { tool: self.tool_name(), status });
        }

        let mut output = String::new();
        if let Some(mut stdout) = child.stdout.take() {
            stdout.read_to_string(&mut output)?;
        }
        let demangled = output.trim_end_matches(['\r', '\n']);
        if demangled.is_empty() {
            return Err(DemangleError::EmptyOutput { tool: self.tool_name() });
        }
        Ok(demangled.to_string())
    }
}

/// Build the demangler for a run
///
/// In [`DemangleMode::Auto`] the tool is looked for next to the running
/// executable first, then on `PATH`. A candidate is only accepted if it
/// passes the probe.
#[must_use]
pub fn probe_demangler(mode: &DemangleMode, timeout: Duration) -> Box<dyn Demangler> {
    let candidates = match mode {
        DemangleMode::Disabled => return Box::new(NoDemangler),
        DemangleMode::Tool(path) => vec![path.clone()],
        DemangleMode::Auto => auto_candidates(),
    };

    for candidate in candidates {
        match CommandDemangler::new(&candidate, timeout).probe() {
            Ok(demangler) => {
                debug!("Using {} for demangling", demangler.program().display());
                return Box::new(demangler);
            }
            Err(e) => debug!("Demangler candidate {} rejected: {e}", candidate.display()),
        }
    }

    warn!("Couldn't find {DEMANGLER_TOOL}, symbols will not be demangled.");
    Box::new(NoDemangler)
}

fn auto_candidates() -> Vec<PathBuf> {
    let tool = format!("{DEMANGLER_TOOL}{}", std::env::consts::EXE_SUFFIX);
    let mut candidates = Vec::with_capacity(2);
    if let Some(dir) = std::env::current_exe().ok().as_deref().and_then(Path::parent) {
        candidates.push(dir.join(&tool));
    }
    candidates.push(PathBuf::from(tool));
    candidates
}
