//! # Analysis Pipeline
//!
//! Wires the components together for one map/log pair:
//!
//! ```text
//! map text ──► SymbolTable ──┐
//!                            ▼
//! log text ──────────► StackTraceParser ──────────────► frames
//!     │
//!     └──────────────► SectionExtractor ──► failure messages
//!                            │          ──► data stack trace lines
//!                            │          ──► gated references
//!                            ▼
//!              gated refs, or block refs when there are none
//!                            │
//!                            ▼
//!                   ReferenceCorrector ──────────────► references
//! ```
//!
//! Only an unreadable map is an error. Everything the log can throw at the
//! pipeline degrades into empty sections.

use log::info;
use std::fs;
use std::path::Path;

use crate::config::{LogMarkers, PipelineConfig};
use crate::correction::{DiskProbe, FileProbe, ReferenceCorrector};
use crate::domain::{DataFileReference, PipelineError};
use crate::report::{ReferenceSource, Report};
use crate::sections::{references_from_block, LogSections, SectionExtractor};
use crate::stack_trace::StackTraceParser;
use crate::symbolization::{probe_demangler, Demangler, SymbolTable};

/// Reads a crash log as text; bytes that aren't UTF-8 are replaced
///
/// # Errors
/// Returns an error if the file cannot be read
pub fn read_log<P: AsRef<Path>>(log_path: P) -> Result<String, PipelineError> {
    let path = log_path.as_ref();
    let bytes = fs::read(path)
        .map_err(|source| PipelineError::LogRead { path: path.to_path_buf(), source })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Pick the references to correct: the gated scan's when it found any,
/// otherwise every location listed in the data stack trace block
#[must_use]
pub fn select_references(sections: &LogSections) -> (ReferenceSource, Vec<DataFileReference>) {
    if !sections.gated_references.is_empty() {
        return (ReferenceSource::Gated, sections.gated_references.clone());
    }
    let fallback = references_from_block(&sections.data_stack_trace);
    if fallback.is_empty() {
        (ReferenceSource::None, fallback)
    } else {
        info!("No gated references, using {} from the data stack trace", fallback.len());
        (ReferenceSource::DataStackTrace, fallback)
    }
}

pub struct Pipeline<D, P> {
    markers: LogMarkers,
    extractor: SectionExtractor,
    demangler: D,
    corrector: ReferenceCorrector<P>,
}

impl Pipeline<Box<dyn Demangler>, DiskProbe> {
    /// Pipeline against the real filesystem, with the demangler the config asks for
    ///
    /// # Errors
    /// Returns an error if a log marker produces an invalid pattern
    pub fn from_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let demangler = probe_demangler(&config.demangle, config.demangle_timeout);
        Self::new(config, demangler, DiskProbe)
    }
}

impl<D: Demangler, P: FileProbe> Pipeline<D, P> {
    /// # Errors
    /// Returns an error if a log marker produces an invalid pattern
    pub fn new(config: &PipelineConfig, demangler: D, probe: P) -> Result<Self, PipelineError> {
        Ok(Self {
            markers: config.markers.clone(),
            extractor: SectionExtractor::new(&config.markers)?,
            demangler,
            corrector: ReferenceCorrector::new(&config.data_root, probe),
        })
    }

    /// Index the map, then analyze the log against it
    ///
    /// # Errors
    /// Returns an error if the map text is not readable as a map
    pub fn run(&self, map_text: &str, log_text: &str) -> Result<Report, PipelineError> {
        let symbols = SymbolTable::parse(map_text)?;
        Ok(self.analyze(&symbols, log_text))
    }

    /// Analyze one log against an already built symbol table
    #[must_use]
    pub fn analyze(&self, symbols: &SymbolTable, log_text: &str) -> Report {
        let parser = StackTraceParser::new(symbols, &self.demangler, &self.markers);
        let stack_trace = parser.parse(log_text);

        let sections = self.extractor.extract(log_text);
        let (reference_source, references) = select_references(&sections);
        let outcome = self.corrector.correct(references);

        Report {
            symbol_count: symbols.len(),
            stack_trace,
            failure_messages: sections.failure_messages,
            data_stack_trace: sections.data_stack_trace,
            reference_source,
            references: outcome.references,
            corrections: outcome.corrections,
            uncorrectable: outcome.uncorrectable,
        }
    }

    #[must_use]
    pub fn corrector(&self) -> &ReferenceCorrector<P> {
        &self.corrector
    }

    #[must_use]
    pub fn demangler(&self) -> &D {
        &self.demangler
    }
}
