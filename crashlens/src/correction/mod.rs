//! Data-file reference correction
//!
//! Crash logs often name a data file that isn't on disk: a stale name from an
//! older build, or a misspelling baked into a script. Other references into the
//! same directory usually point at the right file, so a missing reference is
//! redirected to the file its siblings agree on.
//!
//! # Correction Strategy
//!
//! 1. **Group** references by the directory part of their path
//! 2. **Vote**: the most frequent file name among the group's *existing*
//!    references wins (earliest wins a tie)
//! 3. **Rewrite** each missing reference in the group to `dir/<winner>`
//!
//! A group where nothing exists has no winner; its missing references pass
//! through unchanged and are reported as uncorrectable. The vote can be wrong
//! when a directory's majority file is unrelated to a different, also-missing
//! file, so every rewrite is recorded in the outcome.
//!
//! Existence checks go through [`FileProbe`] so tests can run against a fixed
//! set of paths.

pub mod corrector;
pub mod probe;

pub use corrector::{Correction, CorrectionOutcome, ReferenceCorrector};
pub use probe::{DiskProbe, FileProbe, KnownFiles};
