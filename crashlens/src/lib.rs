//! # crashlens - Crash Log Forensics for Console Game Builds
//!
//! crashlens turns a raw crash log captured from a console build into
//! something a developer can act on. The log only carries return addresses
//! and fragments of script state; paired with the linker map of the same
//! build, those become function names, and the script fragments become
//! data-file locations that exist on disk.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────┐
//! │   Linker map (.map)  │        │   Crash log (text)   │
//! └──────────┬───────────┘        └──────────┬───────────┘
//!            │                               │
//!            ▼                               │
//! ┌──────────────────────┐                   │
//! │     SymbolTable      │                   │
//! │  (sorted, floor      │                   │
//! │   search by address) │                   │
//! └──────────┬───────────┘                   │
//!            │                               │
//!            ▼                               ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │                     Pipeline (this crate)                  │
//! │                                                            │
//! │  ┌────────────────┐   ┌────────────────┐                   │
//! │  │  StackTrace    │   │   Section      │                   │
//! │  │  Parser        │   │   Extractor    │                   │
//! │  │ (old / table)  │   │ (FAIL-MSG,     │                   │
//! │  └───────┬────────┘   │  data stack,   │                   │
//! │          │            │  gated refs)   │                   │
//! │          ▼            └───────┬────────┘                   │
//! │  ┌────────────────┐           ▼                            │
//! │  │   Demangler    │   ┌────────────────┐                   │
//! │  │  (cwdemangle)  │   │   Reference    │                   │
//! │  └────────────────┘   │   Corrector    │                   │
//! │                       └────────────────┘                   │
//! └──────────────────────────────┬─────────────────────────────┘
//!                                ▼
//!        resolved stack file · text report · excerpts · JSON
//! ```
//!
//! ## Module Structure
//!
//! - [`symbolization`]: linker map parsing, address-to-symbol lookup, and the
//!   external demangler
//! - [`stack_trace`]: finds the stack trace in a log (either format) and
//!   writes the resolved-stack file
//! - [`sections`]: failure messages, the data stack trace block, and the
//!   gated data-file reference scan
//! - [`correction`]: rewrites references to missing data files using their
//!   directory's majority file
//! - [`pipeline`]: runs all of the above for one map/log pair
//! - [`report`], [`snippet`], [`export`]: presentation
//! - [`cli`], [`config`], [`preflight`]: the command-line front end
//! - [`domain`]: shared types and errors
//!
//! ## Typical Usage
//!
//! ```bash
//! # Resolve a crash and print the report
//! crashlens --map main.map --log crash.log --out stack.txt
//!
//! # Data files live elsewhere; keep a JSON copy of the report
//! crashlens --map main.map --log crash.log --out stack.txt \
//!     --dta-root ./data --export crash.json
//! ```
//!
//! ## Key Concepts
//!
//! - **Floor lookup**: a stack address belongs to the symbol with the largest
//!   start address not above it
//! - **Old / table format**: the two shapes a stack trace takes in the log,
//!   one address per line or a header row with the address in the third column
//! - **Gated scan**: data-file references are only trusted after the failure
//!   sentinels (`APP FAILED`, then `start stack trace`)
//! - **Majority correction**: a missing file is replaced by the file most of
//!   its directory's other references point at

pub mod cli;
pub mod config;
pub mod correction;
pub mod domain;
pub mod export;
pub mod log_line;
pub mod pipeline;
pub mod preflight;
pub mod report;
pub mod sections;
pub mod snippet;
pub mod stack_trace;
pub mod symbolization;
