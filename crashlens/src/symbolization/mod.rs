//! # Symbol Resolution for Stripped Binaries
//!
//! The game ships without debug info, so the only way back from a raw return
//! address to a function is the linker map produced alongside the build. This
//! module turns that map into an index and answers "which symbol contains
//! address A".
//!
//! ## The Linker Map
//!
//! Each symbol row of a section layout lists, in order:
//!
//! ```text
//!   00000000 0000a4 80003100 00000100  4 __start    os.a init.o
//!   |        |      |        |         |  |          |
//!   rom addr size   start    file off  align name    unit (ignored)
//! ```
//!
//! Only the start address and the name are used. Rows of any other shape
//! (section headers, `UNUSED` entries, memory map tables) are skipped.
//!
//! ## Floor Search
//!
//! A return address points somewhere *inside* a function, never at its first
//! instruction, so lookups find the greatest start address `<= A`:
//!
//! ```text
//! symbols:   80003100 __start | 800031a4 main | 800032c4 Update
//! query:                             80003200 ──┘
//! result:    main (+0x5c)
//! ```
//!
//! Addresses below the first symbol resolve to the `<invalid>` sentinel.
//!
//! ## Demangling
//!
//! Symbol names are mangled by the game's C++ compiler (`main__FPCci`).
//! Demangling is delegated to the external `cwdemangle` tool; see
//! [`demangler`] for how it is discovered and bounded.
//!
//! ## Module Structure
//!
//! - **`symbol_table`**: map parsing, the sorted index, floor lookup
//! - **`demangler`**: the `Demangler` seam, the external tool runner, and the
//!   no-op stand-in

pub mod demangler;
pub mod symbol_table;

pub use demangler::{probe_demangler, CommandDemangler, Demangler, NoDemangler};
pub use symbol_table::{ResolvedFrame, SymbolEntry, SymbolTable, INVALID_SYMBOL};
