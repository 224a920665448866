use log::{debug, info, warn};
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::domain::{Address, MapError};

/// Name given to frames whose address lies below every known symbol
pub const INVALID_SYMBOL: &str = "<invalid>";

/// One symbol row of a linker map:
/// `rom-addr  size  start-addr  file-offset  align  name  unit...`.
/// Only the start address and the name are kept.
static MAP_SYMBOL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*[0-9A-Fa-f]{8}\s+[0-9A-Fa-f]{6}\s+([0-9A-Fa-f]{8})\s+[0-9A-Fa-f]{8}\s+[0-9]+\s+(\S+)(?:\s.*)?$",
    )
    .unwrap()
});

/// A symbol's start address and name, as listed in the linker map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolEntry {
    pub address: Address,
    pub name: String,
}

/// Address-ordered symbol index built from a linker map
///
/// Built once and never mutated, so a shared reference can be handed to any
/// number of concurrent readers.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    /// Sorted ascending by address, no two entries share an address
    entries: Vec<SymbolEntry>,
}

impl SymbolTable {
    /// Read and index a linker map from disk
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not text
    pub fn read<P: AsRef<Path>>(map_path: P) -> Result<Self, MapError> {
        let path = map_path.as_ref();
        let bytes =
            fs::read(path).map_err(|source| MapError::Read { path: path.to_path_buf(), source })?;
        Self::from_bytes(&bytes)
    }

    /// Index a linker map held in memory
    ///
    /// # Errors
    /// Returns [`MapError::InvalidUtf8`] if the bytes are not UTF-8
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MapError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| MapError::InvalidUtf8 { offset: e.valid_up_to() })?;
        Self::parse(text)
    }

    /// Index linker map text
    ///
    /// Lines that don't look like symbol rows are skipped, so a map with no
    /// symbol rows yields an empty (but valid) table. When several rows share a
    /// start address the last one in file order wins.
    ///
    /// # Errors
    /// Returns [`MapError::BinaryContent`] if the text contains NUL bytes
    pub fn parse(map_text: &str) -> Result<Self, MapError> {
        let mut rows = Vec::new();
        for (idx, line) in map_text.lines().enumerate() {
            if line.contains('\0') {
                return Err(MapError::BinaryContent { line: idx + 1 });
            }
            if let Some(entry) = parse_symbol_row(line) {
                rows.push(entry);
            }
        }

        // Stable sort keeps file order among equal addresses, so "last wins"
        // below means last in the file.
        rows.sort_by_key(|entry| entry.address);

        let mut entries: Vec<SymbolEntry> = Vec::with_capacity(rows.len());
        for entry in rows {
            match entries.last_mut() {
                Some(last) if last.address == entry.address => {
                    debug!(
                        "Symbol {} at 0x{:08x} replaces {}",
                        entry.name, entry.address, last.name
                    );
                    *last = entry;
                }
                _ => entries.push(entry),
            }
        }

        info!("Read {} symbols.", entries.len());
        Ok(Self { entries })
    }

    /// Find the symbol whose range contains `address`: the entry with the
    /// greatest start address that is `<= address`.
    #[must_use]
    pub fn floor(&self, address: Address) -> Option<&SymbolEntry> {
        let idx = self.entries.partition_point(|entry| entry.address <= address);
        idx.checked_sub(1).map(|i| &self.entries[i])
    }

    /// Resolve a stack address to a frame
    ///
    /// Addresses below the lowest symbol resolve to the [`INVALID_SYMBOL`]
    /// sentinel; that is logged and otherwise treated as a normal frame.
    #[must_use]
    pub fn resolve(&self, address: Address) -> ResolvedFrame {
        if let Some(entry) = self.floor(address) {
            ResolvedFrame {
                stack_address: address,
                symbol_address: entry.address,
                symbol_name: entry.name.clone(),
                demangled_name: None,
            }
        } else {
            warn!("Invalid stack address 0x{address:08x}");
            ResolvedFrame::invalid(address)
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending address order
    #[must_use]
    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }
}

fn parse_symbol_row(line: &str) -> Option<SymbolEntry> {
    let captures = MAP_SYMBOL.captures(line)?;
    let address = Address::from_hex(&captures[1])?;
    Some(SymbolEntry { address, name: captures[2].to_string() })
}

/// A stack address attributed to the symbol that contains it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFrame {
    /// Address as it appeared in the log
    pub stack_address: Address,
    /// Start address of the containing symbol (the stack address itself for
    /// invalid frames)
    pub symbol_address: Address,
    pub symbol_name: String,
    /// `None` when no demangler is available or demangling failed
    pub demangled_name: Option<String>,
}

impl ResolvedFrame {
    #[must_use]
    pub fn invalid(address: Address) -> Self {
        Self {
            stack_address: address,
            symbol_address: address,
            symbol_name: INVALID_SYMBOL.to_string(),
            demangled_name: None,
        }
    }

    /// True when the address lay below every symbol in the table
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.symbol_name == INVALID_SYMBOL
    }

    /// Offset of the stack address into its symbol
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.stack_address.0 - self.symbol_address.0
    }
}
