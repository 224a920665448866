//! Domain types providing compile-time safety and self-documentation
//!
//! These newtype wrappers keep raw stack addresses apart from line numbers and
//! other integers that flow through the pipeline.

use serde::Serialize;
use std::fmt;

/// Code address, either read from a crash log or a symbol start address
/// from the linker map.
///
/// Displayed as bare lowercase hex (`80003100`), which is how both the map
/// file and the resolved-stack output write addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Address(pub u64);

impl Address {
    /// Parse a hex token, with or without a `0x`/`0X` prefix.
    ///
    /// Returns `None` for empty input, non-hex digits, or values wider than 64 bits.
    #[must_use]
    pub fn from_hex(token: &str) -> Option<Self> {
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        if digits.is_empty() {
            return None;
        }
        u64::from_str_radix(digits, 16).ok().map(Address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Address(value)
    }
}

/// A `(path, line)` pointer into a script data file.
///
/// Ordering is by path, then line, so a sorted set of references is stable
/// across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DataFileReference {
    /// Path as written in the log; relative paths are resolved against the data root.
    pub path: String,
    /// 1-based line number; never rewritten.
    pub line: u32,
}

impl DataFileReference {
    pub fn new(path: impl Into<String>, line: u32) -> Self {
        Self { path: path.into(), line }
    }
}

impl fmt::Display for DataFileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ line {}", self.path, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_from_hex() {
        assert_eq!(Address::from_hex("80003100"), Some(Address(0x8000_3100)));
        assert_eq!(Address::from_hex("0x8000"), Some(Address(0x8000)));
        assert_eq!(Address::from_hex("0XABC"), Some(Address(0xabc)));
        assert_eq!(Address::from_hex(""), None);
        assert_eq!(Address::from_hex("0x"), None);
        assert_eq!(Address::from_hex("zz"), None);
        assert_eq!(Address::from_hex("1ffffffffffffffff"), None);
    }

    #[test]
    fn test_address_display_is_bare_hex() {
        assert_eq!(Address(0x8000_3100).to_string(), "80003100");
        assert_eq!(format!("{:08x}", Address(0x1f)), "0000001f");
    }

    #[test]
    fn test_reference_ordering() {
        let mut refs = vec![
            DataFileReference::new("ui/b.dta", 3),
            DataFileReference::new("ui/a.dta", 9),
            DataFileReference::new("ui/a.dta", 2),
        ];
        refs.sort();
        assert_eq!(refs[0], DataFileReference::new("ui/a.dta", 2));
        assert_eq!(refs[2], DataFileReference::new("ui/b.dta", 3));
    }
}
