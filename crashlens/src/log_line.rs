//! Log line header handling
//!
//! Emulator log lines look like
//! `12:03:44:512 Core/HW/EXI_DeviceIPL.cpp:258 N[OSREPORT]: <message>`.
//! Everything up to and including the `N[OSREPORT]:` tag is header; lines
//! without the tag are treated as a bare message.

/// Tag separating the log header from the game's message
pub const OSREPORT_TAG: &str = "N[OSREPORT]:";

/// Return the message body of a log line.
///
/// Strips the header through [`OSREPORT_TAG`] plus the single space after it,
/// and any trailing whitespace (including a stray `\r`).
#[must_use]
pub fn message_body(line: &str) -> &str {
    let body = match line.split_once(OSREPORT_TAG) {
        Some((_, rest)) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    };
    body.trim_end()
}
