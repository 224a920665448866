//! Source excerpts around referenced data-file lines

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Lines shown above the referenced line
pub const LINES_BEFORE: usize = 5;
/// Lines shown below the referenced line
pub const LINES_AFTER: usize = 20;

const TARGET_MARKER: &str = "==>";

/// Renders the context of a `path @ line` reference
pub trait SnippetRenderer {
    /// # Errors
    /// Returns an error if the file can't be read or writing fails
    fn render(&self, path: &Path, line: u32, out: &mut dyn Write) -> io::Result<()>;
}

/// Plain-text excerpt with the referenced line marked `==>`
#[derive(Debug, Clone, Copy)]
pub struct ExcerptRenderer {
    pub before: usize,
    pub after: usize,
}

impl Default for ExcerptRenderer {
    fn default() -> Self {
        Self { before: LINES_BEFORE, after: LINES_AFTER }
    }
}

impl ExcerptRenderer {
    /// Render from already loaded text
    ///
    /// # Errors
    /// Returns an error if writing fails
    pub fn render_text(
        &self,
        name: &str,
        text: &str,
        line: u32,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let lines: Vec<&str> = text.lines().collect();
        let target = line as usize;

        if target == 0 || target > lines.len() {
            writeln!(out, "{name}: line {line} is outside the file ({} lines)", lines.len())?;
            return Ok(());
        }

        // 1-based range, clamped to the file
        let first = target.saturating_sub(self.before).max(1);
        let last = (target + self.after).min(lines.len());

        let header = format!("--- {name} @ line {line} ---");
        writeln!(out, "{header}")?;
        for number in first..=last {
            let marker = if number == target { TARGET_MARKER } else { "" };
            writeln!(out, "{marker:>3} {number:>5}: {}", lines[number - 1])?;
        }
        writeln!(out, "{}", "-".repeat(header.chars().count()))
    }
}

impl SnippetRenderer for ExcerptRenderer {
    fn render(&self, path: &Path, line: u32, out: &mut dyn Write) -> io::Result<()> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        self.render_text(&path.display().to_string(), &text, line, out)
    }
}
