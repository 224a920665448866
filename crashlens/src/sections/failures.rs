use regex::Regex;

/// Build the failure message pattern for a marker (`FAIL-MSG`)
///
/// # Errors
/// Returns an error if the pattern fails to compile
pub fn failure_pattern(marker: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"{}:\s*(.*)", regex::escape(marker)))
}

/// Collect every failure message in the log, in file order
///
/// The marker may appear anywhere on a line; there is no start or stop gate.
#[must_use]
pub fn scan_failure_messages(log_text: &str, pattern: &Regex) -> Vec<String> {
    log_text
        .lines()
        .filter_map(|line| pattern.captures(line))
        .map(|captures| captures[1].trim().to_string())
        .collect()
}
