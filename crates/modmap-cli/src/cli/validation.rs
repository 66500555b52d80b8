use regex::Regex;

/// Parse and validate an exclusion pattern.
///
/// The pattern must compile as a regular expression. An empty pattern is
/// accepted and disables exclusion.
///
/// # Errors
///
/// Returns the regex compiler's message if the pattern is invalid.
pub fn parse_exclude(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Ok(String::new());
    }
    Regex::new(s)
        .map(|_| s.to_string())
        .map_err(|e| format!("Invalid exclude pattern '{}': {}", s, e))
}
