//! Small shared helpers

/// Truncate a string to at most `max` characters.
///
/// Counts characters rather than bytes so multibyte input never splits
/// mid-codepoint.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
