/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Case-insensitive substring test. `needle` is expected to be lowercase already.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Render a number with the shortest representation that round-trips,
/// so `1.72` stays `1.72` and `77.0` prints as `77`.
pub fn format_number(value: f64) -> String {
    // f64 Display already omits a trailing ".0" and never switches to exponents
    value.to_string()
}
