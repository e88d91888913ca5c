use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex should compile"));

/// Trim and collapse inner whitespace runs (including `&nbsp;` and newlines
/// left over from markup) into single spaces.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.contains(|c: char| c.is_whitespace() && c != ' ') || trimmed.contains("  ") {
        WHITESPACE_RUN.replace_all(trimmed, " ").into_owned()
    } else {
        trimmed.to_string()
    }
}

/// A cleaned cell, or `None` when it holds the missing-value sentinel.
pub fn cell_value(raw: &str, missing_sentinel: &str) -> Option<String> {
    let cleaned = clean_str(raw);
    if cleaned == missing_sentinel {
        None
    } else {
        Some(cleaned)
    }
}
