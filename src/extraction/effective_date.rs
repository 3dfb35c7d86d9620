//! Effective date detection.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use super::compile_patterns;

/// Date phrasings in priority order. The last entry is a bare date-shaped
/// token and only applies when no introductory keyword matched.
static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"(?i)effective\s+(\w+\s+\d{1,2},\s+\d{4})",
        r"(?i)starting\s+(\w+\s+\d{1,2},\s+\d{4})",
        r"(?i)beginning\s+(\w+\s+\d{1,2},\s+\d{4})",
        r"(?i)(\w+\s+\d{1,2},\s+\d{4})",
    ])
});

/// Returns the effective date stated in `text`.
///
/// Patterns are tried in priority order and the first match wins. When the
/// text names no date, the result is January 1 of the year after `today`.
///
/// # Examples
///
/// ```
/// use impact_engine::extraction::extract_effective_date;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// assert_eq!(
///     extract_effective_date("Takes effect starting March 3, 2026.", today),
///     "March 3, 2026"
/// );
/// assert_eq!(extract_effective_date("No date here.", today), "January 1, 2026");
/// ```
pub fn extract_effective_date(text: &str, today: NaiveDate) -> String {
    DATE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| format!("January 1, {}", today.year() + 1))
}
