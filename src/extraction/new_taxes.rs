//! New tax extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::EngineResult;
use crate::models::{ExtractedRule, RawAmount};

use super::{compile_patterns, parse_rate};

static PERCENTAGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"(?i)new.*?(\d+\.?\d*)%.*?tax",
        r"(?i)(\d+\.?\d*)%.*?tax.*?on.*?payroll",
    ])
});

static PER_EMPLOYEE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\$[\d,]+).*?per.*?employee").expect("Invalid regex"));

/// Extracts newly introduced taxes from `text`.
///
/// Percentage matches become [`NewTaxKind::Percentage`](crate::models::NewTaxKind)
/// rules; per-employee matches keep the matched currency text unparsed.
pub fn extract_new_taxes(text: &str) -> EngineResult<Vec<ExtractedRule>> {
    let mut taxes = Vec::new();

    for pattern in PERCENTAGE_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            taxes.push(ExtractedRule::percentage_tax(parse_rate(&caps[1])?));
        }
    }

    for caps in PER_EMPLOYEE_PATTERN.captures_iter(text) {
        taxes.push(ExtractedRule::per_employee_tax(RawAmount::new(&caps[1])));
    }

    Ok(taxes)
}
