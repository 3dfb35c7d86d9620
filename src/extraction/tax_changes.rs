//! Tax rate change extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::EngineResult;
use crate::models::{ExtractedRule, RawAmount};

use super::{compile_patterns, parse_rate};

/// Phrasings of a rate increase. Every match of every pattern is emitted.
static INCREASE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"(?i)increase.*?(\d+\.?\d*)%",
        r"(?i)(\d+\.?\d*)%.*?increase",
        r"(?i)additional.*?(\d+\.?\d*)%",
        r"(?i)raise.*?(\d+\.?\d*)%",
    ])
});

/// An income threshold followed by a rate on the same line.
static BRACKET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\$[\d,]+).*?(\d+\.?\d*)%").expect("Invalid regex"));

/// Extracts tax increases and new tax brackets from `text`.
///
/// Overlapping patterns are expected to match the same sentence more than
/// once; the duplicates are kept. Fails only if a matched rate cannot be
/// represented as a decimal.
pub fn extract_tax_changes(text: &str) -> EngineResult<Vec<ExtractedRule>> {
    let mut changes = Vec::new();

    for pattern in INCREASE_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let rate = parse_rate(&caps[1])?;
            changes.push(ExtractedRule::tax_increase(rate));
        }
    }

    for caps in BRACKET_PATTERN.captures_iter(text) {
        let rate = parse_rate(&caps[2])?;
        changes.push(ExtractedRule::new_tax_bracket(RawAmount::new(&caps[1]), rate));
    }

    Ok(changes)
}
