//! Rule extraction from legislative text.
//!
//! This module turns unstructured text into typed rules using ordered
//! regular-expression matching: effective date detection, tax rate
//! changes, new taxes, healthcare mandates, and keyword vocabularies for
//! jurisdictions and compliance requirements.
//!
//! Extraction over-generates on purpose. Several patterns may match the
//! same sentence and every match becomes a rule; the impact calculator
//! deduplicates financial effect by employee, not textual matches.

mod effective_date;
mod extractor;
mod keywords;
mod mandates;
mod new_taxes;
mod tax_changes;

use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::money::ascii_digits;

pub use effective_date::extract_effective_date;
pub use extractor::RuleExtractor;
pub use keywords::{extract_compliance_requirements, extract_jurisdictions};
pub use mandates::extract_mandates;
pub use new_taxes::extract_new_taxes;
pub use tax_changes::extract_tax_changes;

fn compile_patterns(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("Invalid regex"))
        .collect()
}

/// Converts a matched percentage (without the `%`) into a decimal.
/// Non-ASCII decimal digits are accepted.
fn parse_rate(raw: &str) -> EngineResult<Decimal> {
    let digits = ascii_digits(raw);
    Decimal::from_str(digits.trim_end_matches('.')).map_err(|e| EngineError::ExtractionFailure {
        message: format!("rate '{}%' is not representable: {}", raw, e),
    })
}
