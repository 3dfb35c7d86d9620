//! Parsed legislation model.

use serde::{Deserialize, Serialize};

use super::ExtractedRule;

/// The structured result of running rule extraction over legislative text.
///
/// Created fresh per extraction call. When extraction fails internally,
/// `parsed_successfully` is false, `error` carries the reason, and every
/// list is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLegislation {
    /// The effective date as found in the text, best-effort.
    pub effective_date: String,
    /// Tax increases and new brackets.
    pub tax_changes: Vec<ExtractedRule>,
    /// Newly introduced taxes.
    pub new_taxes: Vec<ExtractedRule>,
    /// Employer mandates.
    pub mandates: Vec<ExtractedRule>,
    /// Jurisdictions the text appears to apply to.
    pub jurisdictions: Vec<String>,
    /// Compliance requirement flags raised by the text.
    pub compliance_requirements: Vec<String>,
    /// Whether extraction completed.
    pub parsed_successfully: bool,
    /// The failure description when extraction did not complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParsedLegislation {
    /// Creates a flagged result for text that could not be extracted.
    pub fn failed(effective_date: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            effective_date: effective_date.into(),
            tax_changes: Vec::new(),
            new_taxes: Vec::new(),
            mandates: Vec::new(),
            jurisdictions: Vec::new(),
            compliance_requirements: Vec::new(),
            parsed_successfully: false,
            error: Some(error.into()),
        }
    }

    /// Returns the number of financial rules across all categories.
    pub fn rule_count(&self) -> usize {
        self.tax_changes.len() + self.new_taxes.len() + self.mandates.len()
    }

    /// Returns the effective date, or "Unknown" when none was recorded.
    pub fn effective_date_or_unknown(&self) -> &str {
        if self.effective_date.trim().is_empty() {
            "Unknown"
        } else {
            &self.effective_date
        }
    }
}
