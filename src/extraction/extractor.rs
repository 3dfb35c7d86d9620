//! The rule extractor.

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use crate::config::VocabularyConfig;
use crate::error::EngineResult;
use crate::models::{ExtractedRule, ParsedLegislation};

use super::effective_date::extract_effective_date;
use super::keywords::{extract_compliance_requirements, extract_jurisdictions};
use super::mandates::extract_mandates;
use super::new_taxes::extract_new_taxes;
use super::tax_changes::extract_tax_changes;

/// Converts free-form legislative text into [`ParsedLegislation`].
///
/// Extraction is pattern based, deterministic for a fixed reference date,
/// and never fails: internal errors are reported through
/// `parsed_successfully` and `error` on the result.
///
/// # Example
///
/// ```
/// use impact_engine::config::VocabularyConfig;
/// use impact_engine::extraction::RuleExtractor;
/// use chrono::NaiveDate;
///
/// let extractor = RuleExtractor::new(VocabularyConfig::default());
/// let today = NaiveDate::from_ymd_opt(2025, 10, 19).unwrap();
/// let parsed = extractor.extract_at("An increase of 2% tax effective January 1, 2026.", today);
///
/// assert!(parsed.parsed_successfully);
/// assert_eq!(parsed.effective_date, "January 1, 2026");
/// assert_eq!(parsed.tax_changes.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleExtractor {
    vocabulary: VocabularyConfig,
}

impl RuleExtractor {
    /// Creates an extractor using the given keyword vocabularies.
    pub fn new(vocabulary: VocabularyConfig) -> Self {
        Self { vocabulary }
    }

    /// Extracts rules, defaulting the effective date relative to today.
    pub fn extract(&self, text: &str) -> ParsedLegislation {
        self.extract_at(text, Utc::now().date_naive())
    }

    /// Extracts rules with an explicit reference date for the default
    /// effective date.
    pub fn extract_at(&self, text: &str, today: NaiveDate) -> ParsedLegislation {
        let effective_date = extract_effective_date(text, today);

        match extract_financial_rules(text) {
            Ok((tax_changes, new_taxes, mandates)) => {
                let parsed = ParsedLegislation {
                    effective_date,
                    tax_changes,
                    new_taxes,
                    mandates,
                    jurisdictions: extract_jurisdictions(text, &self.vocabulary),
                    compliance_requirements: extract_compliance_requirements(
                        text,
                        &self.vocabulary,
                    ),
                    parsed_successfully: true,
                    error: None,
                };
                debug!(
                    effective_date = %parsed.effective_date,
                    tax_changes = parsed.tax_changes.len(),
                    new_taxes = parsed.new_taxes.len(),
                    mandates = parsed.mandates.len(),
                    "Extracted legislation rules"
                );
                parsed
            }
            Err(err) => {
                warn!(error = %err, "Rule extraction failed");
                ParsedLegislation::failed(effective_date, err.to_string())
            }
        }
    }
}

type FinancialRules = (Vec<ExtractedRule>, Vec<ExtractedRule>, Vec<ExtractedRule>);

fn extract_financial_rules(text: &str) -> EngineResult<FinancialRules> {
    Ok((
        extract_tax_changes(text)?,
        extract_new_taxes(text)?,
        extract_mandates(text),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewTaxKind, RawAmount};
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 19).unwrap()
    }

    fn extractor() -> RuleExtractor {
        RuleExtractor::new(VocabularyConfig::default())
    }

    #[test]
    fn test_reference_scenario() {
        let parsed = extractor().extract_at("An increase of 2% tax effective January 1, 2026.", today());

        assert!(parsed.parsed_successfully);
        assert_eq!(parsed.error, None);
        assert_eq!(parsed.effective_date, "January 1, 2026");
        assert_eq!(
            parsed.tax_changes,
            vec![ExtractedRule::tax_increase(Decimal::new(2, 0))]
        );
        assert!(parsed.new_taxes.is_empty());
        assert!(parsed.mandates.is_empty());
        assert_eq!(parsed.jurisdictions, vec!["USA - California"]);
        assert!(parsed.compliance_requirements.is_empty());
    }

    #[test]
    fn test_fullwidth_rate_keeps_other_rules() {
        let parsed = extractor().extract_at(
            "An increase of ２% tax. Employers pay $100 toward healthcare.",
            today(),
        );

        assert!(parsed.parsed_successfully);
        assert_eq!(parsed.error, None);
        assert_eq!(
            parsed.tax_changes,
            vec![ExtractedRule::tax_increase(Decimal::new(2, 0))]
        );
        assert_eq!(
            parsed.mandates,
            vec![ExtractedRule::healthcare_mandate(RawAmount::new("$100"))]
        );
    }

    #[test]
    fn test_per_employee_tax_scenario() {
        let parsed = extractor().extract_at("A new fee of $50 per employee.", today());

        assert_eq!(
            parsed.new_taxes,
            vec![ExtractedRule::per_employee_tax(RawAmount::new("$50"))]
        );
        assert!(matches!(
            &parsed.new_taxes[0],
            ExtractedRule::NewTax {
                kind: NewTaxKind::FixedPerEmployee { .. },
                ..
            }
        ));
        assert!(parsed.tax_changes.is_empty());
        assert!(parsed.mandates.is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "California: an additional 1.5% on income over $150,000, \
                    plus a healthcare contribution of $200 per employee monthly. \
                    Employers must file reports starting March 1, 2026.";
        let first = extractor().extract_at(text, today());
        let second = extractor().extract_at(text, today());
        assert_eq!(first, second);
    }

    #[test]
    fn test_unrepresentable_rate_flags_failure_with_empty_lists() {
        let text = "California will increase the rate by 123456789012345678901234567890123% \
                    with a healthcare mandate of $100.";
        let parsed = extractor().extract_at(text, today());

        assert!(!parsed.parsed_successfully);
        assert!(parsed.error.is_some());
        assert_eq!(parsed.rule_count(), 0);
        assert!(parsed.jurisdictions.is_empty());
        assert!(parsed.compliance_requirements.is_empty());
    }

    #[test]
    fn test_empty_text() {
        let parsed = extractor().extract_at("", today());
        assert!(parsed.parsed_successfully);
        assert_eq!(parsed.effective_date, "January 1, 2026");
        assert_eq!(parsed.rule_count(), 0);
    }
}
