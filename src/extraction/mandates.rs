//! Employer mandate extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ExtractedRule, RawAmount};

use super::compile_patterns;

/// Healthcare mandate phrasings; each captures a dollar amount.
static HEALTHCARE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"(?i)(\$[\d,]+).*?healthcare",
        r"(?i)healthcare.*?(\$[\d,]+)",
        r"(?i)(\$[\d,]+).*?per.*?employee.*?monthly",
        r"(?i)employer.*?contribute.*?(\$[\d,]+)",
    ])
});

/// Extracts healthcare mandates from `text`, keeping matched amounts unparsed.
pub fn extract_mandates(text: &str) -> Vec<ExtractedRule> {
    HEALTHCARE_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.captures_iter(text))
        .map(|caps| ExtractedRule::healthcare_mandate(RawAmount::new(&caps[1])))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amounts(rules: &[ExtractedRule]) -> Vec<String> {
        rules
            .iter()
            .map(|r| match r {
                ExtractedRule::HealthcareMandate {
                    monthly_amount_per_employee,
                    ..
                } => monthly_amount_per_employee.to_string(),
                other => panic!("Expected healthcare mandate, got {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_amount_before_healthcare() {
        let rules = extract_mandates("Employers must provide $200 toward healthcare.");
        assert_eq!(amounts(&rules), vec!["$200"]);
    }

    #[test]
    fn test_amount_after_healthcare() {
        let rules = extract_mandates("A healthcare contribution of $1,250 is required.");
        assert_eq!(amounts(&rules), vec!["$1,250"]);
    }

    #[test]
    fn test_employer_contribute_phrase_overlaps() {
        // matched by "healthcare ... $" and "employer ... contribute ... $"
        let rules = extract_mandates("For healthcare, each employer shall contribute $300.");
        assert_eq!(amounts(&rules), vec!["$300", "$300"]);
    }

    #[test]
    fn test_monthly_per_employee_phrase() {
        let rules = extract_mandates("A fee of $25 per employee, payable monthly.");
        assert_eq!(amounts(&rules), vec!["$25"]);
    }

    #[test]
    fn test_no_mandates() {
        assert!(extract_mandates("A 2% increase for high earners.").is_empty());
    }
}
