//! Keyword vocabulary checks for jurisdictions and compliance requirements.
//!
//! These are deliberately coarse: a keyword anywhere in the text (any case)
//! raises the corresponding flag.

use crate::config::VocabularyConfig;

/// Returns the jurisdictions whose keywords occur in `text`, in vocabulary
/// order, or the default jurisdiction when none do.
pub fn extract_jurisdictions(text: &str, vocabulary: &VocabularyConfig) -> Vec<String> {
    let lowercase = text.to_lowercase();
    let mut jurisdictions: Vec<String> = Vec::new();

    for rule in &vocabulary.jurisdictions {
        if rule.matches(&lowercase) && !jurisdictions.contains(&rule.name) {
            jurisdictions.push(rule.name.clone());
        }
    }

    if jurisdictions.is_empty() {
        jurisdictions.push(vocabulary.default_jurisdiction.clone());
    }

    jurisdictions
}

/// Returns the compliance requirement flags raised by `text`.
pub fn extract_compliance_requirements(text: &str, vocabulary: &VocabularyConfig) -> Vec<String> {
    let lowercase = text.to_lowercase();

    vocabulary
        .compliance_requirements
        .iter()
        .filter(|rule| rule.matches(&lowercase))
        .map(|rule| rule.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeywordRule;

    #[test]
    fn test_california_mention_yields_single_jurisdiction() {
        let vocabulary = VocabularyConfig::default();
        let found = extract_jurisdictions("The State of California enacts...", &vocabulary);
        assert_eq!(found, vec!["USA - California"]);
    }

    #[test]
    fn test_default_jurisdiction_when_nothing_matches() {
        let vocabulary = VocabularyConfig::default();
        let found = extract_jurisdictions("A federal levy.", &vocabulary);
        assert_eq!(found, vec!["USA - California"]);
    }

    #[test]
    fn test_custom_vocabulary_keeps_vocabulary_order() {
        let vocabulary = VocabularyConfig {
            default_jurisdiction: "Unspecified".to_string(),
            jurisdictions: vec![
                KeywordRule::new("USA - New York", &["new york"]),
                KeywordRule::new("USA - Texas", &["texas"]),
            ],
            compliance_requirements: vec![],
        };
        let found = extract_jurisdictions("Applies in Texas and New York.", &vocabulary);
        assert_eq!(found, vec!["USA - New York", "USA - Texas"]);
        assert_eq!(
            extract_jurisdictions("Applies in Ohio.", &vocabulary),
            vec!["Unspecified"]
        );
    }

    #[test]
    fn test_healthcare_and_reporting_flags() {
        let vocabulary = VocabularyConfig::default();
        let found = extract_compliance_requirements(
            "Employers must REPORT Healthcare contributions.",
            &vocabulary,
        );
        assert_eq!(
            found,
            vec![
                "Healthcare contribution mandate",
                "Additional reporting requirements"
            ]
        );
    }

    #[test]
    fn test_mandate_keyword_alone_raises_healthcare_flag() {
        let vocabulary = VocabularyConfig::default();
        let found = extract_compliance_requirements("A new mandate applies.", &vocabulary);
        assert_eq!(found, vec!["Healthcare contribution mandate"]);
    }

    #[test]
    fn test_no_requirements() {
        let vocabulary = VocabularyConfig::default();
        assert!(extract_compliance_requirements("A 2% increase.", &vocabulary).is_empty());
    }
}
