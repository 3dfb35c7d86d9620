//! Configuration types for legislative impact analysis.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every structure has a
//! `Default` carrying the built-in policy, so an engine can run without
//! any files on disk.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Annual salary above which an employee counts as a high earner.
pub const DEFAULT_HIGH_EARNER_THRESHOLD: Decimal = Decimal::from_parts(150_000, 0, 0, false, 0);

/// Multiplier turning a monthly per-employee amount into an annual one.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Jurisdiction assumed when no vocabulary keyword matches.
pub const DEFAULT_JURISDICTION: &str = "USA - California";

/// Policy applied by the impact calculator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImpactPolicy {
    /// Tax increases only apply to salaries strictly above this amount.
    #[serde(default = "default_high_earner_threshold")]
    pub high_earner_threshold: Decimal,
    /// Monthly-to-annual multiplier for mandates, and divisor for the monthly increase.
    #[serde(default = "default_months_per_year")]
    pub months_per_year: u32,
}

fn default_high_earner_threshold() -> Decimal {
    DEFAULT_HIGH_EARNER_THRESHOLD
}

fn default_months_per_year() -> u32 {
    MONTHS_PER_YEAR
}

impl Default for ImpactPolicy {
    fn default() -> Self {
        Self {
            high_earner_threshold: DEFAULT_HIGH_EARNER_THRESHOLD,
            months_per_year: MONTHS_PER_YEAR,
        }
    }
}

/// Weights, caps and band thresholds used by the risk scorer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RiskPolicy {
    /// Weight of the cost factor in the raw score.
    pub cost_weight: Decimal,
    /// Weight of the affected-employee factor in the raw score.
    pub employee_weight: Decimal,
    /// Upper bound on the cost-to-payroll ratio.
    pub cost_factor_cap: Decimal,
    /// Scores at or above this are HIGH.
    pub high_threshold: Decimal,
    /// Scores at or above this (and below `high_threshold`) are MEDIUM.
    pub medium_threshold: Decimal,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            cost_weight: Decimal::new(7, 1),
            employee_weight: Decimal::new(3, 1),
            cost_factor_cap: Decimal::new(2, 0),
            high_threshold: Decimal::new(70, 0),
            medium_threshold: Decimal::new(35, 0),
        }
    }
}

/// Timeouts and endpoints for the monitor's outbound collaborators.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonitorPolicy {
    /// Timeout for a single feed fetch, in seconds.
    pub fetch_timeout_secs: u64,
    /// Timeout for a single attestation request, in seconds.
    pub attestation_timeout_secs: u64,
    /// Attestation endpoint; attestation is disabled when absent.
    pub attestation_endpoint: Option<String>,
    /// Source name reported to the attestation service.
    pub attestation_source: String,
}

impl Default for MonitorPolicy {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 8,
            attestation_timeout_secs: 6,
            attestation_endpoint: None,
            attestation_source: "impact-engine".to_string(),
        }
    }
}

/// Policy configuration from policy.yaml.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Impact calculation policy.
    pub impact: ImpactPolicy,
    /// Risk scoring policy.
    pub risk: RiskPolicy,
    /// Monitor collaborator settings.
    pub monitor: MonitorPolicy,
}

/// A named flag raised when any of its keywords appears in the text.
///
/// Keywords are matched case-insensitively as substrings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeywordRule {
    /// The value emitted when the rule matches.
    pub name: String,
    /// The keywords that trigger the rule.
    pub keywords: Vec<String>,
}

impl KeywordRule {
    /// Creates a keyword rule.
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Returns true if any keyword occurs in the already-lowercased text.
    pub fn matches(&self, lowercase_text: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| lowercase_text.contains(&k.to_lowercase()))
    }
}

/// Keyword vocabularies from vocabulary.yaml.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Jurisdiction reported when no jurisdiction rule matches.
    pub default_jurisdiction: String,
    /// Jurisdiction rules.
    pub jurisdictions: Vec<KeywordRule>,
    /// Compliance requirement rules.
    pub compliance_requirements: Vec<KeywordRule>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            default_jurisdiction: DEFAULT_JURISDICTION.to_string(),
            jurisdictions: vec![KeywordRule::new(
                DEFAULT_JURISDICTION,
                &["california", "state"],
            )],
            compliance_requirements: vec![
                KeywordRule::new("Healthcare contribution mandate", &["healthcare", "mandate"]),
                KeywordRule::new("Additional reporting requirements", &["report", "file"]),
            ],
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    /// Policy settings.
    pub policy: PolicyConfig,
    /// Keyword vocabularies.
    pub vocabulary: VocabularyConfig,
}
