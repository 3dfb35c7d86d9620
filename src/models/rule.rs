//! Extracted rule types.
//!
//! A rule is one structured, typed effect extracted from legislative text.
//! Rules form a closed sum type; impact computation matches over the
//! variants instead of dispatching on a string tag.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::money::parse_currency;

/// Currency text exactly as it was matched in the source, e.g. `"$1,250"`.
///
/// Conversion to a number is deferred to the consumer via [`RawAmount::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAmount(String);

impl RawAmount {
    /// Wraps matched currency text.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the amount, failing with `MalformedAmount` if it is not numeric.
    pub fn parse(&self) -> EngineResult<Decimal> {
        parse_currency(&self.0)
    }
}

impl std::fmt::Display for RawAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a new tax is levied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "basis", rename_all = "snake_case")]
pub enum NewTaxKind {
    /// A percentage of total payroll.
    Percentage {
        /// The tax rate in percent.
        rate_percent: Decimal,
    },
    /// A fixed amount charged for every employee.
    FixedPerEmployee {
        /// The per-employee amount as matched.
        amount: RawAmount,
    },
}

/// One structured effect extracted from legislative text.
///
/// # Example
///
/// ```
/// use impact_engine::models::ExtractedRule;
/// use rust_decimal::Decimal;
///
/// let rule = ExtractedRule::tax_increase(Decimal::new(2, 0));
/// assert_eq!(rule.description(), "Increase tax rate by 2%");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtractedRule {
    /// An increase in the tax rate applied to high earners.
    TaxIncrease {
        /// The increase in percent.
        rate_percent: Decimal,
        /// Human-readable description.
        description: String,
    },
    /// A new bracket for income over a threshold.
    NewTaxBracket {
        /// The income threshold as matched.
        threshold: RawAmount,
        /// The bracket rate in percent.
        rate_percent: Decimal,
        /// Human-readable description.
        description: String,
    },
    /// A tax that did not previously exist.
    NewTax {
        /// How the tax is levied.
        kind: NewTaxKind,
        /// Human-readable description.
        description: String,
    },
    /// A monthly per-employee healthcare contribution.
    HealthcareMandate {
        /// The monthly amount per employee as matched.
        monthly_amount_per_employee: RawAmount,
        /// Human-readable description.
        description: String,
    },
}

impl ExtractedRule {
    /// Creates a tax increase rule.
    pub fn tax_increase(rate_percent: Decimal) -> Self {
        ExtractedRule::TaxIncrease {
            description: format!("Increase tax rate by {}%", rate_percent.normalize()),
            rate_percent,
        }
    }

    /// Creates a new tax bracket rule.
    pub fn new_tax_bracket(threshold: RawAmount, rate_percent: Decimal) -> Self {
        ExtractedRule::NewTaxBracket {
            description: format!(
                "New {}% tax bracket for income over {}",
                rate_percent.normalize(),
                threshold
            ),
            threshold,
            rate_percent,
        }
    }

    /// Creates a new percentage-of-payroll tax rule.
    pub fn percentage_tax(rate_percent: Decimal) -> Self {
        ExtractedRule::NewTax {
            description: format!("New {}% tax", rate_percent.normalize()),
            kind: NewTaxKind::Percentage { rate_percent },
        }
    }

    /// Creates a new fixed per-employee tax rule.
    pub fn per_employee_tax(amount: RawAmount) -> Self {
        ExtractedRule::NewTax {
            description: format!("New {} tax per employee", amount),
            kind: NewTaxKind::FixedPerEmployee { amount },
        }
    }

    /// Creates a healthcare mandate rule.
    pub fn healthcare_mandate(monthly_amount_per_employee: RawAmount) -> Self {
        ExtractedRule::HealthcareMandate {
            description: format!(
                "Healthcare mandate: {} per employee",
                monthly_amount_per_employee
            ),
            monthly_amount_per_employee,
        }
    }

    /// Returns the human-readable description.
    pub fn description(&self) -> &str {
        match self {
            ExtractedRule::TaxIncrease { description, .. }
            | ExtractedRule::NewTaxBracket { description, .. }
            | ExtractedRule::NewTax { description, .. }
            | ExtractedRule::HealthcareMandate { description, .. } => description,
        }
    }
}
