//! Impact result models for the Legislative Impact Engine.
//!
//! This module contains the [`ImpactResult`] type and its associated
//! structures that capture the financial consequence of applying a set of
//! extracted rules to a roster, including the per-category breakdown, the
//! affected employees and a step-by-step calculation trace.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The cost categories an impact is broken down into.
///
/// # Example
///
/// ```
/// use impact_engine::models::CostCategory;
///
/// assert_eq!(CostCategory::NewTaxes.as_str(), "new_taxes");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    /// Additional tax on high earners from rate increases.
    IncreasedTaxBurden,
    /// Newly introduced taxes.
    NewTaxes,
    /// Employer mandates, annualised.
    Mandates,
}

impl CostCategory {
    /// Returns the category's wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CostCategory::IncreasedTaxBurden => "increased_tax_burden",
            CostCategory::NewTaxes => "new_taxes",
            CostCategory::Mandates => "mandates",
        }
    }
}

/// Annual cost per category. A category is present only when the
/// legislation contained rules of that kind.
pub type CostBreakdown = BTreeMap<CostCategory, Decimal>;

/// An employee whose cost changes under the analysed legislation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedEmployee {
    /// The employee's roster ID.
    pub employee_id: String,
    /// The employee's name.
    pub name: String,
    /// Additional annual cost attributed to this employee.
    pub additional_cost: Decimal,
    /// Why the employee is affected, e.g. "2% tax increase".
    pub reason: String,
}

/// A single step in the calculation trace recording how a category total
/// was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationStep {
    /// The sequential step number.
    pub step_number: u32,
    /// Identifier of the calculation that was applied.
    pub rule_id: String,
    /// Human-readable name of the calculation.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the arithmetic.
    pub reasoning: String,
}

/// The quantified financial consequence of applying rules to a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactResult {
    /// Total additional annual cost.
    pub projected_cost_increase: Decimal,
    /// Number of distinct affected employees.
    pub affected_employee_count: usize,
    /// `projected_cost_increase / 12`.
    pub monthly_increase: Decimal,
    /// The legislation's effective date, or "Unknown".
    pub effective_date: String,
    /// Annual cost per category.
    pub cost_breakdown: CostBreakdown,
    /// Affected employees, deduplicated by ID in encounter order.
    pub affected_employees: Vec<AffectedEmployee>,
    /// Advisory strings derived from this impact.
    pub recommendations: Vec<String>,
    /// The calculation trace.
    #[serde(default)]
    pub calculation_steps: Vec<CalculationStep>,
    /// When the analysis was performed.
    pub analyzed_at: DateTime<Utc>,
}
