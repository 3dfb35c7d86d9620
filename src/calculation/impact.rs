//! Impact aggregation.
//!
//! Combines the per-category calculators into a single [`ImpactResult`].

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::ImpactPolicy;
use crate::error::EngineResult;
use crate::models::{
    AffectedEmployee, CostBreakdown, CostCategory, EmployeeRoster, ImpactResult, ParsedLegislation,
};

use super::mandate::calculate_mandate_impact;
use super::new_tax::calculate_new_tax_impact;
use super::overflow;
use super::tax_increase::calculate_tax_increase_impact;

/// Computes the impact of `rules` on `roster`, stamped with the current time.
///
/// See [`compute_impact_at`].
pub fn compute_impact(
    roster: &EmployeeRoster,
    rules: &ParsedLegislation,
    policy: &ImpactPolicy,
) -> EngineResult<ImpactResult> {
    compute_impact_at(roster, rules, policy, Utc::now())
}

/// Computes the impact of `rules` on `roster`.
///
/// A category appears in the breakdown whenever the legislation had rules
/// of that kind, even if they cost nothing. Recommendations are left empty
/// for the caller to fill.
///
/// Fails with `InvalidRoster` for a negative salary and `MalformedAmount`
/// for an unparseable currency amount.
///
/// # Examples
///
/// ```
/// use impact_engine::calculation::compute_impact_at;
/// use impact_engine::config::{ImpactPolicy, VocabularyConfig};
/// use impact_engine::extraction::RuleExtractor;
/// use impact_engine::models::{EmployeeRecord, EmployeeRoster};
/// use chrono::{NaiveDate, Utc};
/// use rust_decimal::Decimal;
///
/// let roster = EmployeeRoster::new(vec![
///     EmployeeRecord::new("1", "Alice", Decimal::new(90_000, 0)),
///     EmployeeRecord::new("2", "Bob", Decimal::new(160_000, 0)),
/// ]);
/// let today = NaiveDate::from_ymd_opt(2025, 10, 19).unwrap();
/// let rules = RuleExtractor::new(VocabularyConfig::default())
///     .extract_at("An increase of 2% tax effective January 1, 2026.", today);
///
/// let impact = compute_impact_at(&roster, &rules, &ImpactPolicy::default(), Utc::now()).unwrap();
/// assert_eq!(impact.projected_cost_increase, Decimal::new(3200, 0));
/// assert_eq!(impact.affected_employee_count, 1);
/// ```
pub fn compute_impact_at(
    roster: &EmployeeRoster,
    rules: &ParsedLegislation,
    policy: &ImpactPolicy,
    analyzed_at: DateTime<Utc>,
) -> EngineResult<ImpactResult> {
    roster.validate()?;

    let mut cost_breakdown = CostBreakdown::new();
    let mut affected = Vec::new();
    let mut calculation_steps = Vec::new();
    let mut step_number: u32 = 1;

    if !rules.tax_changes.is_empty() {
        let result = calculate_tax_increase_impact(
            roster,
            &rules.tax_changes,
            policy.high_earner_threshold,
            step_number,
        )?;
        cost_breakdown.insert(CostCategory::IncreasedTaxBurden, result.total);
        affected.extend(result.affected_employees);
        calculation_steps.push(result.audit_step);
        step_number += 1;
    }

    if !rules.new_taxes.is_empty() {
        let result = calculate_new_tax_impact(roster, &rules.new_taxes, step_number)?;
        cost_breakdown.insert(CostCategory::NewTaxes, result.total);
        calculation_steps.push(result.audit_step);
        step_number += 1;
    }

    if !rules.mandates.is_empty() {
        let result = calculate_mandate_impact(
            roster,
            &rules.mandates,
            policy.months_per_year,
            step_number,
        )?;
        cost_breakdown.insert(CostCategory::Mandates, result.total);
        calculation_steps.push(result.audit_step);
    }

    let projected_cost_increase = cost_breakdown
        .values()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
        .ok_or_else(|| overflow("projected cost"))?;
    let monthly_increase =
        projected_cost_increase / Decimal::from(policy.months_per_year.max(1));

    let affected_employees = dedup_affected_employees(affected);

    debug!(
        projected_cost_increase = %projected_cost_increase,
        affected_employee_count = affected_employees.len(),
        categories = cost_breakdown.len(),
        "Computed legislative impact"
    );

    Ok(ImpactResult {
        projected_cost_increase,
        affected_employee_count: affected_employees.len(),
        monthly_increase,
        effective_date: rules.effective_date_or_unknown().to_string(),
        cost_breakdown,
        affected_employees,
        recommendations: Vec::new(),
        calculation_steps,
        analyzed_at,
    })
}

/// Keeps the first entry per employee ID, in encounter order.
///
/// Later entries for the same employee are dropped rather than summed: an
/// employee hit by several increase rules reports only the first rule's
/// cost and reason. Category totals are unaffected.
pub fn dedup_affected_employees(entries: Vec<AffectedEmployee>) -> Vec<AffectedEmployee> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.employee_id.clone()))
        .collect()
}
