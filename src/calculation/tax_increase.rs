//! Tax increase impact calculation.
//!
//! This module applies extracted tax rate increases to the high earners of
//! a roster. Each qualifying employee accrues `salary × rate / 100` per
//! matching rule, and every accrual is reported as an affected-employee
//! entry tagged with the triggering rate.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AffectedEmployee, CalculationStep, EmployeeRoster, ExtractedRule};

use super::overflow;

/// The result of applying tax increases, including the category total,
/// the per-employee accruals and an audit step.
#[derive(Debug, Clone)]
pub struct TaxIncreaseResult {
    /// Total additional annual tax burden.
    pub total: Decimal,
    /// One entry per (rule, qualifying employee), in rule then roster order.
    pub affected_employees: Vec<AffectedEmployee>,
    /// The calculation step recording this category.
    pub audit_step: CalculationStep,
}

/// Applies every `TaxIncrease` rule in `tax_changes` to employees whose
/// salary is strictly above `threshold`.
///
/// `NewTaxBracket` rules are informational and carry no cost; they are
/// counted in the step input only.
///
/// # Examples
///
/// ```
/// use impact_engine::calculation::calculate_tax_increase_impact;
/// use impact_engine::models::{EmployeeRecord, EmployeeRoster, ExtractedRule};
/// use rust_decimal::Decimal;
///
/// let roster = EmployeeRoster::new(vec![
///     EmployeeRecord::new("1", "Alice", Decimal::new(90_000, 0)),
///     EmployeeRecord::new("2", "Bob", Decimal::new(160_000, 0)),
/// ]);
/// let rules = vec![ExtractedRule::tax_increase(Decimal::new(2, 0))];
///
/// let result =
///     calculate_tax_increase_impact(&roster, &rules, Decimal::new(150_000, 0), 1).unwrap();
/// assert_eq!(result.total, Decimal::new(3200, 0));
/// assert_eq!(result.affected_employees.len(), 1);
/// ```
pub fn calculate_tax_increase_impact(
    roster: &EmployeeRoster,
    tax_changes: &[ExtractedRule],
    threshold: Decimal,
    step_number: u32,
) -> EngineResult<TaxIncreaseResult> {
    let high_earners: Vec<_> = roster
        .employees()
        .iter()
        .filter(|e| e.salary > threshold)
        .collect();

    let mut total = Decimal::ZERO;
    let mut affected_employees = Vec::new();
    let mut increases_applied = 0usize;
    let mut brackets_seen = 0usize;

    for rule in tax_changes {
        let rate_percent = match rule {
            ExtractedRule::TaxIncrease { rate_percent, .. } => *rate_percent,
            ExtractedRule::NewTaxBracket { .. } => {
                brackets_seen += 1;
                continue;
            }
            _ => continue,
        };
        increases_applied += 1;

        let rate = rate_percent / Decimal::ONE_HUNDRED;
        for employee in &high_earners {
            let increase = employee
                .salary
                .checked_mul(rate)
                .ok_or_else(|| overflow("tax increase"))?;
            total = total
                .checked_add(increase)
                .ok_or_else(|| overflow("tax increase total"))?;

            affected_employees.push(AffectedEmployee {
                employee_id: employee.id.clone(),
                name: employee.name.clone(),
                additional_cost: increase,
                reason: format!("{}% tax increase", rate_percent.normalize()),
            });
        }
    }

    let audit_step = CalculationStep {
        step_number,
        rule_id: "tax_increase".to_string(),
        rule_name: "High Earner Tax Increase".to_string(),
        input: serde_json::json!({
            "threshold": threshold.normalize().to_string(),
            "increase_rules": increases_applied,
            "informational_brackets": brackets_seen,
            "high_earners": high_earners.len()
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string(),
            "accruals": affected_employees.len()
        }),
        reasoning: format!(
            "{} increase rule(s) × {} employee(s) over ${} = ${}",
            increases_applied,
            high_earners.len(),
            threshold.normalize(),
            total.normalize()
        ),
    };

    Ok(TaxIncreaseResult {
        total,
        affected_employees,
        audit_step,
    })
}
