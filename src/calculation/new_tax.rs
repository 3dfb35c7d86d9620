//! New tax impact calculation.
//!
//! Percentage taxes are levied on total payroll; fixed taxes are charged
//! once per employee, with the amount parsed from the matched currency text.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{CalculationStep, EmployeeRoster, ExtractedRule, NewTaxKind};

use super::overflow;

/// The result of applying new taxes.
#[derive(Debug, Clone)]
pub struct NewTaxResult {
    /// Total annual cost of new taxes.
    pub total: Decimal,
    /// The calculation step recording this category.
    pub audit_step: CalculationStep,
}

/// Applies every `NewTax` rule in `new_taxes` to the roster.
///
/// Fails with `MalformedAmount` if a fixed amount does not parse, and with
/// `CalculationError` if payroll or a tax leaves the decimal range.
///
/// # Examples
///
/// ```
/// use impact_engine::calculation::calculate_new_tax_impact;
/// use impact_engine::models::{EmployeeRecord, EmployeeRoster, ExtractedRule, RawAmount};
/// use rust_decimal::Decimal;
///
/// let roster = EmployeeRoster::new(vec![
///     EmployeeRecord::new("1", "A", Decimal::new(50_000, 0)),
///     EmployeeRecord::new("2", "B", Decimal::new(60_000, 0)),
///     EmployeeRecord::new("3", "C", Decimal::new(70_000, 0)),
/// ]);
/// let rules = vec![ExtractedRule::per_employee_tax(RawAmount::new("$50"))];
///
/// let result = calculate_new_tax_impact(&roster, &rules, 2).unwrap();
/// assert_eq!(result.total, Decimal::new(150, 0));
/// ```
pub fn calculate_new_tax_impact(
    roster: &EmployeeRoster,
    new_taxes: &[ExtractedRule],
    step_number: u32,
) -> EngineResult<NewTaxResult> {
    let total_payroll = roster.total_payroll()?;
    let headcount = Decimal::from(roster.len());

    let mut total = Decimal::ZERO;
    let mut percentage_rules = 0usize;
    let mut fixed_rules = 0usize;

    for rule in new_taxes {
        let ExtractedRule::NewTax { kind, .. } = rule else {
            continue;
        };

        let cost = match kind {
            NewTaxKind::Percentage { rate_percent } => {
                percentage_rules += 1;
                total_payroll
                    .checked_mul(*rate_percent / Decimal::ONE_HUNDRED)
                    .ok_or_else(|| overflow("payroll tax"))?
            }
            NewTaxKind::FixedPerEmployee { amount } => {
                fixed_rules += 1;
                amount
                    .parse()?
                    .checked_mul(headcount)
                    .ok_or_else(|| overflow("per-employee tax"))?
            }
        };

        total = total
            .checked_add(cost)
            .ok_or_else(|| overflow("new tax total"))?;
    }

    let audit_step = CalculationStep {
        step_number,
        rule_id: "new_taxes".to_string(),
        rule_name: "New Taxes".to_string(),
        input: serde_json::json!({
            "total_payroll": total_payroll.normalize().to_string(),
            "employee_count": roster.len(),
            "percentage_rules": percentage_rules,
            "fixed_rules": fixed_rules
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "{} payroll percentage rule(s) on ${} + {} per-employee rule(s) × {} employee(s) = ${}",
            percentage_rules,
            total_payroll.normalize(),
            fixed_rules,
            roster.len(),
            total.normalize()
        ),
    };

    Ok(NewTaxResult { total, audit_step })
}
