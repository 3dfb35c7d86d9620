//! Employer mandate impact calculation.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{CalculationStep, EmployeeRoster, ExtractedRule};

use super::overflow;

/// The result of applying employer mandates.
#[derive(Debug, Clone)]
pub struct MandateResult {
    /// Total annualised mandate cost.
    pub total: Decimal,
    /// The calculation step recording this category.
    pub audit_step: CalculationStep,
}

/// Annualises every `HealthcareMandate` in `mandates` across the roster:
/// `monthly amount × employees × months_per_year`.
///
/// Fails with `MalformedAmount` if a mandate amount does not parse.
pub fn calculate_mandate_impact(
    roster: &EmployeeRoster,
    mandates: &[ExtractedRule],
    months_per_year: u32,
    step_number: u32,
) -> EngineResult<MandateResult> {
    let headcount = Decimal::from(roster.len());
    let months = Decimal::from(months_per_year);

    let mut total = Decimal::ZERO;
    let mut monthly_amounts = Vec::new();

    for rule in mandates {
        let ExtractedRule::HealthcareMandate {
            monthly_amount_per_employee,
            ..
        } = rule
        else {
            continue;
        };

        let monthly = monthly_amount_per_employee.parse()?;
        let annual = monthly
            .checked_mul(headcount)
            .and_then(|m| m.checked_mul(months))
            .ok_or_else(|| overflow("mandate"))?;

        total = total
            .checked_add(annual)
            .ok_or_else(|| overflow("mandate total"))?;
        monthly_amounts.push(monthly.normalize().to_string());
    }

    let audit_step = CalculationStep {
        step_number,
        rule_id: "healthcare_mandate".to_string(),
        rule_name: "Healthcare Mandate".to_string(),
        input: serde_json::json!({
            "monthly_amounts": monthly_amounts,
            "employee_count": roster.len(),
            "months_per_year": months_per_year
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "{} mandate(s) × {} employee(s) × {} months = ${}",
            monthly_amounts.len(),
            roster.len(),
            months_per_year,
            total.normalize()
        ),
    };

    Ok(MandateResult { total, audit_step })
}
