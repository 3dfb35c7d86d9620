//! Templated recommendations for a computed impact.

use rust_decimal::Decimal;

use crate::models::{EmployeeRoster, ImpactResult};
use crate::money::format_whole_dollars;

/// Advisory lines appended to every non-zero impact, in order.
pub const ADVISORY_RECOMMENDATIONS: [&str; 3] = [
    "Consider timing bonus payments to optimize tax liabilities",
    "Evaluate remote work arrangements for jurisdictional tax advantages",
    "Schedule compliance review before legislation effective date",
];

/// Generates recommendations for `impact`.
///
/// Returns nothing when the projected cost increase is zero or negative.
/// Otherwise emits a budget line with the amount and its share of total
/// payroll, a compensation review line when employees are affected, and
/// the [`ADVISORY_RECOMMENDATIONS`]. The share is omitted when payroll is
/// zero or cannot be summed.
///
/// # Examples
///
/// ```
/// use impact_engine::calculation::{compute_impact, generate_recommendations};
/// use impact_engine::config::ImpactPolicy;
/// use impact_engine::extraction::RuleExtractor;
/// use impact_engine::models::{EmployeeRecord, EmployeeRoster};
/// use rust_decimal::Decimal;
///
/// let roster = EmployeeRoster::new(vec![
///     EmployeeRecord::new("1", "Alice", Decimal::new(90_000, 0)),
///     EmployeeRecord::new("2", "Bob", Decimal::new(160_000, 0)),
/// ]);
/// let rules = RuleExtractor::default().extract("An increase of 2% tax effective January 1, 2026.");
/// let impact = compute_impact(&roster, &rules, &ImpactPolicy::default()).unwrap();
///
/// let recommendations = generate_recommendations(&impact, &roster);
/// assert_eq!(
///     recommendations[0],
///     "Increase payroll budget by approximately $3,200 (1.3%) annually"
/// );
/// assert_eq!(recommendations.len(), 5);
/// ```
pub fn generate_recommendations(impact: &ImpactResult, roster: &EmployeeRoster) -> Vec<String> {
    let projected = impact.projected_cost_increase;
    if projected <= Decimal::ZERO {
        return Vec::new();
    }

    let mut recommendations = Vec::with_capacity(ADVISORY_RECOMMENDATIONS.len() + 2);

    let amount = format_whole_dollars(projected);
    let share = roster
        .total_payroll()
        .ok()
        .and_then(|payroll| payroll_share(projected, payroll));
    let budget_line = match share {
        Some(percent) => format!(
            "Increase payroll budget by approximately {} ({}%) annually",
            amount, percent
        ),
        None => format!("Increase payroll budget by approximately {} annually", amount),
    };
    recommendations.push(budget_line);

    if impact.affected_employee_count > 0 {
        recommendations.push(format!(
            "Review compensation strategy for {} affected employees",
            impact.affected_employee_count
        ));
    }

    recommendations.extend(ADVISORY_RECOMMENDATIONS.iter().map(|s| s.to_string()));
    recommendations
}

/// `projected` as a percentage of `payroll` with one decimal place, or
/// `None` when payroll is zero.
fn payroll_share(projected: Decimal, payroll: Decimal) -> Option<Decimal> {
    if payroll <= Decimal::ZERO {
        return None;
    }
    let mut percent = projected
        .checked_div(payroll)?
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp(1);
    percent.rescale(1);
    Some(percent)
}
