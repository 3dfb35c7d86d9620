//! Risk scoring.
//!
//! A risk score blends two normalised factors: projected cost relative to
//! total payroll (capped), and the share of the roster that is affected.
//! The blend is scaled to 0-100, clamped, rounded to two decimal places
//! and banded into [`RiskLevel`]s.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::RiskPolicy;
use crate::error::EngineResult;
use crate::models::{EmployeeRoster, ImpactResult, RiskLevel, RiskScore};

/// Scores `impact` against the roster it was computed for.
///
/// An empty roster or zero payroll is scored against a payroll of one
/// unit, so the cost factor saturates at the cap instead of dividing by
/// zero. Fails with `CalculationError` only if the payroll itself leaves
/// the decimal range.
///
/// # Examples
///
/// ```
/// use impact_engine::calculation::{compute_impact, score_risk};
/// use impact_engine::config::{ImpactPolicy, RiskPolicy};
/// use impact_engine::extraction::RuleExtractor;
/// use impact_engine::models::{EmployeeRecord, EmployeeRoster, RiskLevel};
/// use rust_decimal::Decimal;
///
/// let roster = EmployeeRoster::new(vec![EmployeeRecord::new("1", "Alice", Decimal::new(90_000, 0))]);
/// let rules = RuleExtractor::default().extract("A notice with no financial terms.");
/// let impact = compute_impact(&roster, &rules, &ImpactPolicy::default()).unwrap();
///
/// let score = score_risk(&impact, &roster, &RiskPolicy::default()).unwrap();
/// assert_eq!(score.risk_score, Decimal::ZERO);
/// assert_eq!(score.risk_level, RiskLevel::Low);
/// ```
pub fn score_risk(
    impact: &ImpactResult,
    roster: &EmployeeRoster,
    policy: &RiskPolicy,
) -> EngineResult<RiskScore> {
    let total_payroll = match roster.total_payroll()? {
        p if p > Decimal::ZERO => p,
        _ => Decimal::ONE,
    };

    let cost_factor = impact
        .projected_cost_increase
        .checked_div(total_payroll)
        .map_or(policy.cost_factor_cap, |f| f.min(policy.cost_factor_cap));

    let roster_size = Decimal::from(roster.len().max(1));
    let employee_factor =
        (Decimal::from(impact.affected_employee_count) / roster_size).min(Decimal::ONE);

    let raw_score = (cost_factor * policy.cost_weight + employee_factor * policy.employee_weight)
        * Decimal::ONE_HUNDRED;
    let risk_score = raw_score
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        .round_dp(2);
    let risk_level = risk_level_for(risk_score, policy);

    debug!(
        cost_factor = %cost_factor,
        employee_factor = %employee_factor,
        risk_score = %risk_score,
        risk_level = ?risk_level,
        "Scored legislative risk"
    );

    Ok(RiskScore {
        risk_score,
        risk_level,
    })
}

/// Bands a score: `HIGH` at or above the high threshold, `MEDIUM` at or
/// above the medium threshold, `LOW` otherwise.
pub fn risk_level_for(score: Decimal, policy: &RiskPolicy) -> RiskLevel {
    if score >= policy.high_threshold {
        RiskLevel::High
    } else if score >= policy.medium_threshold {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AffectedEmployee, CostBreakdown, EmployeeRecord};
    use chrono::Utc;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn impact(projected: Decimal, affected: usize) -> ImpactResult {
        ImpactResult {
            projected_cost_increase: projected,
            affected_employee_count: affected,
            monthly_increase: projected / dec("12"),
            effective_date: "Unknown".to_string(),
            cost_breakdown: CostBreakdown::new(),
            affected_employees: (0..affected)
                .map(|i| AffectedEmployee {
                    employee_id: i.to_string(),
                    name: String::new(),
                    additional_cost: Decimal::ZERO,
                    reason: String::new(),
                })
                .collect(),
            recommendations: vec![],
            calculation_steps: vec![],
            analyzed_at: Utc::now(),
        }
    }

    fn alice_and_bob() -> EmployeeRoster {
        EmployeeRoster::new(vec![
            EmployeeRecord::new("1", "Alice", dec("90000")),
            EmployeeRecord::new("2", "Bob", dec("160000")),
        ])
    }

    #[test]
    fn test_reference_scenario_score() {
        // cost 3200/250000 = 0.0128; employees 1/2 = 0.5
        // (0.0128 × 0.7 + 0.5 × 0.3) × 100 = 15.896
        let score =
            score_risk(&impact(dec("3200"), 1), &alice_and_bob(), &RiskPolicy::default()).unwrap();
        assert_eq!(score.risk_score, dec("15.90"));
        assert_eq!(score.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_cost_factor_is_capped() {
        // cost factor min(10, 2) = 2 → 140 + 30 → clamped to 100
        let score = score_risk(
            &impact(dec("2500000"), 2),
            &alice_and_bob(),
            &RiskPolicy::default(),
        )
        .unwrap();
        assert_eq!(score.risk_score, dec("100"));
        assert_eq!(score.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_empty_roster_does_not_divide_by_zero() {
        let score = score_risk(
            &impact(dec("500"), 0),
            &EmployeeRoster::default(),
            &RiskPolicy::default(),
        )
        .unwrap();
        // payroll treated as 1: cost factor saturates at 2
        assert_eq!(score.risk_score, dec("100"));
    }

    #[test]
    fn test_empty_roster_with_no_cost_is_low() {
        let score = score_risk(
            &impact(Decimal::ZERO, 0),
            &EmployeeRoster::default(),
            &RiskPolicy::default(),
        )
        .unwrap();
        assert_eq!(score.risk_score, Decimal::ZERO);
        assert_eq!(score.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_payroll_overflow_is_reported() {
        let roster = EmployeeRoster::new(vec![
            EmployeeRecord::new("1", "A", Decimal::MAX),
            EmployeeRecord::new("2", "B", Decimal::MAX),
        ]);
        let err =
            score_risk(&impact(Decimal::ZERO, 0), &roster, &RiskPolicy::default()).unwrap_err();
        assert!(matches!(err, crate::error::EngineError::CalculationError { .. }));
    }

    #[test]
    fn test_band_edges() {
        let policy = RiskPolicy::default();
        assert_eq!(risk_level_for(dec("70"), &policy), RiskLevel::High);
        assert_eq!(risk_level_for(dec("69.99"), &policy), RiskLevel::Medium);
        assert_eq!(risk_level_for(dec("35"), &policy), RiskLevel::Medium);
        assert_eq!(risk_level_for(dec("34.99"), &policy), RiskLevel::Low);
        assert_eq!(risk_level_for(dec("0"), &policy), RiskLevel::Low);
        assert_eq!(risk_level_for(dec("100"), &policy), RiskLevel::High);
    }

    #[test]
    fn test_medium_band_from_employee_share() {
        // nobody costs much but everyone is affected: 0.3 × 100 = 30 + small cost
        let score = score_risk(
            &impact(dec("25000"), 2),
            &alice_and_bob(),
            &RiskPolicy::default(),
        )
        .unwrap();
        // 25000/250000 = 0.1 → 7 + 30 = 37
        assert_eq!(score.risk_score, dec("37"));
        assert_eq!(score.risk_level, RiskLevel::Medium);
    }

    proptest! {
        #[test]
        fn prop_score_is_bounded_and_banded(
            projected in 0u64..10_000_000_000,
            affected in 0usize..50,
            salaries in proptest::collection::vec(0u64..1_000_000, 0..20),
        ) {
            let roster = EmployeeRoster::new(
                salaries
                    .iter()
                    .enumerate()
                    .map(|(i, s)| EmployeeRecord::new(i.to_string(), "", Decimal::from(*s)))
                    .collect(),
            );
            let policy = RiskPolicy::default();
            let score =
                score_risk(&impact(Decimal::from(projected), affected), &roster, &policy).unwrap();

            prop_assert!(score.risk_score >= Decimal::ZERO);
            prop_assert!(score.risk_score <= Decimal::ONE_HUNDRED);
            prop_assert!(score.risk_score.scale() <= 2);

            let expected = if score.risk_score >= dec("70") {
                RiskLevel::High
            } else if score.risk_score >= dec("35") {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            };
            prop_assert_eq!(score.risk_level, expected);
        }
    }
}
