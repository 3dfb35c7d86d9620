//! Calculation logic for the Legislative Impact Engine.
//!
//! This module turns extracted rules into money: one calculator per cost
//! category (tax increases, new taxes, mandates), the aggregation into an
//! [`ImpactResult`](crate::models::ImpactResult), risk scoring and banding,
//! templated recommendations, and the regulatory signal heuristic used by
//! the monitor.
//!
//! All arithmetic is checked; leaving the decimal range is reported as
//! `EngineError::CalculationError` rather than panicking.

mod impact;
mod mandate;
mod new_tax;
mod recommendations;
mod risk;
mod signal;
mod tax_increase;

use crate::error::EngineError;

pub use impact::{compute_impact, compute_impact_at, dedup_affected_employees};
pub use mandate::{MandateResult, calculate_mandate_impact};
pub use new_tax::{NewTaxResult, calculate_new_tax_impact};
pub use recommendations::{ADVISORY_RECOMMENDATIONS, generate_recommendations};
pub use risk::{risk_level_for, score_risk};
pub use signal::detect_signals;
pub use tax_increase::{TaxIncreaseResult, calculate_tax_increase_impact};

pub(crate) fn overflow(context: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} overflowed decimal range", context),
    }
}
