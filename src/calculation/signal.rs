//! Regulatory signal heuristic.
//!
//! A coarse relevance score for monitored documents, independent of any
//! roster: each kind of finding adds a fixed weight and a reason tag.

use crate::models::{ParsedLegislation, RegulatorySignal};

const MAX_SIGNAL: u32 = 100;

/// Scores how much attention a parsed document deserves.
///
/// | finding                  | weight | reason                    |
/// |--------------------------|--------|---------------------------|
/// | tax changes              | 40     | `tax_changes_detected`    |
/// | new taxes                | 30     | `new_taxes_detected`      |
/// | compliance requirements  | 20     | `compliance_requirements` |
/// | mandates                 | 20     | `mandates_detected`       |
///
/// The total is capped at 100.
pub fn detect_signals(parsed: &ParsedLegislation) -> RegulatorySignal {
    let findings = [
        (!parsed.tax_changes.is_empty(), 40, "tax_changes_detected"),
        (!parsed.new_taxes.is_empty(), 30, "new_taxes_detected"),
        (
            !parsed.compliance_requirements.is_empty(),
            20,
            "compliance_requirements",
        ),
        (!parsed.mandates.is_empty(), 20, "mandates_detected"),
    ];

    let mut score = 0;
    let mut reasons = Vec::new();
    for (present, weight, reason) in findings {
        if present {
            score += weight;
            reasons.push(reason.to_string());
        }
    }

    RegulatorySignal {
        score: score.min(MAX_SIGNAL),
        reasons,
    }
}
