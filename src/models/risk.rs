//! Risk assessment models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditProof, ImpactResult};

/// Qualitative compliance risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Score below the medium threshold.
    Low,
    /// Score at or above the medium threshold and below the high threshold.
    Medium,
    /// Score at or above the high threshold.
    High,
}

/// A bounded risk score and its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    /// Score in `[0, 100]`, rounded to two decimal places.
    pub risk_score: Decimal,
    /// Band derived from the score.
    pub risk_level: RiskLevel,
}

/// A complete, sealed risk assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Score in `[0, 100]`.
    pub risk_score: Decimal,
    /// Band derived from the score.
    pub risk_level: RiskLevel,
    /// The impact the score was derived from.
    pub impact: ImpactResult,
    /// Advisory strings.
    pub recommendations: Vec<String>,
    /// When the assessment was made.
    pub analyzed_at: DateTime<Utc>,
    /// Proof over the assessment (excluding this field).
    pub audit_proof: AuditProof,
}
