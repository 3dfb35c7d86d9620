//! Regulatory monitoring models.
//!
//! Documents fetched from feeds, the per-source analysis produced by the
//! monitor, and the aggregate report over a whole scan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AuditProof, ImpactResult, ParsedLegislation};

/// A successfully fetched regulatory document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedDocument {
    /// The feed URL.
    pub url: String,
    /// The document title, falling back to the URL.
    pub title: String,
    /// The document text.
    pub text: String,
    /// When the document was fetched.
    pub fetched_at: DateTime<Utc>,
}

/// A source that was not analysed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSource {
    /// The source URL.
    pub source: String,
    /// Why it was skipped.
    pub reason: String,
}

/// A keyword-level risk signal for a regulatory update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulatorySignal {
    /// Score in `[0, 100]`.
    pub score: u32,
    /// Codes explaining the score, e.g. "tax_changes_detected".
    pub reasons: Vec<String>,
}

/// The analysis of one source within a monitor scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// The feed URL, or `ad_hoc_<index>` for ad-hoc text.
    pub source: String,
    /// The document title.
    pub title: String,
    /// The extracted rules.
    pub parsed_rules: ParsedLegislation,
    /// The computed impact; absent when the analysis failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<ImpactResult>,
    /// The keyword-level signal.
    pub signal: RegulatorySignal,
    /// Why the impact could not be computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Proof over this document (excluding this field).
    pub audit_proof: AuditProof,
}

/// The result of a monitor scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// When the scan ran.
    pub scanned_at: DateTime<Utc>,
    /// Number of feed sources requested.
    pub feed_count: usize,
    /// Number of ad-hoc texts supplied.
    pub ad_hoc_count: usize,
    /// Number of documents in `results`.
    pub analyzed_count: usize,
    /// Feed sources that could not be fetched.
    pub skipped_sources: Vec<SkippedSource>,
    /// Per-source documents, feeds first, each group in input order.
    pub results: Vec<SourceDocument>,
    /// Proof over the report (excluding this field).
    pub summary_proof: AuditProof,
}
