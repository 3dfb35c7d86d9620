//! The analysis pipeline.
//!
//! [`ImpactEngine`] wires the components together in the order every
//! analysis runs them: extraction, impact computation, recommendations,
//! risk scoring and sealing. Each call is independent; the engine holds
//! only configuration and stateless collaborators and can be shared
//! freely across threads.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::audit::{Attestor, AuditRecorder, HttpAttestor};
use crate::calculation::{compute_impact_at, generate_recommendations, score_risk};
use crate::config::{EngineConfig, MonitorPolicy};
use crate::error::EngineResult;
use crate::extraction::RuleExtractor;
use crate::models::{
    AggregateReport, EmployeeRoster, ImpactResult, ParsedLegislation, RiskAssessment, RiskLevel,
};
use crate::monitor::{FeedFetcher, MonitorOrchestrator};

/// A [`RiskAssessment`] without its proof, serialised identically.
#[derive(Serialize)]
struct AssessmentBody<'a> {
    risk_score: rust_decimal::Decimal,
    risk_level: RiskLevel,
    impact: &'a ImpactResult,
    recommendations: &'a [String],
    analyzed_at: DateTime<Utc>,
}

/// Composes extraction, impact, risk and sealing into single calls.
///
/// # Examples
///
/// ```
/// use impact_engine::models::{EmployeeRecord, EmployeeRoster};
/// use impact_engine::pipeline::ImpactEngine;
/// use rust_decimal::Decimal;
///
/// let engine = ImpactEngine::default();
/// let roster = EmployeeRoster::new(vec![
///     EmployeeRecord::new("1", "Alice", Decimal::new(90_000, 0)),
///     EmployeeRecord::new("2", "Bob", Decimal::new(160_000, 0)),
/// ]);
///
/// let impact = engine
///     .analyze("An increase of 2% tax effective January 1, 2026.", &roster)
///     .unwrap();
/// assert_eq!(impact.projected_cost_increase, Decimal::new(3200, 0));
/// assert_eq!(impact.effective_date, "January 1, 2026");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImpactEngine {
    config: EngineConfig,
    extractor: RuleExtractor,
    recorder: AuditRecorder,
}

impl ImpactEngine {
    /// Creates an engine with local-only sealing.
    pub fn new(config: EngineConfig) -> Self {
        let extractor = RuleExtractor::new(config.vocabulary.clone());
        Self {
            config,
            extractor,
            recorder: AuditRecorder::new(),
        }
    }

    /// Creates an engine that anchors proofs through the attestation
    /// endpoint configured in the monitor policy, if any.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        let recorder = recorder_for(&config.policy.monitor)?;
        Ok(Self::new(config).with_recorder(recorder))
    }

    /// Replaces the audit recorder.
    pub fn with_recorder(mut self, recorder: AuditRecorder) -> Self {
        self.recorder = recorder;
        self
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the audit recorder.
    pub fn recorder(&self) -> &AuditRecorder {
        &self.recorder
    }

    /// Extracts rules from `text`.
    pub fn extract(&self, text: &str) -> ParsedLegislation {
        self.extractor.extract(text)
    }

    /// Extracts rules and computes their impact on `roster`, including
    /// recommendations.
    pub fn analyze(&self, text: &str, roster: &EmployeeRoster) -> EngineResult<ImpactResult> {
        self.analyze_at(text, roster, Utc::now())
    }

    /// [`analyze`](Self::analyze) with an explicit analysis instant, which
    /// also anchors the default effective date.
    pub fn analyze_at(
        &self,
        text: &str,
        roster: &EmployeeRoster,
        analyzed_at: DateTime<Utc>,
    ) -> EngineResult<ImpactResult> {
        let today: NaiveDate = analyzed_at.date_naive();
        let rules = self.extractor.extract_at(text, today);
        let mut impact = compute_impact_at(roster, &rules, &self.config.policy.impact, analyzed_at)?;
        impact.recommendations = generate_recommendations(&impact, roster);

        info!(
            employees = roster.len(),
            rules = rules.rule_count(),
            projected_cost_increase = %impact.projected_cost_increase,
            affected_employee_count = impact.affected_employee_count,
            "Analyzed legislation"
        );
        Ok(impact)
    }

    /// Analyzes `text`, scores the risk and seals the assessment locally.
    pub fn assess_risk(&self, text: &str, roster: &EmployeeRoster) -> EngineResult<RiskAssessment> {
        self.assess_risk_at(text, roster, Utc::now())
    }

    /// [`assess_risk`](Self::assess_risk) with an explicit analysis instant.
    pub fn assess_risk_at(
        &self,
        text: &str,
        roster: &EmployeeRoster,
        analyzed_at: DateTime<Utc>,
    ) -> EngineResult<RiskAssessment> {
        let impact = self.analyze_at(text, roster, analyzed_at)?;
        let score = score_risk(&impact, roster, &self.config.policy.risk)?;
        let recommendations = impact.recommendations.clone();

        let audit_proof = self.recorder.seal(&AssessmentBody {
            risk_score: score.risk_score,
            risk_level: score.risk_level,
            impact: &impact,
            recommendations: &recommendations,
            analyzed_at,
        })?;
        debug!(digest = %audit_proof.digest, "Sealed risk assessment");

        Ok(RiskAssessment {
            risk_score: score.risk_score,
            risk_level: score.risk_level,
            impact,
            recommendations,
            analyzed_at,
            audit_proof,
        })
    }

    /// [`assess_risk`](Self::assess_risk), then anchors the proof with the
    /// configured attestor. Attestation failures leave the proof local.
    pub async fn assess_risk_sealed(
        &self,
        text: &str,
        roster: &EmployeeRoster,
    ) -> EngineResult<RiskAssessment> {
        let mut assessment = self.assess_risk(text, roster)?;
        self.recorder.anchor(&mut assessment.audit_proof).await;
        Ok(assessment)
    }

    /// Builds a monitor sharing this engine's vocabulary, policy and recorder.
    pub fn monitor(&self, fetcher: Arc<dyn FeedFetcher>) -> MonitorOrchestrator {
        MonitorOrchestrator::new(
            fetcher,
            self.extractor.clone(),
            self.config.policy.impact.clone(),
            self.recorder.clone(),
        )
    }

    /// Scans feeds and ad-hoc texts with `fetcher`.
    pub async fn scan(
        &self,
        fetcher: Arc<dyn FeedFetcher>,
        feed_urls: &[String],
        ad_hoc_texts: &[String],
        roster: &EmployeeRoster,
    ) -> EngineResult<AggregateReport> {
        self.monitor(fetcher)
            .scan(feed_urls, ad_hoc_texts, roster)
            .await
    }
}

fn recorder_for(policy: &MonitorPolicy) -> EngineResult<AuditRecorder> {
    let Some(endpoint) = &policy.attestation_endpoint else {
        return Ok(AuditRecorder::new());
    };
    let attestor = HttpAttestor::new(
        endpoint.clone(),
        std::time::Duration::from_secs(policy.attestation_timeout_secs),
    )?;
    info!(
        endpoint = %attestor.endpoint(),
        source = %policy.attestation_source,
        "Audit proofs will be anchored externally"
    );
    let attestor: Arc<dyn Attestor> = Arc::new(attestor);
    Ok(AuditRecorder::with_attestor(
        attestor,
        policy.attestation_source.clone(),
    ))
}
