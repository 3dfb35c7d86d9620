//! Batch scanning of regulatory feeds and ad-hoc texts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::audit::AuditRecorder;
use crate::calculation::{compute_impact, detect_signals, generate_recommendations};
use crate::config::ImpactPolicy;
use crate::error::{EngineError, EngineResult};
use crate::extraction::RuleExtractor;
use crate::models::{
    AggregateReport, EmployeeRoster, FetchedDocument, ImpactResult, ParsedLegislation,
    RegulatorySignal, SkippedSource, SourceDocument,
};

use super::fetch::FeedFetcher;

/// A [`SourceDocument`] without its proof, serialised identically.
#[derive(Serialize)]
struct DocumentBody<'a> {
    source: &'a str,
    title: &'a str,
    parsed_rules: &'a ParsedLegislation,
    #[serde(skip_serializing_if = "Option::is_none")]
    impact: Option<&'a ImpactResult>,
    signal: &'a RegulatorySignal,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// An [`AggregateReport`] without its summary proof.
#[derive(Serialize)]
struct ReportBody<'a> {
    scanned_at: DateTime<Utc>,
    feed_count: usize,
    ad_hoc_count: usize,
    analyzed_count: usize,
    skipped_sources: &'a [SkippedSource],
    results: &'a [SourceDocument],
}

/// Runs extraction, impact and sealing over a batch of sources.
///
/// Feeds are fetched concurrently; a feed that cannot be fetched, or that
/// returns an empty body, is skipped and reported, never retried. Documents
/// appear in the report in input order, feeds first, then ad-hoc texts
/// named `ad_hoc_<index>`. Dropping a scan aborts its outstanding fetches.
pub struct MonitorOrchestrator {
    fetcher: Arc<dyn FeedFetcher>,
    extractor: RuleExtractor,
    policy: ImpactPolicy,
    recorder: AuditRecorder,
}

impl MonitorOrchestrator {
    /// Creates an orchestrator from its collaborators.
    pub fn new(
        fetcher: Arc<dyn FeedFetcher>,
        extractor: RuleExtractor,
        policy: ImpactPolicy,
        recorder: AuditRecorder,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            policy,
            recorder,
        }
    }

    /// Scans `feed_urls` and `ad_hoc_texts` against `roster`.
    ///
    /// Fails only with `InvalidRoster`, before any feed is fetched. Errors
    /// within a single document are recorded on that document.
    pub async fn scan(
        &self,
        feed_urls: &[String],
        ad_hoc_texts: &[String],
        roster: &EmployeeRoster,
    ) -> EngineResult<AggregateReport> {
        roster.validate()?;

        let fetched = self.fetch_all(feed_urls).await;

        let mut results = Vec::with_capacity(feed_urls.len() + ad_hoc_texts.len());
        let mut skipped_sources = Vec::new();

        for (url, outcome) in feed_urls.iter().zip(fetched) {
            match outcome {
                Ok(document) if document.text.trim().is_empty() => {
                    warn!(url = %url, "Skipping feed with an empty document");
                    skipped_sources.push(SkippedSource {
                        source: url.clone(),
                        reason: "empty document".to_string(),
                    });
                }
                Ok(document) => {
                    results.push(
                        self.analyze_document(url, &document.title, &document.text, roster)
                            .await?,
                    );
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Skipping feed that could not be fetched");
                    skipped_sources.push(SkippedSource {
                        source: url.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        for (i, text) in ad_hoc_texts.iter().enumerate() {
            let source = format!("ad_hoc_{}", i);
            results.push(self.analyze_document(&source, &source, text, roster).await?);
        }

        let scanned_at = Utc::now();
        let analyzed_count = results.len();
        let summary_proof = self
            .recorder
            .seal_and_anchor(&ReportBody {
                scanned_at,
                feed_count: feed_urls.len(),
                ad_hoc_count: ad_hoc_texts.len(),
                analyzed_count,
                skipped_sources: &skipped_sources,
                results: &results,
            })
            .await?;

        info!(
            feed_count = feed_urls.len(),
            ad_hoc_count = ad_hoc_texts.len(),
            analyzed_count,
            skipped = skipped_sources.len(),
            "Completed regulatory scan"
        );

        Ok(AggregateReport {
            scanned_at,
            feed_count: feed_urls.len(),
            ad_hoc_count: ad_hoc_texts.len(),
            analyzed_count,
            skipped_sources,
            results,
            summary_proof,
        })
    }

    /// Fetches every feed concurrently, returning outcomes in input order.
    ///
    /// The fetch tasks belong to a `JoinSet`, so they are aborted if this
    /// future is dropped before they finish.
    async fn fetch_all(&self, feed_urls: &[String]) -> Vec<EngineResult<FetchedDocument>> {
        let mut tasks = JoinSet::new();
        for (index, url) in feed_urls.iter().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            let url = url.clone();
            tasks.spawn(async move { (index, fetcher.fetch(&url).await) });
        }

        let mut outcomes: Vec<Option<EngineResult<FetchedDocument>>> =
            feed_urls.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = Some(outcome),
                Err(e) => warn!(error = %e, "Feed fetch task failed"),
            }
        }

        feed_urls
            .iter()
            .zip(outcomes)
            .map(|(url, outcome)| {
                outcome.unwrap_or_else(|| {
                    Err(EngineError::FetchFailure {
                        url: url.clone(),
                        message: "fetch task did not complete".to_string(),
                    })
                })
            })
            .collect()
    }

    async fn analyze_document(
        &self,
        source: &str,
        title: &str,
        text: &str,
        roster: &EmployeeRoster,
    ) -> EngineResult<SourceDocument> {
        let parsed_rules = self.extractor.extract(text);
        let signal = detect_signals(&parsed_rules);

        let (impact, error) = match compute_impact(roster, &parsed_rules, &self.policy) {
            Ok(mut impact) => {
                impact.recommendations = generate_recommendations(&impact, roster);
                (Some(impact), None)
            }
            Err(e) => {
                warn!(source = %source, error = %e, "Impact computation failed for document");
                (None, Some(e.to_string()))
            }
        };

        let audit_proof = self
            .recorder
            .seal_and_anchor(&DocumentBody {
                source,
                title,
                parsed_rules: &parsed_rules,
                impact: impact.as_ref(),
                signal: &signal,
                error: error.as_deref(),
            })
            .await?;

        Ok(SourceDocument {
            source: source.to_string(),
            title: title.to_string(),
            parsed_rules,
            impact,
            signal,
            error,
            audit_proof,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VocabularyConfig;
    use crate::models::{CostCategory, EmployeeRecord};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// Serves canned documents; unknown URLs fail.
    struct CannedFetcher {
        documents: HashMap<String, String>,
        delays: HashMap<String, Duration>,
    }

    impl CannedFetcher {
        fn new(documents: &[(&str, &str)]) -> Self {
            Self {
                documents: documents
                    .iter()
                    .map(|(u, t)| (u.to_string(), t.to_string()))
                    .collect(),
                delays: HashMap::new(),
            }
        }
    }

    #[async_trait]
    impl FeedFetcher for CannedFetcher {
        async fn fetch(&self, url: &str) -> EngineResult<FetchedDocument> {
            if let Some(delay) = self.delays.get(url) {
                tokio::time::sleep(*delay).await;
            }
            match self.documents.get(url) {
                Some(text) => Ok(FetchedDocument {
                    url: url.to_string(),
                    title: format!("Title for {}", url),
                    text: text.clone(),
                    fetched_at: Utc::now(),
                }),
                None => Err(EngineError::FetchFailure {
                    url: url.to_string(),
                    message: "status 404 Not Found".to_string(),
                }),
            }
        }
    }

    fn orchestrator(fetcher: CannedFetcher) -> MonitorOrchestrator {
        MonitorOrchestrator::new(
            Arc::new(fetcher),
            RuleExtractor::new(VocabularyConfig::default()),
            ImpactPolicy::default(),
            AuditRecorder::new(),
        )
    }

    fn roster() -> EmployeeRoster {
        EmployeeRoster::new(vec![
            EmployeeRecord::new("1", "Alice", dec("90000")),
            EmployeeRecord::new("2", "Bob", dec("160000")),
        ])
    }

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_failed_feed_is_skipped_not_fatal() {
        let monitor = orchestrator(CannedFetcher::new(&[(
            "https://feed.test/ok",
            "An increase of 2% tax effective January 1, 2026.",
        )]));

        let report = monitor
            .scan(
                &urls(&["https://feed.test/missing", "https://feed.test/ok"]),
                &[],
                &roster(),
            )
            .await
            .unwrap();

        assert_eq!(report.feed_count, 2);
        assert_eq!(report.analyzed_count, 1);
        assert_eq!(report.skipped_sources.len(), 1);
        assert_eq!(report.skipped_sources[0].source, "https://feed.test/missing");
        assert!(report.skipped_sources[0].reason.contains("404"));

        let doc = &report.results[0];
        assert_eq!(doc.source, "https://feed.test/ok");
        assert_eq!(doc.title, "Title for https://feed.test/ok");
        let impact = doc.impact.as_ref().unwrap();
        assert_eq!(impact.projected_cost_increase, dec("3200"));
        assert_eq!(impact.recommendations.len(), 5);
        assert_eq!(doc.signal.reasons, vec!["tax_changes_detected"]);
    }

    #[tokio::test]
    async fn test_empty_feed_is_skipped() {
        let monitor = orchestrator(CannedFetcher::new(&[
            ("https://feed.test/blank", ""),
            ("https://feed.test/spaces", "  \n "),
            ("https://feed.test/ok", "A 1% tax increase."),
        ]));

        let report = monitor
            .scan(
                &urls(&[
                    "https://feed.test/blank",
                    "https://feed.test/spaces",
                    "https://feed.test/ok",
                ]),
                &[],
                &roster(),
            )
            .await
            .unwrap();

        assert_eq!(report.analyzed_count, 1);
        assert_eq!(report.results[0].source, "https://feed.test/ok");
        let skipped: Vec<_> = report
            .skipped_sources
            .iter()
            .map(|s| (s.source.as_str(), s.reason.as_str()))
            .collect();
        assert_eq!(
            skipped,
            vec![
                ("https://feed.test/blank", "empty document"),
                ("https://feed.test/spaces", "empty document"),
            ]
        );
    }

    #[tokio::test]
    async fn test_cancelled_scan_aborts_pending_fetches() {
        struct SlowFetcher {
            completed: Arc<AtomicBool>,
        }

        #[async_trait]
        impl FeedFetcher for SlowFetcher {
            async fn fetch(&self, url: &str) -> EngineResult<FetchedDocument> {
                tokio::time::sleep(Duration::from_millis(200)).await;
                self.completed.store(true, Ordering::SeqCst);
                Ok(FetchedDocument {
                    url: url.to_string(),
                    title: url.to_string(),
                    text: "late".to_string(),
                    fetched_at: Utc::now(),
                })
            }
        }

        let completed = Arc::new(AtomicBool::new(false));
        let monitor = MonitorOrchestrator::new(
            Arc::new(SlowFetcher {
                completed: Arc::clone(&completed),
            }),
            RuleExtractor::new(VocabularyConfig::default()),
            ImpactPolicy::default(),
            AuditRecorder::new(),
        );

        let feeds = urls(&["https://feed.test/slow"]);
        let outcome = tokio::time::timeout(
            Duration::from_millis(20),
            monitor.scan(&feeds, &[], &roster()),
        )
        .await;
        assert!(outcome.is_err());

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(!completed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_ad_hoc_texts_follow_feeds_in_order() {
        let monitor = orchestrator(CannedFetcher::new(&[("https://feed.test/a", "nothing")]));
        let report = monitor
            .scan(
                &urls(&["https://feed.test/a"]),
                &urls(&["first text", "Employers must pay $50 per employee."]),
                &roster(),
            )
            .await
            .unwrap();

        let sources: Vec<_> = report.results.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(sources, vec!["https://feed.test/a", "ad_hoc_0", "ad_hoc_1"]);
        assert_eq!(report.ad_hoc_count, 2);

        let fixed = report.results[2].impact.as_ref().unwrap();
        assert_eq!(fixed.cost_breakdown.get(&CostCategory::NewTaxes), Some(&dec("100")));
    }

    #[tokio::test]
    async fn test_results_keep_input_order_despite_fetch_latency() {
        let mut fetcher = CannedFetcher::new(&[
            ("https://feed.test/slow", "slow text"),
            ("https://feed.test/fast", "fast text"),
        ]);
        fetcher
            .delays
            .insert("https://feed.test/slow".to_string(), Duration::from_millis(50));
        let monitor = orchestrator(fetcher);

        let report = monitor
            .scan(
                &urls(&["https://feed.test/slow", "https://feed.test/fast"]),
                &[],
                &roster(),
            )
            .await
            .unwrap();
        let sources: Vec<_> = report.results.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(sources, vec!["https://feed.test/slow", "https://feed.test/fast"]);
    }

    #[tokio::test]
    async fn test_malformed_amount_is_recorded_on_document() {
        // the mandate pattern captures "$," which does not reduce to a number
        let monitor = orchestrator(CannedFetcher::new(&[]));
        let report = monitor
            .scan(
                &[],
                &urls(&["Healthcare costs of $, monthly per employee are required."]),
                &roster(),
            )
            .await
            .unwrap();

        let doc = &report.results[0];
        assert!(doc.impact.is_none());
        assert!(doc.error.as_deref().unwrap().contains("Malformed currency amount"));
        assert_eq!(report.analyzed_count, 1);
    }

    #[tokio::test]
    async fn test_invalid_roster_fails_whole_scan() {
        let monitor = orchestrator(CannedFetcher::new(&[]));
        let bad = EmployeeRoster::new(vec![EmployeeRecord::new("x", "X", dec("-1"))]);
        let err = monitor.scan(&[], &urls(&["text"]), &bad).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidRoster { .. }));
    }

    #[tokio::test]
    async fn test_document_digest_covers_source() {
        let monitor = orchestrator(CannedFetcher::new(&[]));
        let report = monitor
            .scan(&[], &urls(&["same text", "same text"]), &roster())
            .await
            .unwrap();
        // sources differ, so the sealed bodies differ
        assert_ne!(
            report.results[0].audit_proof.digest,
            report.results[1].audit_proof.digest
        );
        assert_eq!(report.summary_proof.algorithm, "sha256");
    }

    #[tokio::test]
    async fn test_proofs_can_be_recomputed_from_report_json() {
        let monitor = orchestrator(CannedFetcher::new(&[]));
        let report = monitor
            .scan(&[], &urls(&["An increase of 2% tax effective January 1, 2026."]), &roster())
            .await
            .unwrap();
        let recorder = AuditRecorder::new();

        let mut document = serde_json::to_value(&report.results[0]).unwrap();
        document.as_object_mut().unwrap().remove("audit_proof");
        assert_eq!(
            recorder.seal(&document).unwrap().digest,
            report.results[0].audit_proof.digest
        );

        let mut summary = serde_json::to_value(&report).unwrap();
        summary.as_object_mut().unwrap().remove("summary_proof");
        assert_eq!(
            recorder.seal(&summary).unwrap().digest,
            report.summary_proof.digest
        );
    }

    #[tokio::test]
    async fn test_empty_scan_still_produces_summary_proof() {
        let monitor = orchestrator(CannedFetcher::new(&[]));
        let report = monitor.scan(&[], &[], &roster()).await.unwrap();
        assert_eq!(report.analyzed_count, 0);
        assert!(report.results.is_empty());
        assert_eq!(report.summary_proof.digest.len(), 64);
    }
}
