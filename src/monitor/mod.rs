//! Regulatory monitoring.
//!
//! The [`MonitorOrchestrator`] scans a batch of feed URLs and ad-hoc texts,
//! analyses each one independently and seals both the per-source documents
//! and the aggregate report. Feed retrieval goes through the
//! [`FeedFetcher`] collaborator so transports can be swapped in tests.

mod fetch;
mod orchestrator;

pub use fetch::{FeedFetcher, HttpFeedFetcher};
pub use orchestrator::MonitorOrchestrator;
