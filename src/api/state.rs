//! Application state for the Legislative Impact Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::monitor::{FeedFetcher, HttpFeedFetcher};
use crate::pipeline::ImpactEngine;

/// Shared application state.
///
/// Holds the analysis engine and the feed fetcher used by monitor scans.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<ImpactEngine>,
    fetcher: Arc<dyn FeedFetcher>,
}

impl AppState {
    /// Creates application state from an engine and a feed fetcher.
    pub fn new(engine: ImpactEngine, fetcher: Arc<dyn FeedFetcher>) -> Self {
        Self {
            engine: Arc::new(engine),
            fetcher,
        }
    }

    /// Builds the engine and an HTTP feed fetcher from loaded configuration.
    pub fn from_config(loader: ConfigLoader) -> EngineResult<Self> {
        let config = loader.into_config();
        let timeout = Duration::from_secs(config.policy.monitor.fetch_timeout_secs);
        let fetcher: Arc<dyn FeedFetcher> = Arc::new(HttpFeedFetcher::new(timeout)?);
        let engine = ImpactEngine::from_config(config)?;
        Ok(Self::new(engine, fetcher))
    }

    /// Returns the analysis engine.
    pub fn engine(&self) -> &ImpactEngine {
        &self.engine
    }

    /// Returns a handle to the feed fetcher.
    pub fn fetcher(&self) -> Arc<dyn FeedFetcher> {
        Arc::clone(&self.fetcher)
    }
}
