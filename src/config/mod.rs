//! Configuration loading and management for the Legislative Impact Engine.
//!
//! This module provides functionality to load engine policy and keyword
//! vocabularies from YAML files. Thresholds and multipliers live here as
//! named values so alternate jurisdictions can override them without
//! touching extraction or impact logic.
//!
//! # Example
//!
//! ```no_run
//! use impact_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Default jurisdiction: {}", config.config().vocabulary.default_jurisdiction);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_HIGH_EARNER_THRESHOLD, DEFAULT_JURISDICTION, EngineConfig, ImpactPolicy, KeywordRule,
    MONTHS_PER_YEAR, MonitorPolicy, PolicyConfig, RiskPolicy, VocabularyConfig,
};
